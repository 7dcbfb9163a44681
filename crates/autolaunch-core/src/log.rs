//! Append-only run log with size-based rotation.
//!
//! Every launcher invocation appends to
//! `~/.config/autolaunch/logs/autolaunch.log`, starting with a header line
//! so consecutive logon runs are easy to tell apart. Past the configured
//! size the file moves to `autolaunch.log.1` (one backup kept).

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

const LOG_FILE_NAME: &str = "autolaunch.log";
const BACKUP_FILE_NAME: &str = "autolaunch.log.1";

/// The `[log]` section of `settings.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether the run log is written. Defaults to `false`.
    pub enabled: bool,
    /// Minimum level: "debug", "info", "warn", or "error".
    pub level: String,
    /// Size in megabytes at which the log is rotated.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".into(),
            max_file_mb: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    /// Unknown names mean `Info`.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "debug" => Self::Debug,
            "warn" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

/// An open run log.
pub struct Logger {
    file: File,
    path: PathBuf,
    min_level: Level,
    max_bytes: u64,
    written: u64,
}

impl Logger {
    /// Opens (or creates) `autolaunch.log` inside `dir` for appending.
    pub fn open(dir: &Path, min_level: Level, max_bytes: u64) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(LOG_FILE_NAME);
        let file = append(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            file,
            path,
            min_level,
            max_bytes,
            written,
        })
    }

    /// Writes the separator line that opens one launcher invocation.
    pub fn begin_run(&mut self) {
        let header = format!(
            "==== {} autolaunch {} (pid {}) ====\n",
            timestamp(now_secs()),
            env!("CARGO_PKG_VERSION"),
            std::process::id()
        );
        self.append_line(&header);
    }

    /// Appends one entry if `level` passes the minimum.
    pub fn record(&mut self, level: Level, args: fmt::Arguments<'_>) {
        if level < self.min_level {
            return;
        }
        let line = format!("{} [{}] {args}\n", timestamp(now_secs()), level.label());
        self.append_line(&line);
    }

    fn append_line(&mut self, line: &str) {
        if self.file.write_all(line.as_bytes()).is_err() {
            return;
        }
        self.written += line.len() as u64;
        if self.max_bytes > 0 && self.written >= self.max_bytes {
            self.rotate();
        }
    }

    fn rotate(&mut self) {
        let _ = fs::rename(&self.path, self.path.with_file_name(BACKUP_FILE_NAME));
        if let Ok(file) = append(&self.path) {
            self.file = file;
        }
        self.written = 0;
    }
}

fn append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Installs the global run log under the settings directory.
///
/// Does nothing when logging is disabled or the home directory is unknown.
pub fn init(config: &LogConfig) {
    if !config.enabled {
        return;
    }
    if let Some(dir) = crate::settings::config_dir() {
        init_in(&dir.join("logs"), config);
    }
}

/// Installs the global run log in `dir` and writes the run header.
pub fn init_in(dir: &Path, config: &LogConfig) {
    let max_bytes = config.max_file_mb * 1024 * 1024;
    let Ok(mut logger) = Logger::open(dir, Level::from_name(&config.level), max_bytes) else {
        return;
    };
    logger.begin_run();
    let _ = LOGGER.set(Mutex::new(logger));
}

/// Appends to the global run log, if one is installed.
pub fn write(level: Level, args: fmt::Arguments<'_>) {
    if let Some(Ok(mut logger)) = LOGGER.get().map(Mutex::lock) {
        logger.record(level, args);
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Formats seconds since the Unix epoch as `YYYY-MM-DD HH:MM:SSZ` (UTC).
fn timestamp(secs: u64) -> String {
    let days = (secs / 86_400) as i64;
    let rem = secs % 86_400;
    let (y, mo, d) = civil_from_days(days);
    format!(
        "{y:04}-{mo:02}-{d:02} {:02}:{:02}:{:02}Z",
        rem / 3600,
        rem / 60 % 60,
        rem % 60
    )
}

/// Converts days since 1970-01-01 to a proleptic Gregorian date.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// Logs at DEBUG level.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Debug, format_args!($($arg)*)) };
}

/// Logs at INFO level.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Info, format_args!($($arg)*)) };
}

/// Logs at WARN level.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Warn, format_args!($($arg)*)) };
}

/// Logs at ERROR level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Error, format_args!($($arg)*)) };
}
