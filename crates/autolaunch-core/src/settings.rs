//! Tool settings loaded from `~/.config/autolaunch/settings.toml`.
//!
//! These control the launcher itself (logging, notifications), not the
//! list of programs, which lives in the JSON program file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;

/// Top-level settings. Missing sections fall back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// File logging.
    pub log: LogConfig,
    /// Toast notifications.
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Whether toasts are shown. Defaults to `true`.
    pub enabled: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Settings {
    /// Clamps values to safe ranges.
    pub fn validate(&mut self) {
        self.log.max_file_mb = self.log.max_file_mb.clamp(1, 1024);
    }
}

/// Returns the settings directory: `~/.config/autolaunch/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("autolaunch"))
}

/// Returns the settings file path: `~/.config/autolaunch/settings.toml`.
pub fn settings_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("settings.toml"))
}

/// Tries to load and parse `settings.toml`.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn try_load() -> Result<Option<Settings>, String> {
    let path = settings_path().ok_or("could not determine settings path")?;
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path).map_err(|e| format!("{}: {e}", path.display()))?;
    parse(&content)
        .map(Some)
        .map_err(|e| format!("{}: {e}", path.display()))
}

/// Parses settings from TOML text and validates them.
pub fn parse(content: &str) -> Result<Settings, toml::de::Error> {
    let mut settings: Settings = toml::from_str(content)?;
    settings.validate();
    Ok(settings)
}

/// Loads settings from disk, falling back to defaults.
///
/// A missing file silently yields defaults; a broken one prints a warning.
pub fn load() -> Settings {
    match try_load() {
        Ok(Some(settings)) => settings,
        Ok(None) => Settings::default(),
        Err(e) => {
            eprintln!("Warning: {e}");
            Settings::default()
        }
    }
}

/// Commented template written by `autolaunch init`.
pub fn template() -> String {
    let defaults = Settings::default();
    format!(
        "# autolaunch settings\n\
         \n\
         [log]\n\
         # Write a log file to ~/.config/autolaunch/logs/autolaunch.log\n\
         enabled = {enabled}\n\
         # Minimum level: \"debug\", \"info\", \"warn\" or \"error\"\n\
         level = \"{level}\"\n\
         # Rotate the log file when it grows past this size\n\
         max_file_mb = {max}\n\
         \n\
         [notifications]\n\
         # Show a toast for each launch step\n\
         enabled = {toasts}\n",
        enabled = defaults.log.enabled,
        level = defaults.log.level,
        max = defaults.log.max_file_mb,
        toasts = defaults.notifications.enabled,
    )
}
