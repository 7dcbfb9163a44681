//! Sequential launch of the configured startup programs.
//!
//! A run reads the program list once, then walks it in order: disabled
//! and path-less programs are skipped, every other one waits its delay
//! and is spawned. A failure for one program never stops the run; only
//! failing to read the program list does.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ConfigError, LaunchError};
use crate::notify::Notifier;
use crate::program::{self, ProgramDescriptor};
use crate::{log_error, log_info, log_warn};

/// Title used for progress notifications.
pub const APP_TITLE: &str = "Startup Configurator";

/// Starts an executable as a new, detached process.
pub trait Spawner {
    /// Starts `path` without arguments. Does not wait for it to exit.
    fn spawn(&self, path: &str) -> Result<(), LaunchError>;
}

/// Blocks the run for a program's delay.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Sleeps on the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The program list could not be read; nothing was launched.
    ConfigFailed(ConfigError),
    /// The program list was empty.
    NoPrograms,
    /// Every program was processed.
    Completed(RunSummary),
}

/// Per-run counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub launched: usize,
    pub disabled: usize,
    pub invalid: usize,
    pub failed: usize,
}

/// Runs one startup sequence against injected collaborators.
pub struct Launcher<'a> {
    source: PathBuf,
    notifier: &'a dyn Notifier,
    spawner: &'a dyn Spawner,
    sleeper: &'a dyn Sleeper,
}

impl<'a> Launcher<'a> {
    pub fn new(
        source: impl Into<PathBuf>,
        notifier: &'a dyn Notifier,
        spawner: &'a dyn Spawner,
    ) -> Self {
        Self {
            source: source.into(),
            notifier,
            spawner,
            sleeper: &ThreadSleeper,
        }
    }

    /// Replaces the delay primitive.
    pub fn with_sleeper(mut self, sleeper: &'a dyn Sleeper) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Executes the full startup sequence once.
    pub fn run(&self) -> RunOutcome {
        self.info(
            APP_TITLE,
            "Windows Startup Configurator: Starting program launch...",
            "Starting program launch...",
        );

        let programs = match program::read_config(&self.source) {
            Ok(programs) => programs,
            Err(e) => {
                self.error("Configuration Error", &format!("Error: {e}"), &capitalize(&e));
                self.error(
                    APP_TITLE,
                    "Failed to read configuration. Aborting.",
                    "Failed to read configuration. Aborting.",
                );
                return RunOutcome::ConfigFailed(e);
            }
        };

        if programs.is_empty() {
            self.info(
                APP_TITLE,
                "No programs found in the configuration file.",
                "No programs found in configuration.",
            );
            return RunOutcome::NoPrograms;
        }

        let mut summary = RunSummary::default();
        for program in &programs {
            if !program.is_enabled() {
                self.info(
                    APP_TITLE,
                    &format!("Program '{}' is disabled. Skipping.", program.name),
                    &format!("'{}' is disabled. Skipping.", program.name),
                );
                summary.disabled += 1;
                continue;
            }

            match self.launch(program) {
                Ok(()) => summary.launched += 1,
                Err(LaunchError::InvalidDescriptor { .. }) => summary.invalid += 1,
                Err(_) => summary.failed += 1,
            }
        }

        self.info(
            APP_TITLE,
            "Windows Startup Configurator: Program launch finished.",
            "Program launch finished.",
        );
        RunOutcome::Completed(summary)
    }

    /// Waits the program's delay, then spawns it. Reports the result.
    pub fn launch(&self, program: &ProgramDescriptor) -> Result<(), LaunchError> {
        let name = &program.name;
        let Some(path) = program.resolve_path() else {
            self.error(
                "Launch Error",
                &format!("Error: Path not specified for program '{name}'. Skipping."),
                &format!("Path not specified for '{name}'. Skipping."),
            );
            return Err(LaunchError::InvalidDescriptor { name: name.clone() });
        };

        let delay = program.delay();
        println!(
            "Waiting for {} seconds before launching '{name}'...",
            program.delay
        );
        log_info!("waiting {:?} before launching '{name}'", delay);
        if !delay.is_zero() {
            self.sleeper.sleep(delay);
        }

        println!("Launching '{name}' from '{path}'...");
        log_info!("launching '{name}' from '{path}'");
        let result = self.spawner.spawn(&path);
        match &result {
            Ok(()) => self.info(
                "Program Launched",
                &format!("'{name}' launched successfully."),
                &format!("'{name}' launched successfully."),
            ),
            Err(LaunchError::NotFound { path }) => self.error(
                "Launch Error",
                &format!("Error: Program file not found at '{path}'. Skipping."),
                &format!("Program file not found for '{name}'. Skipping."),
            ),
            Err(e) => self.error(
                "Launch Error",
                &format!("An unexpected error occurred while launching '{name}': {e}"),
                &format!("An unexpected error occurred while launching '{name}': {e}"),
            ),
        }
        result
    }

    fn info(&self, title: &str, console: &str, message: &str) {
        println!("{console}");
        log_info!("{console}");
        self.notify(title, message);
    }

    fn error(&self, title: &str, console: &str, message: &str) {
        eprintln!("{console}");
        log_error!("{console}");
        self.notify(title, message);
    }

    fn notify(&self, title: &str, message: &str) {
        if let Err(e) = self.notifier.notify(title, message) {
            eprintln!("Error showing notification: {e}");
            log_warn!("{e}");
        }
    }
}

/// Upper-cases the first letter of an error message for display.
fn capitalize(e: &ConfigError) -> String {
    let text = e.to_string();
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io;
    use std::path::Path;

    use super::*;
    use crate::error::NotifyError;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Notify(String, String),
        Sleep(Duration),
        Spawn(String),
    }

    /// Records every collaborator call in order.
    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<Event>>,
        failures: HashMap<String, io::ErrorKind>,
        broken_notifier: bool,
    }

    impl Recorder {
        fn failing(failures: &[(&str, io::ErrorKind)]) -> Self {
            Self {
                failures: failures.iter().map(|(p, k)| (p.to_string(), *k)).collect(),
                ..Default::default()
            }
        }

        /// Sleep and spawn calls, without notifications.
        fn calls(&self) -> Vec<Event> {
            self.events
                .borrow()
                .iter()
                .filter(|e| !matches!(e, Event::Notify(..)))
                .cloned()
                .collect()
        }

        fn spawns(&self) -> Vec<String> {
            self.events
                .borrow()
                .iter()
                .filter_map(|e| match e {
                    Event::Spawn(p) => Some(p.clone()),
                    _ => None,
                })
                .collect()
        }

        fn sleeps(&self) -> Vec<Duration> {
            self.events
                .borrow()
                .iter()
                .filter_map(|e| match e {
                    Event::Sleep(d) => Some(*d),
                    _ => None,
                })
                .collect()
        }

        fn notified(&self, needle: &str) -> bool {
            self.events
                .borrow()
                .iter()
                .any(|e| matches!(e, Event::Notify(t, m) if t.contains(needle) || m.contains(needle)))
        }
    }

    impl Notifier for Recorder {
        fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
            self.events
                .borrow_mut()
                .push(Event::Notify(title.into(), message.into()));
            if self.broken_notifier {
                return Err(NotifyError("toast service unavailable".into()));
            }
            Ok(())
        }
    }

    impl Spawner for Recorder {
        fn spawn(&self, path: &str) -> Result<(), LaunchError> {
            self.events.borrow_mut().push(Event::Spawn(path.into()));
            match self.failures.get(path) {
                Some(kind) => Err(LaunchError::from_io(path, io::Error::from(*kind))),
                None => Ok(()),
            }
        }
    }

    impl Sleeper for Recorder {
        fn sleep(&self, duration: Duration) {
            self.events.borrow_mut().push(Event::Sleep(duration));
        }
    }

    fn write_config(tag: &str, json: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "autolaunch-launcher-{}-{tag}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, json).unwrap();
        path
    }

    fn run_with(recorder: &Recorder, source: &Path) -> RunOutcome {
        Launcher::new(source, recorder, recorder)
            .with_sleeper(recorder)
            .run()
    }

    #[test]
    fn empty_program_list_ends_without_spawning() {
        // Arrange
        let source = write_config("empty", r#"{"Programs": []}"#);
        let recorder = Recorder::default();

        // Act
        let outcome = run_with(&recorder, &source);

        // Assert
        assert!(matches!(outcome, RunOutcome::NoPrograms));
        assert!(recorder.spawns().is_empty());
        assert!(recorder.notified("No programs found"));
    }

    #[test]
    fn missing_config_aborts_with_one_report() {
        let source = std::env::temp_dir().join("autolaunch-launcher-missing/config.json");
        let recorder = Recorder::default();

        let outcome = run_with(&recorder, &source);

        assert!(matches!(
            outcome,
            RunOutcome::ConfigFailed(ConfigError::NotFound { .. })
        ));
        assert!(recorder.spawns().is_empty());
        assert!(recorder.notified("not found"));
        assert!(recorder.notified("Aborting"));
        assert!(!recorder.notified("finished"));
    }

    #[test]
    fn malformed_config_aborts() {
        let source = write_config("malformed", r#"{"Programs": {"Name": "A"}}"#);
        let recorder = Recorder::default();

        let outcome = run_with(&recorder, &source);

        assert!(matches!(
            outcome,
            RunOutcome::ConfigFailed(ConfigError::Malformed { .. })
        ));
        assert!(recorder.spawns().is_empty());
    }

    #[test]
    fn unreadable_config_aborts_with_zero_spawns() {
        // A directory where the program list should be cannot be read as text.
        let source = write_config("dir-source", "{}");
        let dir = source.parent().unwrap().join("as-dir.json");
        std::fs::create_dir_all(&dir).unwrap();
        let recorder = Recorder::default();

        let outcome = run_with(&recorder, &dir);

        assert!(matches!(
            outcome,
            RunOutcome::ConfigFailed(ConfigError::Unexpected { .. })
        ));
        assert!(recorder.spawns().is_empty());
        assert!(recorder.notified("Aborting"));
    }

    #[test]
    fn huge_delay_still_sleeps_before_spawn() {
        let source = write_config(
            "huge-delay",
            r#"{"Programs": [{"Name":"A","Path":"a.exe","Delay":1e20}]}"#,
        );
        let recorder = Recorder::default();

        run_with(&recorder, &source);

        assert_eq!(
            recorder.calls(),
            [Event::Sleep(Duration::MAX), Event::Spawn("a.exe".into())]
        );
    }

    #[test]
    fn delay_is_applied_before_spawn() {
        // Arrange
        let source = write_config(
            "delay",
            r#"{"Programs": [{"Name":"A","Path":"C:\\a.exe","Delay":2,"Enabled":true}]}"#,
        );
        let recorder = Recorder::default();

        // Act
        let outcome = run_with(&recorder, &source);

        // Assert
        let events = recorder.events.borrow();
        let sleep_at = events
            .iter()
            .position(|e| *e == Event::Sleep(Duration::from_secs(2)))
            .unwrap();
        let spawn_at = events
            .iter()
            .position(|e| *e == Event::Spawn(r"C:\a.exe".into()))
            .unwrap();
        assert!(sleep_at < spawn_at);
        assert!(matches!(outcome, RunOutcome::Completed(s) if s.launched == 1));
        drop(events);
        assert!(recorder.notified("launched successfully"));
    }

    #[test]
    fn zero_delay_does_not_sleep() {
        let source = write_config("nodelay", r#"{"Programs": [{"Name":"A","Path":"a.exe"}]}"#);
        let recorder = Recorder::default();

        run_with(&recorder, &source);

        assert!(recorder.sleeps().is_empty());
        assert_eq!(recorder.spawns(), ["a.exe"]);
    }

    #[test]
    fn disabled_program_is_neither_delayed_nor_spawned() {
        // Arrange
        let source = write_config(
            "disabled",
            r#"{"Programs": [{"Name":"B","Path":"b.exe","Delay":5,"Enabled":false}]}"#,
        );
        let recorder = Recorder::default();

        // Act
        let outcome = run_with(&recorder, &source);

        // Assert
        assert!(recorder.sleeps().is_empty());
        assert!(recorder.spawns().is_empty());
        assert!(recorder.notified("disabled"));
        assert!(matches!(outcome, RunOutcome::Completed(s) if s.disabled == 1));
    }

    #[test]
    fn missing_path_is_skipped_without_blocking_later_programs() {
        let source = write_config(
            "nopath",
            r#"{"Programs": [{"Name":"X","Delay":3}, {"Name":"Y","Path":"y.exe"}]}"#,
        );
        let recorder = Recorder::default();

        let outcome = run_with(&recorder, &source);

        assert!(recorder.sleeps().is_empty());
        assert_eq!(recorder.spawns(), ["y.exe"]);
        assert!(recorder.notified("Path not specified for 'X'"));
        assert!(matches!(
            outcome,
            RunOutcome::Completed(RunSummary { launched: 1, invalid: 1, .. })
        ));
    }

    #[test]
    fn spawn_attempts_follow_config_order() {
        let source = write_config(
            "order",
            r#"{"Programs": [
                {"Name":"1","Path":"one.exe","Delay":1},
                {"Name":"2","Path":"two.exe"},
                {"Name":"3","Path":"three.exe","Delay":0.5}
            ]}"#,
        );
        let recorder = Recorder::default();

        run_with(&recorder, &source);

        assert_eq!(recorder.spawns(), ["one.exe", "two.exe", "three.exe"]);
        assert_eq!(
            recorder.sleeps(),
            [Duration::from_secs(1), Duration::from_millis(500)]
        );
    }

    #[test]
    fn spawn_failure_does_not_stop_the_run() {
        // Arrange
        let source = write_config(
            "failure",
            r#"{"Programs": [
                {"Name":"Gone","Path":"gone.exe"},
                {"Name":"Locked","Path":"locked.exe"},
                {"Name":"Fine","Path":"fine.exe"}
            ]}"#,
        );
        let recorder = Recorder::failing(&[
            ("gone.exe", io::ErrorKind::NotFound),
            ("locked.exe", io::ErrorKind::PermissionDenied),
        ]);

        // Act
        let outcome = run_with(&recorder, &source);

        // Assert
        assert_eq!(recorder.spawns(), ["gone.exe", "locked.exe", "fine.exe"]);
        assert!(recorder.notified("Program file not found for 'Gone'"));
        assert!(recorder.notified("unexpected error occurred while launching 'Locked'"));
        assert!(recorder.notified("finished"));
        assert!(matches!(
            outcome,
            RunOutcome::Completed(RunSummary { launched: 1, failed: 2, .. })
        ));
    }

    #[test]
    fn path_variables_are_expanded_before_spawn() {
        let source = write_config(
            "expand",
            r#"{"Programs": [{"Name":"C","Path":"%CARGO_MANIFEST_DIR%\\x.exe"}]}"#,
        );
        let recorder = Recorder::default();

        run_with(&recorder, &source);

        let expected = format!("{}\\x.exe", env!("CARGO_MANIFEST_DIR"));
        assert_eq!(recorder.spawns(), [expected]);
    }

    #[test]
    fn notifier_failures_are_swallowed() {
        let source = write_config("quiet", r#"{"Programs": [{"Name":"A","Path":"a.exe"}]}"#);
        let recorder = Recorder {
            broken_notifier: true,
            ..Default::default()
        };

        let outcome = run_with(&recorder, &source);

        assert!(matches!(outcome, RunOutcome::Completed(s) if s.launched == 1));
    }
}
