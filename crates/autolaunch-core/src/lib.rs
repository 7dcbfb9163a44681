pub mod autostart;
pub mod env;
pub mod error;
pub mod launcher;
pub mod log;
pub mod notify;
pub mod program;
pub mod settings;

pub use autostart::{APP_NAME, AutostartStore};
pub use error::{AutostartError, ConfigError, LaunchError, NotifyError};
pub use launcher::{Launcher, RunOutcome, RunSummary, Sleeper, Spawner, ThreadSleeper};
pub use notify::{Notifier, NullNotifier};
pub use program::{DEFAULT_CONFIG_FILE, ProgramDescriptor, read_config};
pub use settings::Settings;
