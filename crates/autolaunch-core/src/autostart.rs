//! Logon autostart registration, independent of where it is stored.
//!
//! The Windows implementation writes a value under the current user's
//! `Run` registry key.

use std::path::Path;

use crate::error::AutostartError;

/// Name of the autostart entry.
pub const APP_NAME: &str = "WindowsStartupConfigurator";

/// The current user's list of commands run at logon.
pub trait AutostartStore {
    /// Writes `command` under `name`, replacing any existing entry.
    fn register(&self, name: &str, command: &str) -> Result<(), AutostartError>;

    /// Removes the entry. Fails with [`AutostartError::NotRegistered`]
    /// if there is none.
    fn unregister(&self, name: &str) -> Result<(), AutostartError>;

    /// Returns the registered command, if any.
    fn query(&self, name: &str) -> Result<Option<String>, AutostartError>;
}

/// Builds the logon command: `"<exe>" run --config "<config>"`.
pub fn command_line(exe: &Path, config: &Path) -> String {
    format!(
        "\"{}\" run --config \"{}\"",
        exe.display(),
        config.display()
    )
}
