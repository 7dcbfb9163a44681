//! Manages the logon entry that runs `autolaunch run`.
//!
//! Delegates to [`autolaunch_windows::RegistryStore`] for registry access.

use std::path::Path;

use autolaunch_core::autostart::command_line;
use autolaunch_core::{APP_NAME, AutostartError, AutostartStore, Notifier, log_error, log_info};
use autolaunch_windows::RegistryStore;

use super::notify;

pub fn register(config: &Path, notifier: &dyn Notifier) {
    match try_register(&RegistryStore, config) {
        Ok(command) => {
            println!("Program successfully registered for autostart");
            println!("  {command}");
            log_info!("registered autostart entry: {command}");
            notify(
                notifier,
                "Registration Successful",
                "Program registered for autostart",
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
            log_error!("registration failed: {e}");
            notify(
                notifier,
                "Error: Registration Error",
                &format!("Failed to register program: {e}"),
            );
            std::process::exit(1);
        }
    }
}

/// Writes the logon entry for `config` and returns the registered command.
fn try_register(store: &dyn AutostartStore, config: &Path) -> Result<String, RegisterError> {
    let config = std::path::absolute(config).map_err(RegisterError::ConfigPath)?;
    if !config.is_file() {
        return Err(RegisterError::MissingConfig(config.display().to_string()));
    }
    let exe = std::env::current_exe().map_err(AutostartError::ExePath)?;
    let command = command_line(&exe, &config);
    store.register(APP_NAME, &command)?;
    Ok(command)
}

#[derive(Debug, thiserror::Error)]
enum RegisterError {
    #[error("could not find program list: {0}")]
    MissingConfig(String),
    #[error("could not resolve program list path: {0}")]
    ConfigPath(#[source] std::io::Error),
    #[error(transparent)]
    Autostart(#[from] AutostartError),
}

pub fn unregister(notifier: &dyn Notifier) {
    const TITLE: &str = "Autostart Uninstallation";

    match try_unregister(&RegistryStore) {
        Ok(Removal::Removed) => {
            println!("Successfully unregistered '{APP_NAME}' from autostart.");
            log_info!("removed autostart entry");
            notify(
                notifier,
                TITLE,
                &format!("'{APP_NAME}' unregistered successfully from autostart."),
            );
        }
        Ok(Removal::NothingToRemove) => {
            println!(
                "Autostart entry for '{APP_NAME}' not found in registry. Nothing to uninstall."
            );
            notify(
                notifier,
                TITLE,
                &format!("Autostart entry for '{APP_NAME}' not found. Nothing to uninstall."),
            );
        }
        Err(e) => {
            eprintln!("Error unregistering from autostart: {e}");
            log_error!("unregister failed: {e}");
            notify(
                notifier,
                TITLE,
                &format!("Failed to unregister '{APP_NAME}' from autostart: {e}"),
            );
            std::process::exit(1);
        }
    }
}

/// What `unregister` found.
#[derive(Debug, PartialEq, Eq)]
enum Removal {
    Removed,
    NothingToRemove,
}

/// Deletes the logon entry. A missing entry is not an error.
fn try_unregister(store: &dyn AutostartStore) -> Result<Removal, AutostartError> {
    match store.unregister(APP_NAME) {
        Ok(()) => Ok(Removal::Removed),
        Err(AutostartError::NotRegistered(_)) => Ok(Removal::NothingToRemove),
        Err(e) => Err(e),
    }
}

pub fn status() {
    match RegistryStore.query(APP_NAME) {
        Ok(Some(command)) => {
            println!("Autostart is currently enabled.");
            println!("  {command}");
        }
        Ok(None) => println!("Autostart is currently disabled."),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
