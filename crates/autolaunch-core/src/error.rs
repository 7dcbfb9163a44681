//! Error types, one enum per failure category.
//!
//! Callers can tell run-aborting failures ([`ConfigError`]) apart from
//! skip-and-continue ones ([`LaunchError`]) by type alone.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain the program list. Aborts the whole run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file '{}' not found", .path.display())]
    NotFound { path: PathBuf },
    #[error("could not decode JSON from '{}': {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not read '{}': {source}", .path.display())]
    Unexpected {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure to launch a single program. The run continues with the next one.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("path not specified for '{name}'")]
    InvalidDescriptor { name: String },
    #[error("program file not found at '{path}'")]
    NotFound { path: String },
    #[error("could not start '{path}': {source}")]
    Other {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl LaunchError {
    /// Classifies an I/O error raised while spawning `path`.
    pub fn from_io(path: &str, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path: path.into() }
        } else {
            Self::Other {
                path: path.into(),
                source,
            }
        }
    }
}

/// A notification could not be shown. Never affects a run's outcome.
#[derive(Debug, Error)]
#[error("could not show notification: {0}")]
pub struct NotifyError(pub String);

/// Registry autostart failures.
#[derive(Debug, Error)]
pub enum AutostartError {
    #[error("autostart entry '{0}' not found")]
    NotRegistered(String),
    #[error("registry error: {0}")]
    Registry(String),
    #[error("could not resolve executable path: {0}")]
    ExePath(#[source] io::Error),
    #[error("autostart is only available on Windows")]
    Unsupported,
}
