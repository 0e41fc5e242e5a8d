#![forbid(unsafe_code)]

//! Top-level error type for the terminal application.

use std::fmt;
use std::io;
use std::path::PathBuf;

use twoway_core::ConfigError;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    /// Terminal I/O failed.
    Io(io::Error),
    /// The log file could not be opened.
    LogFile { path: PathBuf, error: io::Error },
    /// The log filter directive is malformed, or a subscriber is already set.
    Logging(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::Io(e) => write!(f, "terminal error: {e}"),
            Self::LogFile { path, error } => {
                write!(f, "cannot open log file {}: {error}", path.display())
            }
            Self::Logging(msg) => write!(f, "logging setup failed: {msg}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Io(e) | Self::LogFile { error: e, .. } => Some(e),
            Self::Logging(_) => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
