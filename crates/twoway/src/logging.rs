#![forbid(unsafe_code)]

//! Tracing subscriber setup.
//!
//! The terminal is owned by the UI, so logs only go to a file. Without a
//! configured file no subscriber is installed and events are discarded.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use twoway_core::AppConfig;

use crate::error::AppError;

/// Parse a filter directive such as `info` or `twoway_core=debug`.
///
/// # Errors
///
/// Returns [`AppError::Logging`] if the directive is malformed.
pub fn parse_filter(directive: &str) -> Result<EnvFilter, AppError> {
    EnvFilter::try_new(directive)
        .map_err(|e| AppError::Logging(format!("invalid filter {directive:?}: {e}")))
}

/// Install the global subscriber if a log file is configured.
///
/// Returns `true` when a subscriber was installed.
///
/// # Errors
///
/// Fails if the filter is malformed, the file cannot be opened, or a global
/// subscriber is already set.
pub fn init(config: &AppConfig) -> Result<bool, AppError> {
    let Some(path) = &config.log_file else {
        return Ok(false);
    };
    let filter = parse_filter(&config.log_filter)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| AppError::LogFile {
            path: path.clone(),
            error,
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_directives() {
        assert!(parse_filter("info").is_ok());
        assert!(parse_filter("twoway=debug,twoway_core=trace").is_ok());
    }

    #[test]
    fn rejects_bad_level() {
        let err = parse_filter("twoway=loud").unwrap_err();
        assert!(err.to_string().contains("twoway=loud"));
    }

    #[test]
    fn no_file_means_no_subscriber() {
        let config = AppConfig::default();
        assert!(!init(&config).unwrap());
    }

    #[test]
    fn unopenable_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            log_file: Some(dir.path().join("missing").join("twoway.log")),
            ..AppConfig::default()
        };
        assert!(matches!(init(&config), Err(AppError::LogFile { .. })));
    }
}
