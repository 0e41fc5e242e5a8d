#![forbid(unsafe_code)]

//! Application configuration.
//!
//! Layers, lowest precedence first: built-in defaults, environment
//! variables, an optional TOML file (feature `config-file`), and finally
//! command-line flags applied by the binary.
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `TWOWAY_LOG` | tracing filter directive (default `info`) |
//! | `TWOWAY_LOG_FILE` | write logs to this file |
//! | `TWOWAY_COLOR` | `mono`, `ansi16`, or `truecolor` |
//! | `NO_COLOR` | any non-empty value forces `mono` |

use std::fmt;
use std::path::PathBuf;

use twoway_style::ColorProfile;
use twoway_style::color::UnknownColorProfile;

pub const ENV_LOG: &str = "TWOWAY_LOG";
pub const ENV_LOG_FILE: &str = "TWOWAY_LOG_FILE";
pub const ENV_COLOR: &str = "TWOWAY_COLOR";
pub const ENV_NO_COLOR: &str = "NO_COLOR";

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub color: ColorProfile,
    pub log_filter: String,
    /// Logs are discarded when unset, since stderr shares the terminal.
    pub log_file: Option<PathBuf>,
    pub alternate_screen: bool,
    pub mouse: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            color: ColorProfile::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_file: None,
            alternate_screen: true,
            mouse: false,
        }
    }
}

/// Errors raised while assembling an [`AppConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// An environment variable or file value named an unknown color profile.
    Color {
        source_name: String,
        error: UnknownColorProfile,
    },
    /// The config file could not be read.
    Read {
        path: PathBuf,
        error: std::io::Error,
    },
    /// The config file is not valid TOML or has unexpected keys.
    Parse { path: PathBuf, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color { source_name, error } => write!(f, "{source_name}: {error}"),
            Self::Read { path, error } => {
                write!(f, "cannot read config file {}: {error}", path.display())
            }
            Self::Parse { path, message } => {
                write!(f, "invalid config file {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Color { error, .. } => Some(error),
            Self::Read { error, .. } => Some(error),
            Self::Parse { .. } => None,
        }
    }
}

impl AppConfig {
    /// Defaults overlaid with variables resolved through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Color`] if `TWOWAY_COLOR` is not a known profile.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env(lookup)?;
        Ok(config)
    }

    /// Overlay environment variables resolved through `lookup`.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Color`] if `TWOWAY_COLOR` is not a known profile.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(filter) = var(ENV_LOG) {
            self.log_filter = filter;
        }
        if let Some(path) = var(ENV_LOG_FILE) {
            self.log_file = Some(PathBuf::from(path));
        }
        if let Some(name) = var(ENV_COLOR) {
            self.color = name.parse::<ColorProfile>().map_err(|error| ConfigError::Color {
                source_name: ENV_COLOR.to_string(),
                error,
            })?;
        }
        if var(ENV_NO_COLOR).is_some() {
            self.color = ColorProfile::Mono;
        }
        Ok(())
    }
}

#[cfg(feature = "config-file")]
mod file {
    use std::path::{Path, PathBuf};

    use serde::Deserialize;
    use twoway_style::ColorProfile;

    use super::{AppConfig, ConfigError};

    #[derive(Debug, Default, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct FileConfig {
        color: Option<ColorProfile>,
        log_filter: Option<String>,
        log_file: Option<PathBuf>,
        alternate_screen: Option<bool>,
        mouse: Option<bool>,
    }

    impl AppConfig {
        /// Overlay the TOML file at `path`. Keys absent from the file keep
        /// their current value.
        ///
        /// # Errors
        ///
        /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
        pub fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
            let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Read {
                path: path.to_path_buf(),
                error,
            })?;
            self.apply_toml(&text).map_err(|message| ConfigError::Parse {
                path: path.to_path_buf(),
                message,
            })?;
            tracing::debug!(path = %path.display(), "config file applied");
            Ok(())
        }

        fn apply_toml(&mut self, text: &str) -> Result<(), String> {
            let file: FileConfig = toml::from_str(text).map_err(|e| e.to_string())?;
            if let Some(color) = file.color {
                self.color = color;
            }
            if let Some(filter) = file.log_filter {
                self.log_filter = filter;
            }
            if let Some(path) = file.log_file {
                self.log_file = Some(path);
            }
            if let Some(alt) = file.alternate_screen {
                self.alternate_screen = alt;
            }
            if let Some(mouse) = file.mouse {
                self.mouse = mouse;
            }
            Ok(())
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.log_filter, "info");
        assert!(config.alternate_screen);
        assert!(!config.mouse);
    }

    #[test]
    fn env_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_LOG, "twoway=debug"),
            (ENV_LOG_FILE, "/tmp/twoway.log"),
            (ENV_COLOR, "ansi16"),
        ]))
        .unwrap();
        assert_eq!(config.log_filter, "twoway=debug");
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/twoway.log")));
        assert_eq!(config.color, ColorProfile::Ansi16);
    }

    #[test]
    fn no_color_forces_mono() {
        let config =
            AppConfig::from_lookup(lookup(&[(ENV_COLOR, "truecolor"), (ENV_NO_COLOR, "1")]))
                .unwrap();
        assert_eq!(config.color, ColorProfile::Mono);
    }

    #[test]
    fn empty_values_are_ignored() {
        let config =
            AppConfig::from_lookup(lookup(&[(ENV_LOG, ""), (ENV_NO_COLOR, " ")])).unwrap();
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.color, ColorProfile::TrueColor);
    }

    #[test]
    fn bad_color_is_error() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_COLOR, "plaid")])).unwrap_err();
        assert!(matches!(err, ConfigError::Color { .. }));
        let msg = err.to_string();
        assert!(msg.starts_with("TWOWAY_COLOR:"));
        assert!(msg.contains("plaid"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
