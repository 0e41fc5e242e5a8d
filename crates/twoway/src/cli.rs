#![forbid(unsafe_code)]

//! Command-line flags. Flags override the config file and the environment.

use std::path::PathBuf;

use clap::Parser;
use twoway_core::{AppConfig, ConfigError};
use twoway_style::ColorProfile;

#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "twoway",
    version,
    about = "A to-do list whose rows are two-way bound to their items"
)]
pub struct Cli {
    /// Draw inline instead of on the alternate screen.
    #[arg(long)]
    pub no_alt_screen: bool,

    /// Enable mouse clicks on toggles and the Complete All action.
    #[arg(long)]
    pub mouse: bool,

    /// Color profile: mono, ansi16, or truecolor.
    #[arg(long, value_name = "PROFILE")]
    pub color: Option<ColorProfile>,

    /// Tracing filter directive, e.g. `twoway_core=debug`.
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,

    /// Append logs to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// TOML configuration file.
    #[cfg(feature = "config-file")]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Build the effective configuration from the environment, the optional
    /// config file, and these flags.
    ///
    /// # Errors
    ///
    /// Propagates environment and config file errors. `TWOWAY_COLOR` is not
    /// read at all when `--color` is given.
    pub fn resolve(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<AppConfig, ConfigError> {
        let color_flag = self.color.is_some();
        let mut config = AppConfig::from_lookup(|key: &str| {
            if color_flag && key == twoway_core::config::ENV_COLOR {
                None
            } else {
                lookup(key)
            }
        })?;

        #[cfg(feature = "config-file")]
        if let Some(path) = &self.config {
            config.apply_file(path)?;
        }

        if self.no_alt_screen {
            config.alternate_screen = false;
        }
        if self.mouse {
            config.mouse = true;
        }
        if let Some(color) = self.color {
            config.color = color;
        }
        if let Some(filter) = &self.log {
            config.log_filter = filter.clone();
        }
        if let Some(path) = &self.log_file {
            config.log_file = Some(path.clone());
        }
        Ok(config)
    }
}
