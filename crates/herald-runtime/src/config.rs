//! Configuration loading for the Herald runtime.
//!
//! Figment-layered configuration, lowest to highest priority:
//!
//! 1. Built-in defaults
//! 2. `herald.toml` in the working directory (or an explicit file)
//! 3. Environment variables (`HERALD_*`, `__` as nesting separator)
//!
//! ```text
//! HERALD_LOGGING__LEVEL=debug          → logging.level = "debug"
//! HERALD_HANDLERS__COMMANDS_DIR=cmds   → handlers.commands_dir = "cmds"
//! ```
//!
//! The gateway credential is deliberately *not* part of this schema; it is
//! resolved separately from the environment at startup.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Default configuration file name.
pub const CONFIG_FILE: &str = "herald.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HeraldConfig {
    /// Handler directory layout.
    #[serde(default)]
    pub handlers: HandlerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where handler manifests are discovered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerConfig {
    /// Directory scanned for command manifests.
    #[serde(default = "default_commands_dir")]
    pub commands_dir: PathBuf,

    /// Directory scanned for event manifests.
    #[serde(default = "default_events_dir")]
    pub events_dir: PathBuf,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            commands_dir: default_commands_dir(),
            events_dir: default_events_dir(),
        }
    }
}

fn default_commands_dir() -> PathBuf {
    PathBuf::from("handlers/commands")
}

fn default_events_dir() -> PathBuf {
    PathBuf::from("handlers/events")
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Base log level (trace, debug, info, warn, error). `RUST_LOG`
    /// overrides this when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Output destination.
    #[serde(default)]
    pub output: LogOutput,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            output: LogOutput::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line, abbreviated output.
    #[default]
    Compact,
    /// The default tracing format.
    Full,
    /// Multi-line, human-oriented output.
    Pretty,
}

/// Log output destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    /// Standard output.
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested file does not exist.
    #[error("configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// Figment failed to merge or extract the configuration.
    #[error("failed to load configuration: {0}")]
    Extract(#[from] figment::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration loader with figment-based multi-source support.
///
/// # Example
///
/// ```rust,ignore
/// let config = ConfigLoader::new()
///     .file("config/herald.toml")
///     .load()?;
/// ```
#[derive(Default)]
pub struct ConfigLoader {
    config_file: Option<PathBuf>,
    load_env: bool,
}

impl ConfigLoader {
    /// Creates a loader that searches the working directory and reads
    /// `HERALD_*` environment variables.
    pub fn new() -> Self {
        Self {
            config_file: None,
            load_env: true,
        }
    }

    /// Sets a specific configuration file to load.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Loads and returns the configuration.
    pub fn load(self) -> ConfigResult<HeraldConfig> {
        let mut figment = Figment::from(Serialized::defaults(HeraldConfig::default()));

        if let Some(path) = &self.config_file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }
            figment = figment.merge(Toml::file(path));
        } else {
            // Optional: absence of herald.toml means defaults apply.
            figment = figment.merge(Toml::file(CONFIG_FILE));
        }

        if self.load_env {
            figment = figment.merge(Env::prefixed("HERALD_").split("__"));
        }

        let config: HeraldConfig = figment.extract()?;
        debug!(
            logging_level = %config.logging.level,
            commands_dir = %config.handlers.commands_dir.display(),
            events_dir = %config.handlers.events_dir.display(),
            "Configuration loaded"
        );
        Ok(config)
    }
}
