//! Configuration loading and typed config structures for the Cordpull host.
//!
//! The canonical configuration lives in `cordpull-config.yaml` in the working
//! directory. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads and validates the file. Every
//! field has a default, so an empty or missing file is a valid configuration.

use std::path::Path;

use cordpull_decision::{ParameterError, validate_parameters};
use cordpull_types::{EnvironmentState, SimulationParameters};
use serde::Deserialize;

/// Default path of the configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "cordpull-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configured starting parameters are outside their domain.
    #[error("invalid scenario parameters: {source}")]
    InvalidParameters {
        /// The underlying validation error.
        #[from]
        source: ParameterError,
    },

    /// The event log must hold at least one entry.
    #[error("event_log.capacity must be at least 1")]
    ZeroLogCapacity,
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level host configuration.
///
/// Mirrors the structure of `cordpull-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CordpullConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Event log settings.
    #[serde(default)]
    pub event_log: EventLogConfig,

    /// Starting scenario for the decision session.
    #[serde(default)]
    pub scenario: ScenarioConfig,
}

impl CordpullConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for the listener:
    /// - `CORDPULL_HOST` overrides `server.host`
    /// - `CORDPULL_PORT` overrides `server.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or a
    /// validation error from [`CordpullConfig::validate`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.server.apply_env_overrides();
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or a
    /// validation error from [`CordpullConfig::validate`].
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document carries no mapping; every section takes its default.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that the type system cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameters`] if the scenario parameters
    /// are out of domain, or [`ConfigError::ZeroLogCapacity`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_parameters(&self.scenario.parameters)?;
        if self.event_log.capacity == 0 {
            return Err(ConfigError::ZeroLogCapacity);
        }
        Ok(())
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerSettings {
    /// Apply `CORDPULL_HOST` / `CORDPULL_PORT` overrides when set.
    ///
    /// An unparseable port is ignored and the configured value kept.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("CORDPULL_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("CORDPULL_PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.port = port,
                Err(e) => {
                    tracing::warn!(value = %port, error = %e, "ignoring invalid CORDPULL_PORT");
                }
            }
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Event log configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventLogConfig {
    /// Maximum number of retained entries.
    #[serde(default = "default_log_capacity")]
    pub capacity: usize,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            capacity: default_log_capacity(),
        }
    }
}

/// Starting scenario for the session.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScenarioConfig {
    /// Initial environment state.
    #[serde(default)]
    pub environment: EnvironmentState,

    /// Initial behavioral parameters. Missing fields take their defaults.
    #[serde(default)]
    pub parameters: SimulationParameters,
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    String::from("info")
}

/// Entries retained when `event_log.capacity` is unset.
const fn default_log_capacity() -> usize {
    50
}
