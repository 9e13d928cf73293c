//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> dynafix.toml -> .env -> env vars -> CLI args.

use crate::fixtures::DiscoveryPolicy;
use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration values
pub mod defaults {
    pub const STORE: &str = "dynafix-store.json";
    pub const CONFIG_FILE: &str = "dynafix.toml";
    pub const LOG_LEVEL: &str = "0"; // Error-only logging by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";
}

/// Default value functions for configuration fields
mod default_fns {
    use crate::primitives::{ColorIntent, LogFormat, LogOutput};

    pub fn log_level() -> u8 {
        0
    }

    pub fn log_format() -> LogFormat {
        LogFormat::Text
    }

    pub fn log_output() -> LogOutput {
        LogOutput::Stderr
    }

    pub fn color() -> ColorIntent {
        ColorIntent::Auto
    }
}

/// Application configuration structure
#[derive(Debug, Clone, PartialEq, Parser, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Working directory holding the fixture namespaces
    #[arg(short, long, global = true, env = "DYNAFIX_WORKDIR")]
    #[serde(default)]
    pub workdir: Option<PathBuf>,

    /// Record store file, relative paths resolve against the working directory
    #[arg(long, global = true, env = "DYNAFIX_STORE")]
    #[serde(default)]
    pub store: Option<PathBuf>,

    /// Treat invalid fixture manifests as errors when listing
    #[arg(
        long,
        global = true,
        env = "DYNAFIX_STRICT",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    #[serde(default)]
    pub strict: bool,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(
        long,
        global = true,
        env = "DYNAFIX_LOG_LEVEL",
        default_value = defaults::LOG_LEVEL,
        value_parser = clap::value_parser!(u8).range(0..=4)
    )]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Log format (text, json, yaml)
    #[arg(long, global = true, env = "DYNAFIX_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, global = true, env = "DYNAFIX_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, global = true, env = "DYNAFIX_COLOR", default_value = defaults::COLOR)]
    #[serde(default = "default_fns::color")]
    pub color: ColorIntent,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workdir: None,
            store: None,
            strict: false,
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
        }
    }
}

impl AppConfig {
    /// Create LoggerConfig from AppConfig and the resolved color decision
    pub fn to_logger_config(&self, color: bool) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            color,
        }
    }

    /// Read the optional configuration file, `None` when it does not exist
    pub fn from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileRead {
            path: path.display().to_string(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::ConfigFileParse {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Some(config))
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        if other.workdir.is_some() {
            self.workdir = other.workdir;
        }
        if other.store.is_some() {
            self.store = other.store;
        }
        if other.strict {
            self.strict = true;
        }

        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }

        if !matches!(other.log_format, LogFormat::Text) {
            self.log_format = other.log_format;
        }
        if !matches!(other.log_output, LogOutput::Stderr) {
            self.log_output = other.log_output;
        }
        if !matches!(other.color, ColorIntent::Auto) {
            self.color = other.color;
        }

        self
    }

    /// Validate the final configuration, making workdir and store absolute
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        let current_dir = std::env::current_dir()?;

        let workdir = match self.workdir.take() {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => current_dir.join(dir),
            None => current_dir,
        };
        if !workdir.is_dir() {
            return Err(ConfigError::InvalidWorkDir {
                path: workdir.display().to_string(),
            });
        }

        let store = self
            .store
            .take()
            .unwrap_or_else(|| PathBuf::from(defaults::STORE));
        if store.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "store path must not be empty".to_string(),
            });
        }

        self.store = Some(if store.is_absolute() {
            store
        } else {
            workdir.join(store)
        });
        self.workdir = Some(workdir);

        Ok(())
    }

    /// Working directory, the process directory when unset
    pub fn workdir_path(&self) -> PathBuf {
        self.workdir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Store file location, resolved against the working directory
    pub fn store_path(&self) -> PathBuf {
        let store = self
            .store
            .clone()
            .unwrap_or_else(|| PathBuf::from(defaults::STORE));
        if store.is_absolute() {
            store
        } else {
            self.workdir_path().join(store)
        }
    }

    /// Discovery policy for commands that only inspect fixtures
    pub fn listing_policy(&self) -> DiscoveryPolicy {
        if self.strict {
            DiscoveryPolicy::Strict
        } else {
            DiscoveryPolicy::Lenient
        }
    }
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}
