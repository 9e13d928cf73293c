//! Configuration loading
//!
//! Coordinates the configuration sources into the final [`AppConfig`] of one
//! invocation.

use crate::primitives::ConfigError;
use std::path::PathBuf;

use super::config::{AppConfig, defaults};
use super::env::EnvironmentConfig;

/// Environment files read before the command line is parsed, first wins
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Load `.env.local` and `.env` into the process environment
///
/// Missing files are fine. Variables already set in the environment are never
/// overridden.
pub fn load_env_files() -> Result<(), ConfigError> {
    for env_file in ENV_FILES {
        if let Err(e) = dotenvy::from_filename(env_file) {
            if !e.not_found() {
                return Err(ConfigError::EnvFileError {
                    file: env_file.to_string(),
                    source: e,
                });
            }
        }
    }
    Ok(())
}

impl AppConfig {
    /// Layer defaults, `dynafix.toml`, color environment and `cli`
    ///
    /// `cli` already carries the `DYNAFIX_*` environment variables, since clap
    /// reads them while parsing. The configuration file is looked up in the
    /// working directory given on the command line, or the process directory.
    pub fn load_layered(cli: AppConfig, env: &EnvironmentConfig) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let workdir = match &cli.workdir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        let file_path: PathBuf = workdir.join(defaults::CONFIG_FILE);
        if let Some(file_config) = Self::from_file(&file_path)? {
            if file_config.workdir.is_some() {
                return Err(ConfigError::ValidationFailed {
                    reason: format!("{} cannot set workdir", file_path.display()),
                });
            }
            config = config.merge_with(file_config);
        }

        config.color = env.apply_color_config(config.color);

        config = config.merge_with(cli);
        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
