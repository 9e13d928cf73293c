use crate::primitives::ConfigError;
use clap::{Parser, Subcommand, ValueEnum};

use super::config::AppConfig;
use super::env::EnvironmentConfig;
use super::loader::load_env_files;

/// dynafix CLI - dependency-aware data fixtures
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "dynafix")]
#[command(about = "Load data fixtures in dependency order")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// dynafix commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    /// Load configuration from environment files, environment and arguments
    pub fn load() -> Result<Self, ConfigError> {
        load_env_files()?;
        let cli = Cli::parse();
        let env_config = EnvironmentConfig::load()?;

        Ok(Self {
            app_config: AppConfig::load_layered(cli.config, &env_config)?,
            command: cli.command,
        })
    }
}

/// Available dynafix commands
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Commands {
    /// List all discovered fixtures in the order they would be loaded
    List {
        /// Output format
        #[arg(long, value_enum, default_value_t = ListFormat::Text)]
        format: ListFormat,
    },

    /// Load fixtures together with everything they depend on
    Load {
        /// Only load fixtures of this namespace
        #[arg(help = "Namespace to load fixtures from")]
        namespace: Option<String>,

        /// Only load the single fixture of the namespace with this name prefix
        #[arg(help = "Fixture name prefix within the namespace", requires = "namespace")]
        name_prefix: Option<String>,

        /// Load everything, then roll the store back
        #[arg(long, help = "Run every fixture but discard the result")]
        dry_run: bool,

        /// Print the plan instead of executing it
        #[arg(long, help = "Show the execution plan without loading anything")]
        list: bool,
    },

    /// Show version information
    Version,
}

/// Output formats of the `list` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Text,
    Json,
}

impl Commands {
    /// Check if command needs fixture discovery
    pub fn requires_discovery(&self) -> bool {
        match self {
            Commands::List { .. } => true,
            Commands::Load { .. } => true,
            Commands::Version => false,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
