//! # dynafix Library
//!
//! Dependency-aware data fixtures: discover fixture manifests, resolve them
//! into a deterministic load order and run them inside one transaction.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Foundation types, errors, and shared coordination
//! - [`graph`] - Dependency graph with deterministic topological resolution
//! - [`fixtures`] - Fixture units, catalog, discovery and the runner
//! - [`store`] - File-backed JSON record store with transactional staging
//! - [`logger`] - Structured logging with progress bar integration
//! - [`display`] - User-facing status lines and progress bars
//! - [`application`] - CLI interface and configuration management
//!
//! ## Quick Start
//!
//! ```no_run
//! // Parse the command line and run the selected command
//! dynafix_lib::main().unwrap();
//! ```

pub mod application;
pub mod display;
pub mod fixtures;
pub mod graph;
pub mod logger;
pub mod primitives;
pub mod store;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, Commands, execute_command};
pub use fixtures::{
    Catalog, FixtureRunner, FixtureUnit, Loader, ManifestFixture, ProgressEvent, RunnerError,
    ScopeOutcome, TransactionScope,
};
pub use graph::{DependencyGraph, GraphError};
pub use logger::Logger;
pub use primitives::{
    ColorIntent, ConfigError, FixtureKey, LogFormat, LogLevel, LogOutput, LoggerError,
};
pub use store::JsonStore;

// Private imports for the main function
use anyhow::Result;
use application::CliConfig;

pub fn main() -> Result<()> {
    // Load CLI configuration
    let config = CliConfig::load()?;

    // Colors must be decided before the logger picks its ANSI setting
    let color = config.app_config.color.resolve();
    Logger::init(config.app_config.to_logger_config(color))?;

    // Execute the command
    execute_command(config)
}
