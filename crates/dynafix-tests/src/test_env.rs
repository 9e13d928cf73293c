//! Isolated working directories for E2E testing
//!
//! Every [`TestEnvironment`] owns a temporary workdir with its own store file,
//! so tests can run in parallel without sharing state.

use anyhow::Result;
use dynafix_lib::application::{AppConfig, Commands, execute_command_with_display};
use dynafix_lib::display::{Display, StyleManager};
use dynafix_lib::store::JsonStore;
use dynafix_lib::testing::TempDirFixture;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::fixtures::SHOP;

/// Temporary fixture workdir plus the configuration pointing at it
pub struct TestEnvironment {
    workdir: TempDirFixture,
}

impl TestEnvironment {
    /// Create an empty environment
    pub fn new() -> Result<Self> {
        let workdir = TempDirFixture::new().map_err(|e| anyhow::anyhow!("{e}"))?;
        Ok(Self { workdir })
    }

    /// Create an environment populated with the sample shop fixtures
    pub fn shop() -> Result<Self> {
        let env = Self::new()?;
        for (namespace, name, manifest) in SHOP {
            env.with_fixture(namespace, name, manifest)?;
        }
        Ok(env)
    }

    /// Add a manifest at `<namespace>/fixtures/<name>.toml`
    pub fn with_fixture(&self, namespace: &str, name: &str, manifest: &str) -> Result<PathBuf> {
        self.workdir
            .write_manifest(namespace, name, manifest)
            .map_err(|e| anyhow::anyhow!("{e}"))
    }

    pub fn workdir(&self) -> &Path {
        self.workdir.path()
    }

    /// Validated configuration for this workdir
    pub fn config(&self) -> Result<AppConfig> {
        let mut config = AppConfig {
            workdir: Some(self.workdir().to_path_buf()),
            ..AppConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Run a command against this workdir with plain output
    pub fn run(&self, command: Commands) -> Result<()> {
        self.run_with(command, self.config()?)
    }

    /// Run a command with an explicit configuration
    pub fn run_with(&self, command: Commands, config: AppConfig) -> Result<()> {
        let display = Display::with_styling(StyleManager::plain());
        execute_command_with_display(command, &config, &display)
    }

    /// Records currently persisted in the store file
    pub fn stored(&self, collection: &str) -> Result<Vec<Value>> {
        let store = JsonStore::open(self.config()?.store_path())?;
        Ok(store.records(collection)?)
    }

    pub fn store_exists(&self) -> Result<bool> {
        Ok(self.config()?.store_path().exists())
    }
}

/// `load` command with the given filters
pub fn load_command(namespace: Option<&str>, name_prefix: Option<&str>, dry_run: bool) -> Commands {
    Commands::Load {
        namespace: namespace.map(str::to_string),
        name_prefix: name_prefix.map(str::to_string),
        dry_run,
        list: false,
    }
}
