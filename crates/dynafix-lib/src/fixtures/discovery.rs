//! Manifest-based fixture discovery
//!
//! A workdir holds one directory per namespace. Fixtures of a namespace are
//! TOML manifests under its `fixtures/` directory:
//!
//! ```text
//! <workdir>/
//!   accounts/fixtures/0001_users.toml
//!   accounts/fixtures/0002_groups.toml
//!   shop/fixtures/0001_products.toml
//! ```
//!
//! A manifest declares its dependencies and the records it writes:
//!
//! ```toml
//! description = "Default staff accounts"
//! dependencies = ["accounts.0001_users"]
//!
//! [[records]]
//! collection = "groups"
//! key = "name"
//! data = { name = "staff", members = ["alice"] }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, trace, warn};

use super::{Catalog, FixtureUnit};
use crate::primitives::FixtureKey;
use crate::store::JsonStore;

/// Directory inside each namespace that holds its manifests
pub const FIXTURES_DIR: &str = "fixtures";

/// Extension of manifest files
pub const MANIFEST_EXTENSION: &str = "toml";

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Fixture {key} is invalid: {reason}")]
    BadFixtureUnit { key: FixtureKey, reason: String },
}

/// How discovery treats manifests that cannot be turned into fixture units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiscoveryPolicy {
    /// Abort on the first invalid manifest
    #[default]
    Strict,
    /// Log a warning, skip the manifest and keep going
    Lenient,
}

/// Outcome of a discovery pass
#[derive(Debug)]
pub struct DiscoveryReport {
    pub catalog: Catalog,
    /// Namespaces that had a fixtures directory, in visiting order
    pub namespaces_searched: Vec<String>,
    /// Manifests skipped under [`DiscoveryPolicy::Lenient`]
    pub skipped: Vec<DiscoveryError>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    dependencies: Vec<String>,
    #[serde(default)]
    records: Vec<ManifestRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestRecord {
    collection: String,
    data: Value,
    #[serde(default)]
    key: Option<String>,
}

/// Fixture unit backed by a TOML manifest
///
/// Loading upserts every record of the manifest into the shared store. When a
/// record names a `key` field, an existing record with the same value for that
/// field is replaced, so loading the same fixture twice leaves one copy.
#[derive(Debug)]
pub struct ManifestFixture {
    key: FixtureKey,
    description: Option<String>,
    dependencies: Vec<FixtureKey>,
    records: Vec<ManifestRecord>,
    store: Arc<JsonStore>,
}

impl ManifestFixture {
    /// Parse manifest `source` for the fixture `key`
    pub fn parse(
        key: FixtureKey,
        source: &str,
        store: Arc<JsonStore>,
    ) -> Result<Self, DiscoveryError> {
        let manifest: Manifest = toml::from_str(source).map_err(|e| bad_unit(&key, e))?;

        let dependencies = manifest
            .dependencies
            .iter()
            .map(|dependency| {
                dependency
                    .parse::<FixtureKey>()
                    .map_err(|e| bad_unit(&key, format!("dependency {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (index, record) in manifest.records.iter().enumerate() {
            if record.collection.is_empty() {
                return Err(bad_unit(&key, format!("record {index} has an empty collection")));
            }
            if !record.data.is_object() {
                return Err(bad_unit(
                    &key,
                    format!(
                        "record {index} in collection '{}' must have a table as data",
                        record.collection
                    ),
                ));
            }
        }

        Ok(Self {
            key,
            description: manifest.description,
            dependencies,
            records: manifest.records,
            store,
        })
    }

    pub fn key(&self) -> &FixtureKey {
        &self.key
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

impl FixtureUnit for ManifestFixture {
    fn dependencies(&self) -> &[FixtureKey] {
        &self.dependencies
    }

    fn load(&self) -> anyhow::Result<()> {
        for record in &self.records {
            trace!(
                fixture = %self.key,
                collection = %record.collection,
                "Writing record"
            );
            self.store
                .upsert(&record.collection, record.key.as_deref(), record.data.clone())?;
        }
        Ok(())
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Walks a workdir and builds the catalog of manifest fixtures
#[derive(Debug, Clone)]
pub struct Loader {
    workdir: PathBuf,
    store: Arc<JsonStore>,
    policy: DiscoveryPolicy,
}

impl Loader {
    pub fn new(workdir: impl Into<PathBuf>, store: Arc<JsonStore>) -> Self {
        Self {
            workdir: workdir.into(),
            store,
            policy: DiscoveryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: DiscoveryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn policy(&self) -> DiscoveryPolicy {
        self.policy
    }

    /// Discover every manifest under the workdir
    pub fn discover(&self) -> Result<DiscoveryReport, DiscoveryError> {
        let mut report = DiscoveryReport {
            catalog: Catalog::new(),
            namespaces_searched: Vec::new(),
            skipped: Vec::new(),
        };

        for namespace_dir in sorted_entries(&self.workdir)? {
            if !namespace_dir.is_dir() {
                continue;
            }
            let Some(namespace) = file_name(&namespace_dir) else {
                continue;
            };
            if namespace.starts_with('.') {
                continue;
            }
            if namespace.contains('.') {
                warn!("Skipping namespace '{namespace}': names may not contain '.'");
                continue;
            }

            let fixtures_dir = namespace_dir.join(FIXTURES_DIR);
            if !fixtures_dir.is_dir() {
                debug!("Namespace '{namespace}' has no {FIXTURES_DIR} directory");
                continue;
            }

            report.namespaces_searched.push(namespace.clone());
            self.discover_namespace(&namespace, &fixtures_dir, &mut report)?;
        }

        debug!(
            fixtures = report.catalog.len(),
            namespaces = report.namespaces_searched.len(),
            skipped = report.skipped.len(),
            "Discovery finished"
        );
        Ok(report)
    }

    fn discover_namespace(
        &self,
        namespace: &str,
        fixtures_dir: &Path,
        report: &mut DiscoveryReport,
    ) -> Result<(), DiscoveryError> {
        for path in sorted_entries(fixtures_dir)? {
            let Some(name) = manifest_name(&path) else {
                continue;
            };
            let key = FixtureKey::new(namespace, name);

            let source = fs::read_to_string(&path).map_err(|source| DiscoveryError::Io {
                path: path.clone(),
                source,
            })?;

            match ManifestFixture::parse(key.clone(), &source, Arc::clone(&self.store)) {
                Ok(unit) => {
                    trace!(records = unit.record_count(), "Discovered fixture {key}");
                    report.catalog.insert(key, Box::new(unit));
                }
                Err(err) => match self.policy {
                    DiscoveryPolicy::Strict => return Err(err),
                    DiscoveryPolicy::Lenient => {
                        warn!("Skipping fixture: {err}");
                        report.skipped.push(err);
                    }
                },
            }
        }
        Ok(())
    }
}

fn bad_unit(key: &FixtureKey, reason: impl ToString) -> DiscoveryError {
    DiscoveryError::BadFixtureUnit {
        key: key.clone(),
        reason: reason.to_string(),
    }
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    let io_error = |source| DiscoveryError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = fs::read_dir(dir)
        .map_err(io_error)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_error)?;
    paths.sort();
    Ok(paths)
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}

/// Fixture name for a manifest path, or `None` when the file is not a fixture
fn manifest_name(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    if path.extension().and_then(|ext| ext.to_str()) != Some(MANIFEST_EXTENSION) {
        return None;
    }

    let stem = path.file_stem()?.to_str()?;
    if stem.is_empty() || stem.starts_with(['_', '.', '~']) {
        return None;
    }
    Some(stem.to_string())
}

#[cfg(test)]
mod tests {
    include!("discovery.test.rs");
}
