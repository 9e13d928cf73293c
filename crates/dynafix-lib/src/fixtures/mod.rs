//! # Fixtures
//!
//! Fixture units, the catalog that owns them, and the machinery that plans and
//! executes them.
//!
//! ## Modules
//!
//! - [`runner`] - Plan resolution and sequential execution
//! - [`transaction`] - Atomic scope around a run
//! - [`discovery`] - Manifest-based catalog building

pub mod discovery;
pub mod runner;
pub mod transaction;

pub use discovery::{DiscoveryError, DiscoveryPolicy, DiscoveryReport, Loader, ManifestFixture};
pub use runner::{FixtureRunner, ProgressEvent, RunnerError};
pub use transaction::{NoopScope, ScopeOutcome, TransactionError, TransactionScope};

use crate::primitives::FixtureKey;
use std::collections::BTreeMap;
use std::collections::btree_map;

/// A named, idempotent data-seeding procedure
pub trait FixtureUnit {
    /// Fixtures that must be loaded before this one, in declaration order
    fn dependencies(&self) -> &[FixtureKey];

    /// Perform the side-effecting work
    fn load(&self) -> anyhow::Result<()>;

    /// Optional human readable summary shown when listing fixtures
    fn description(&self) -> Option<&str> {
        None
    }
}

/// All fixture units known to one run, keyed by identifier
///
/// Iteration is in key order, which is also the order the runner registers
/// nodes in the dependency graph.
#[derive(Default)]
pub struct Catalog {
    units: BTreeMap<FixtureKey, Box<dyn FixtureUnit>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a unit, returning the unit previously stored under the same key
    pub fn insert(
        &mut self,
        key: FixtureKey,
        unit: Box<dyn FixtureUnit>,
    ) -> Option<Box<dyn FixtureUnit>> {
        self.units.insert(key, unit)
    }

    pub fn get(&self, key: &FixtureKey) -> Option<&dyn FixtureUnit> {
        self.units.get(key).map(|unit| unit.as_ref())
    }

    pub fn contains(&self, key: &FixtureKey) -> bool {
        self.units.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &FixtureKey> {
        self.units.keys()
    }

    pub fn iter(&self) -> CatalogIter<'_> {
        CatalogIter {
            inner: self.units.iter(),
        }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.units.keys()).finish()
    }
}

/// Iterator over `(key, unit)` pairs of a [`Catalog`]
pub struct CatalogIter<'a> {
    inner: btree_map::Iter<'a, FixtureKey, Box<dyn FixtureUnit>>,
}

impl<'a> Iterator for CatalogIter<'a> {
    type Item = (&'a FixtureKey, &'a dyn FixtureUnit);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, unit)| (key, unit.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
