//! Test doubles and helpers for dynafix
//!
//! Compiled for unit tests and for downstream crates that enable the
//! `test-utils` feature:
//! - [`MockFixture`] records every `load()` in a shared journal
//! - [`MockScope`] records begin/commit/rollback calls
//! - [`TempDirFixture`] builds fixture trees in a temporary directory

pub mod filesystem;

pub use filesystem::TempDirFixture;

use crate::fixtures::{FixtureUnit, ScopeOutcome, TransactionError, TransactionScope};
use crate::primitives::FixtureKey;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared, ordered record of which fixtures were loaded
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: impl Into<String>) {
        self.lock().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Fixture unit that writes its name to a [`Journal`] when loaded
pub struct MockFixture {
    name: String,
    dependencies: Vec<FixtureKey>,
    failure: Option<String>,
    journal: Journal,
}

impl MockFixture {
    pub fn new(name: impl Into<String>, journal: &Journal) -> Self {
        Self {
            name: name.into(),
            dependencies: Vec::new(),
            failure: None,
            journal: journal.clone(),
        }
    }

    pub fn with_dependencies(mut self, dependencies: Vec<FixtureKey>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Make `load()` fail with the given message after journaling the call
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }
}

impl FixtureUnit for MockFixture {
    fn dependencies(&self) -> &[FixtureKey] {
        &self.dependencies
    }

    fn load(&self) -> anyhow::Result<()> {
        self.journal.record(self.name.clone());
        match &self.failure {
            Some(message) => Err(anyhow::anyhow!(message.clone())),
            None => Ok(()),
        }
    }

    fn description(&self) -> Option<&str> {
        Some("mock fixture")
    }
}

/// Calls observed by a [`MockScope`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeCall {
    Begin,
    Commit,
    Rollback,
}

/// Transaction scope that records how it was driven
#[derive(Debug, Default)]
pub struct MockScope {
    calls: Mutex<Vec<ScopeCall>>,
    fail_begin: bool,
    fail_finish: bool,
}

impl MockScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope whose `begin()` is refused by the backend
    pub fn failing_begin() -> Self {
        Self {
            fail_begin: true,
            ..Self::default()
        }
    }

    /// Scope whose `finish()` is refused by the backend (after being recorded)
    pub fn failing_finish() -> Self {
        Self {
            fail_finish: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<ScopeCall> {
        self.lock().clone()
    }

    pub fn committed(&self) -> bool {
        self.calls().last() == Some(&ScopeCall::Commit)
    }

    pub fn rolled_back(&self) -> bool {
        self.calls().last() == Some(&ScopeCall::Rollback)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ScopeCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TransactionScope for MockScope {
    fn begin(&self) -> Result<(), TransactionError> {
        if self.fail_begin {
            return Err(TransactionError::Backend {
                reason: "begin refused".to_string(),
            });
        }
        self.lock().push(ScopeCall::Begin);
        Ok(())
    }

    fn finish(&self, outcome: ScopeOutcome) -> Result<(), TransactionError> {
        self.lock().push(match outcome {
            ScopeOutcome::Commit => ScopeCall::Commit,
            ScopeOutcome::Rollback => ScopeCall::Rollback,
        });
        if self.fail_finish {
            return Err(TransactionError::Backend {
                reason: "finish refused".to_string(),
            });
        }
        Ok(())
    }
}
