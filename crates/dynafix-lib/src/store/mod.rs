//! File-backed JSON record store
//!
//! Records live in named collections and are persisted as one pretty-printed
//! JSON document. Outside a transaction every write goes straight to disk.
//! Inside one, writes land in a staged copy that is written out on commit or
//! dropped on rollback.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, trace};

use crate::fixtures::{ScopeOutcome, TransactionError, TransactionScope};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access store file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Store file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Store state is poisoned by an earlier panic")]
    Poisoned,
}

/// On-disk document layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    collections: BTreeMap<String, Vec<Value>>,
}

#[derive(Debug)]
struct StoreState {
    committed: StoreData,
    staged: Option<StoreData>,
}

/// JSON document store that doubles as the transaction scope of a run
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    state: Mutex<StoreState>,
}

impl JsonStore {
    /// Open the store at `path`, starting empty when the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let committed = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&content).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?
        } else {
            debug!("Store file {} does not exist yet", path.display());
            StoreData::default()
        };

        Ok(Self {
            path,
            state: Mutex::new(StoreState {
                committed,
                staged: None,
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert `record`, replacing the record whose `key_field` holds the same value
    ///
    /// Without a key field, or when the record has no value for it, the record
    /// is appended.
    pub fn upsert(
        &self,
        collection: &str,
        key_field: Option<&str>,
        record: Value,
    ) -> Result<(), StoreError> {
        let mut guard = self.lock()?;
        let state = &mut *guard;

        match state.staged.as_mut() {
            Some(staged) => upsert_into(staged, collection, key_field, record),
            None => {
                upsert_into(&mut state.committed, collection, key_field, record);
                write_document(&self.path, &state.committed)?;
            }
        }
        Ok(())
    }

    /// Records of a collection as currently visible (staged writes included)
    pub fn records(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let state = self.lock()?;
        let data = state.staged.as_ref().unwrap_or(&state.committed);
        Ok(data.collections.get(collection).cloned().unwrap_or_default())
    }

    /// Names of all non-empty collections
    pub fn collections(&self) -> Result<Vec<String>, StoreError> {
        let state = self.lock()?;
        let data = state.staged.as_ref().unwrap_or(&state.committed);
        Ok(data
            .collections
            .iter()
            .filter(|(_, records)| !records.is_empty())
            .map(|(name, _)| name.clone())
            .collect())
    }

    pub fn in_transaction(&self) -> bool {
        self.lock().map(|state| state.staged.is_some()).unwrap_or(false)
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, StoreError> {
        self.state.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl TransactionScope for JsonStore {
    fn begin(&self) -> Result<(), TransactionError> {
        let mut state = self.lock().map_err(backend)?;
        if state.staged.is_some() {
            return Err(TransactionError::AlreadyActive);
        }

        state.staged = Some(state.committed.clone());
        trace!("Store transaction started");
        Ok(())
    }

    fn finish(&self, outcome: ScopeOutcome) -> Result<(), TransactionError> {
        let mut state = self.lock().map_err(backend)?;
        let staged = state.staged.take().ok_or(TransactionError::NotActive)?;

        match outcome {
            ScopeOutcome::Commit => {
                write_document(&self.path, &staged).map_err(backend)?;
                state.committed = staged;
                debug!("Store transaction committed to {}", self.path.display());
            }
            ScopeOutcome::Rollback => {
                debug!("Store transaction rolled back");
            }
        }
        Ok(())
    }
}

fn backend(err: StoreError) -> TransactionError {
    TransactionError::Backend {
        reason: err.to_string(),
    }
}

fn upsert_into(data: &mut StoreData, collection: &str, key_field: Option<&str>, record: Value) {
    let records = data.collections.entry(collection.to_string()).or_default();

    let key_value = key_field.and_then(|field| record.get(field).cloned());
    if let (Some(field), Some(value)) = (key_field, key_value) {
        if let Some(existing) = records
            .iter_mut()
            .find(|existing| existing.get(field) == Some(&value))
        {
            *existing = record;
            return;
        }
    }

    records.push(record);
}

fn write_document(path: &Path, data: &StoreData) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(data).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(path, content).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
