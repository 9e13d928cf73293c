//! Fixture identifiers
//!
//! A fixture is addressed by the namespace that owns it plus its name within
//! that namespace. Keys order by namespace first, then name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing a `namespace.name` string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixtureKeyError {
    #[error("Fixture reference '{value}' must have the form 'namespace.name'")]
    MissingSeparator { value: String },

    #[error("Fixture reference '{value}' has an empty namespace or name")]
    EmptyComponent { value: String },
}

/// Identifier of a single fixture unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FixtureKey {
    pub namespace: String,
    pub name: String,
}

impl FixtureKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// True when this key belongs to `namespace`
    pub fn in_namespace(&self, namespace: &str) -> bool {
        self.namespace == namespace
    }
}

impl fmt::Display for FixtureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

impl FromStr for FixtureKey {
    type Err = FixtureKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, name) =
            s.split_once('.')
                .ok_or_else(|| FixtureKeyError::MissingSeparator {
                    value: s.to_string(),
                })?;

        if namespace.is_empty() || name.is_empty() {
            return Err(FixtureKeyError::EmptyComponent {
                value: s.to_string(),
            });
        }

        Ok(Self::new(namespace, name))
    }
}

impl<N: Into<String>, M: Into<String>> From<(N, M)> for FixtureKey {
    fn from((namespace, name): (N, M)) -> Self {
        Self::new(namespace, name)
    }
}
