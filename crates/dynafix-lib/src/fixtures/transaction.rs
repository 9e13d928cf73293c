//! Atomic scope around a fixture run
//!
//! The runner opens one scope before the first fixture and closes it exactly
//! once: committed when every fixture succeeded, rolled back on the first
//! failure or when the run is a dry run.

use thiserror::Error;

/// How a scope is closed once the protected work is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeOutcome {
    Commit,
    Rollback,
}

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("A transaction is already active")]
    AlreadyActive,

    #[error("No transaction is active")]
    NotActive,

    #[error("Transaction backend failed: {reason}")]
    Backend { reason: String },
}

/// Begin/commit/rollback contract of the host's persistence layer
///
/// Receivers are shared references so the same backend can be held by the
/// fixtures that write through it while also acting as their scope.
pub trait TransactionScope {
    fn begin(&self) -> Result<(), TransactionError>;

    fn finish(&self, outcome: ScopeOutcome) -> Result<(), TransactionError>;
}

/// Scope for hosts without transactions; nothing is ever undone
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopScope;

impl TransactionScope for NoopScope {
    fn begin(&self) -> Result<(), TransactionError> {
        Ok(())
    }

    fn finish(&self, outcome: ScopeOutcome) -> Result<(), TransactionError> {
        if outcome == ScopeOutcome::Rollback {
            tracing::warn!("Rollback requested but the backend has no transactions");
        }
        Ok(())
    }
}
