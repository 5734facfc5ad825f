//! Record pool error types.

use rc_02_ledger_storage::StorageError;
use shared_types::MissingField;
use thiserror::Error;

/// Result type alias for pool operations.
pub type Result<T> = std::result::Result<T, PoolError>;

/// Errors that can occur on pool operations.
#[derive(Debug, Error)]
pub enum PoolError {
    /// Submission lacks a required field.
    #[error(transparent)]
    MissingField(#[from] MissingField),

    /// A pending record already uses this timestamp.
    #[error("a pending record with timestamp {0} already exists")]
    DuplicateTimestamp(u64),

    /// Confirming node id is empty.
    #[error("node id must not be empty")]
    InvalidNode,

    /// No pending record has this timestamp.
    #[error("no pending record with timestamp {0}")]
    NotFound(u64),

    /// Pool state could not be persisted.
    #[error("pending records not persisted: {0}")]
    Storage(#[from] StorageError),
}

impl PoolError {
    /// Whether the error is the caller's fault (bad input).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_) | Self::DuplicateTimestamp(_) | Self::InvalidNode
        )
    }
}
