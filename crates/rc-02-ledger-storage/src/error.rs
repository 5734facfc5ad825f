//! Error types for ledger storage

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur while loading or saving ledger state
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying filesystem operation failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Original error
        #[source]
        source: std::io::Error,
    },

    /// Stored data exists but cannot be used
    #[error("Corrupt data in {}: {reason}", path.display())]
    Corrupt {
        /// Offending file
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// State could not be encoded for writing
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Backend refused the operation
    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Whether the error means stored data is unreadable (fatal at startup).
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }
}
