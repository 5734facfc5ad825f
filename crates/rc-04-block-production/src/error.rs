//! Error types for block production

use rc_02_ledger_storage::StorageError;
use rc_03_record_pool::PoolError;
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur on ledger operations
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Chain could not be loaded or saved
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Stored chain exists but is unusable
    #[error("Stored chain is corrupt: {0}")]
    CorruptChain(String),

    /// Pending records could not be reconciled with the loaded chain
    #[error("Pending pool error: {0}")]
    Pool(#[from] PoolError),

    /// A replacement chain had no blocks
    #[error("Refusing to replace the chain with an empty one")]
    EmptyChain,
}
