//! Domain Errors for the Peer Registry

use rc_02_ledger_storage::StorageError;
use std::fmt;

/// Errors that can occur while maintaining the peer set
#[derive(Debug)]
pub enum PeerError {
    /// Address has no usable `host:port` authority
    InvalidAddress(String),
    /// Peer set could not be persisted
    Storage(StorageError),
}

impl fmt::Display for PeerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAddress(addr) => write!(f, "Invalid peer address: {:?}", addr),
            Self::Storage(e) => write!(f, "Peer set not persisted: {}", e),
        }
    }
}

impl std::error::Error for PeerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(e) => Some(e),
            Self::InvalidAddress(_) => None,
        }
    }
}

impl From<StorageError> for PeerError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}
