//! Peer communication errors.
//!
//! None of these reach the caller of `resolve()`: a failing peer is logged
//! and skipped.

use thiserror::Error;

/// Why a peer exchange failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// Connection refused, DNS failure or timeout
    #[error("peer {peer} unreachable: {reason}")]
    Unreachable { peer: String, reason: String },

    /// Peer answered with a non-success status
    #[error("peer {peer} answered with status {status}")]
    Status { peer: String, status: u16 },

    /// Peer answered with a body that is not a usable chain
    #[error("peer {peer} sent a malformed response: {reason}")]
    Malformed { peer: String, reason: String },

    /// The HTTP client itself could not be set up
    #[error("HTTP client error: {0}")]
    Client(String),
}
