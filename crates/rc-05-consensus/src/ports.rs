//! # Outbound Ports (Driven Ports)
//!
//! Production: [`crate::HttpPeerClient`]
//! Testing: hand-written mocks

use crate::domain::NetworkError;
use async_trait::async_trait;
use shared_types::{ChainSnapshot, RecordSubmission};

/// Talks to other nodes.
#[async_trait]
pub trait PeerNetwork: Send + Sync {
    /// Fetch a peer's whole chain (`GET {peer}/chain`).
    async fn fetch_chain(&self, peer: &str) -> Result<ChainSnapshot, NetworkError>;

    /// Hand a newly created record to a peer (`POST {peer}/reports/new`).
    async fn send_record(
        &self,
        peer: &str,
        record: &RecordSubmission,
    ) -> Result<(), NetworkError>;
}
