//! Best-effort record broadcast.

use crate::ports::PeerNetwork;
use futures::future::join_all;
use rc_01_peer_registry::PeerRegistry;
use shared_types::RecordSubmission;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Sends newly created records to every registered peer.
///
/// Fire-and-forget: no retries, failures are logged at `debug` and dropped.
#[derive(Clone)]
pub struct RecordGossip {
    peers: Arc<PeerRegistry>,
    network: Arc<dyn PeerNetwork>,
}

impl RecordGossip {
    pub fn new(peers: Arc<PeerRegistry>, network: Arc<dyn PeerNetwork>) -> Self {
        Self { peers, network }
    }

    /// Spawns the broadcast and returns at once. The handle may be dropped.
    pub fn broadcast(&self, record: RecordSubmission) -> JoinHandle<()> {
        let peers = self.peers.peers();
        let network = self.network.clone();
        tokio::spawn(async move {
            let sends = peers.iter().map(|peer| {
                let network = &network;
                let record = &record;
                async move { (peer, network.send_record(peer, record).await) }
            });
            for (peer, result) in join_all(sends).await {
                if let Err(e) = result {
                    debug!(peer = %peer, error = %e, "Record broadcast failed");
                }
            }
        })
    }
}
