//! Shared handler state.

use rc_01_peer_registry::PeerRegistry;
use rc_03_record_pool::RecordPool;
use rc_04_block_production::Ledger;
use rc_05_consensus::{ConsensusResolver, PeerNetwork, RecordGossip};
use shared_types::NodeId;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub node_id: NodeId,
    pub ledger: Arc<Ledger>,
    pub pool: Arc<RecordPool>,
    pub peers: Arc<PeerRegistry>,
    pub resolver: Arc<ConsensusResolver>,
    pub gossip: RecordGossip,
}

impl AppState {
    /// Wires resolver and gossip over `network`. The node id is the
    /// ledger's miner.
    pub fn new(
        ledger: Arc<Ledger>,
        peers: Arc<PeerRegistry>,
        network: Arc<dyn PeerNetwork>,
    ) -> Self {
        let resolver = ConsensusResolver::new(ledger.clone(), peers.clone(), network.clone());
        Self {
            node_id: ledger.miner().to_string(),
            pool: ledger.pool().clone(),
            gossip: RecordGossip::new(peers.clone(), network),
            resolver: Arc::new(resolver),
            ledger,
            peers,
        }
    }
}
