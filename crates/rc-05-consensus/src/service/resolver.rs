//! # Conflict Resolution
//!
//! Longest-valid-chain rule: adopt the longest peer chain that is strictly
//! longer than ours and passes [`ChainValidator`].

use crate::domain::ChainValidator;
use crate::ports::PeerNetwork;
use futures::future::join_all;
use rc_01_peer_registry::PeerRegistry;
use rc_04_block_production::Ledger;
use shared_types::ChainSnapshot;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Compares the local chain against every registered peer's.
pub struct ConsensusResolver {
    ledger: Arc<Ledger>,
    peers: Arc<PeerRegistry>,
    network: Arc<dyn PeerNetwork>,
    validator: ChainValidator,
}

impl ConsensusResolver {
    /// Validates peer chains with the ledger's own proof-of-work puzzle.
    pub fn new(
        ledger: Arc<Ledger>,
        peers: Arc<PeerRegistry>,
        network: Arc<dyn PeerNetwork>,
    ) -> Self {
        let validator = ChainValidator::new(*ledger.pow());
        Self {
            ledger,
            peers,
            network,
            validator,
        }
    }

    /// Returns true if the local chain was replaced.
    ///
    /// Peer fetches run concurrently with no lock held. Unreachable or
    /// malformed peers are skipped. The final swap re-checks length under
    /// the chain lock, so a block mined meanwhile is never overwritten by a
    /// chain that is no longer longer.
    #[tracing::instrument(skip(self))]
    pub async fn resolve(&self) -> bool {
        let peers = self.peers.peers();
        let local_length = self.ledger.length();
        debug!(peers = peers.len(), local_length, "Resolving against peers");

        let responses = join_all(peers.iter().map(|peer| async move {
            (peer, self.network.fetch_chain(peer).await)
        }))
        .await;

        let mut best: Option<ChainSnapshot> = None;
        let mut max_length = local_length;
        for (peer, response) in responses {
            let snapshot = match response {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!(peer = %peer, error = %e, "Skipping peer");
                    continue;
                }
            };
            if !snapshot.is_consistent() {
                warn!(
                    peer = %peer,
                    length = snapshot.length,
                    blocks = snapshot.chain.len(),
                    "Skipping peer with inconsistent chain length"
                );
                continue;
            }
            if snapshot.length <= max_length {
                debug!(peer = %peer, length = snapshot.length, "Peer chain not longer");
                continue;
            }
            if !self.validator.is_valid(&snapshot.chain) {
                warn!(peer = %peer, length = snapshot.length, "Skipping invalid peer chain");
                continue;
            }
            max_length = snapshot.length;
            best = Some(snapshot);
        }

        let Some(best) = best else {
            debug!("Local chain is authoritative");
            return false;
        };
        match self.ledger.adopt_if_longer(best.chain) {
            Ok(adopted) => {
                if adopted {
                    info!(length = max_length, "Replaced local chain");
                }
                adopted
            }
            Err(e) => {
                error!(error = %e, "Could not adopt peer chain");
                false
            }
        }
    }
}
