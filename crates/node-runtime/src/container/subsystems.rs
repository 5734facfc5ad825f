//! Subsystem construction.

use super::NodeConfig;
use anyhow::{Context, Result};
use rc_01_peer_registry::PeerRegistry;
use rc_02_ledger_storage::{JsonFileStore, LedgerStore};
use rc_03_record_pool::RecordPool;
use rc_04_block_production::Ledger;
use rc_05_consensus::{HttpPeerClient, PeerNetwork};
use rc_06_api_gateway::AppState;
use shared_types::NodeId;
use std::sync::Arc;
use tracing::info;

/// All subsystems of one node, sharing one store.
pub struct SubsystemContainer {
    pub node_id: NodeId,
    pub store: Arc<dyn LedgerStore>,
    pub peers: Arc<PeerRegistry>,
    pub pool: Arc<RecordPool>,
    pub ledger: Arc<Ledger>,
    pub network: Arc<dyn PeerNetwork>,
}

impl SubsystemContainer {
    /// Opens the data directory and loads every subsystem's state.
    ///
    /// Fails if any stored file exists but is corrupt.
    pub fn new(config: &NodeConfig, node_id: NodeId) -> Result<Self> {
        let store: Arc<dyn LedgerStore> = Arc::new(
            JsonFileStore::open(&config.storage.data_dir).with_context(|| {
                format!(
                    "Failed to open data directory {}",
                    config.storage.data_dir.display()
                )
            })?,
        );

        let peers = Arc::new(PeerRegistry::open(store.clone()).context("Failed to load peer set")?);
        let pool =
            Arc::new(RecordPool::open(store.clone()).context("Failed to load pending records")?);
        let ledger = Arc::new(
            Ledger::open(
                config.mining.clone(),
                node_id.clone(),
                pool.clone(),
                store.clone(),
            )
            .context("Failed to load chain")?,
        );
        let network: Arc<dyn PeerNetwork> = Arc::new(
            HttpPeerClient::new(config.network.peer_timeout())
                .context("Failed to build peer client")?,
        );

        info!(
            node_id = %node_id,
            length = ledger.length(),
            pending = pool.len(),
            peers = peers.len(),
            difficulty = config.mining.difficulty,
            "Subsystems initialized"
        );

        Ok(Self {
            node_id,
            store,
            peers,
            pool,
            ledger,
            network,
        })
    }

    /// Handler state for the HTTP surface.
    pub fn app_state(&self) -> AppState {
        AppState::new(self.ledger.clone(), self.peers.clone(), self.network.clone())
    }
}
