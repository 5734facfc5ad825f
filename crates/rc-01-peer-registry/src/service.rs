//! # Peer Registry Service
//!
//! The persisted, lock-protected peer set.

use crate::domain::{PeerEndpoint, PeerError};
use parking_lot::RwLock;
use rc_02_ledger_storage::LedgerStore;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Deduplicated set of peer endpoints.
///
/// Every mutation is saved before the lock is released, so the stored set
/// never lags behind what readers observe.
pub struct PeerRegistry {
    peers: RwLock<BTreeSet<String>>,
    store: Arc<dyn LedgerStore>,
}

impl PeerRegistry {
    /// Loads the stored peer set, or starts empty if none was stored.
    ///
    /// # Errors
    /// Fails if the stored set exists but cannot be read.
    pub fn open(store: Arc<dyn LedgerStore>) -> Result<Self, PeerError> {
        let peers = match store.load_peers()? {
            Some(peers) => {
                info!(count = peers.len(), "Loaded peer set");
                peers
            }
            None => {
                debug!("No stored peer set, starting empty");
                BTreeSet::new()
            }
        };
        Ok(Self {
            peers: RwLock::new(peers),
            store,
        })
    }

    /// Adds a peer. Returns `Ok(false)` when it was already known.
    ///
    /// # Errors
    /// `InvalidAddress` for an unusable address; `Storage` if the new set
    /// could not be saved, in which case the set is left unchanged.
    pub fn register(&self, address: &str) -> Result<bool, PeerError> {
        self.register_all(&[address]).map(|added| added == 1)
    }

    /// Adds every address in one step, returning how many were new.
    ///
    /// All addresses are parsed before the set is touched: one unusable
    /// address rejects the whole batch and nothing is registered or saved.
    pub fn register_all<S: AsRef<str>>(&self, addresses: &[S]) -> Result<usize, PeerError> {
        let endpoints = addresses
            .iter()
            .map(|address| PeerEndpoint::parse(address.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut peers = self.peers.write();
        let mut next = peers.clone();
        let added: Vec<&PeerEndpoint> = endpoints
            .iter()
            .filter(|endpoint| next.insert(endpoint.as_str().to_string()))
            .collect();
        if added.is_empty() {
            return Ok(0);
        }

        self.store.save_peers(&next)?;
        *peers = next;

        for endpoint in &added {
            info!(peer = %endpoint, "Registered peer");
        }
        debug!(added = added.len(), total = peers.len(), "Peer set saved");
        Ok(added.len())
    }

    /// Removes a peer. Returns `Ok(false)` when it was not known.
    pub fn unregister(&self, address: &str) -> Result<bool, PeerError> {
        let endpoint = PeerEndpoint::parse(address)?;
        let mut peers = self.peers.write();
        if !peers.contains(endpoint.as_str()) {
            return Ok(false);
        }

        let mut next = peers.clone();
        next.remove(endpoint.as_str());
        self.store.save_peers(&next)?;
        *peers = next;

        info!(peer = %endpoint, total = peers.len(), "Unregistered peer");
        Ok(true)
    }

    /// Snapshot of the known peers, sorted.
    pub fn peers(&self) -> Vec<String> {
        self.peers.read().iter().cloned().collect()
    }

    pub fn contains(&self, address: &str) -> bool {
        PeerEndpoint::parse(address)
            .map(|ep| self.peers.read().contains(ep.as_str()))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.peers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.read().is_empty()
    }
}
