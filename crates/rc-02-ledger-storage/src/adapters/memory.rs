//! In-memory backend for tests.

use crate::error::{Result, StorageError};
use crate::ports::LedgerStore;
use parking_lot::Mutex;
use shared_types::{Block, ChainSnapshot, Record};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Default)]
struct Contents {
    chain: Option<ChainSnapshot>,
    pending: Option<Vec<Record>>,
    peers: Option<BTreeSet<String>>,
}

/// Keeps ledger state in process memory.
///
/// `fail_saves(true)` makes every save return
/// [`StorageError::Unavailable`] until switched off again;
/// `fail_pending_saves(true)` does the same for `save_pending` alone.
#[derive(Default)]
pub struct MemoryStore {
    contents: Mutex<Contents>,
    failing: AtomicBool,
    failing_pending: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles failure injection for saves.
    pub fn fail_saves(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Toggles failure injection for pending-record saves only.
    pub fn fail_pending_saves(&self, failing: bool) {
        self.failing_pending.store(failing, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// The chain as last saved.
    pub fn stored_chain(&self) -> Option<ChainSnapshot> {
        self.contents.lock().chain.clone()
    }

    /// The pending records as last saved.
    pub fn stored_pending(&self) -> Option<Vec<Record>> {
        self.contents.lock().pending.clone()
    }

    /// The peer set as last saved.
    pub fn stored_peers(&self) -> Option<BTreeSet<String>> {
        self.contents.lock().peers.clone()
    }

    fn check_writable(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("save failure injected".into()));
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl LedgerStore for MemoryStore {
    fn load_chain(&self) -> Result<Option<ChainSnapshot>> {
        Ok(self.stored_chain())
    }

    fn save_chain(&self, chain: &[Block], length: u64) -> Result<()> {
        self.check_writable()?;
        self.contents.lock().chain = Some(ChainSnapshot {
            chain: chain.to_vec(),
            length,
        });
        Ok(())
    }

    fn load_pending(&self) -> Result<Option<Vec<Record>>> {
        Ok(self.stored_pending())
    }

    fn save_pending(&self, records: &[Record]) -> Result<()> {
        if self.failing_pending.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("pending save failure injected".into()));
        }
        self.check_writable()?;
        self.contents.lock().pending = Some(records.to_vec());
        Ok(())
    }

    fn load_peers(&self) -> Result<Option<BTreeSet<String>>> {
        Ok(self.stored_peers())
    }

    fn save_peers(&self, peers: &BTreeSet<String>) -> Result<()> {
        self.check_writable()?;
        self.contents.lock().peers = Some(peers.clone());
        Ok(())
    }
}
