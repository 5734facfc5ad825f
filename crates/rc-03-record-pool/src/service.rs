//! # Record Pool Service
//!
//! Wraps [`PendingSet`] in a lock and saves `temp.json` after every
//! mutation. A mutation becomes visible only after its save succeeds.

use crate::domain::{PendingSet, PoolError, Result};
use parking_lot::Mutex;
use rc_02_ledger_storage::LedgerStore;
use shared_types::{Block, Record, RecordSubmission};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Shared pool of pending records.
pub struct RecordPool {
    pending: Mutex<PendingSet>,
    store: Arc<dyn LedgerStore>,
}

impl RecordPool {
    /// Loads stored pending records, or starts empty if none were stored.
    ///
    /// # Errors
    /// Fails if stored records exist but cannot be read.
    pub fn open(store: Arc<dyn LedgerStore>) -> Result<Self> {
        let pending = match store.load_pending()? {
            Some(records) => {
                let set = PendingSet::from_records(records);
                info!(count = set.len(), "Loaded pending records");
                set
            }
            None => {
                debug!("No stored pending records, starting empty");
                PendingSet::new()
            }
        };
        Ok(Self {
            pending: Mutex::new(pending),
            store,
        })
    }

    /// Validates and adds a submitted record with no confirmations.
    ///
    /// # Errors
    /// - `MissingField` naming the first absent field
    /// - `DuplicateTimestamp` if the timestamp is already pending
    /// - `Storage` if the pool could not be saved (nothing is added)
    pub fn submit(&self, submission: RecordSubmission) -> Result<Record> {
        let record = submission.into_record()?;
        let mut pending = self.pending.lock();

        let mut next = pending.clone();
        next.insert(record.clone())?;
        self.store.save_pending(next.records())?;
        *pending = next;

        debug!(
            timestamp = record.timestamp,
            number = %record.number,
            "Record submitted"
        );
        Ok(record)
    }

    /// Records `node_id`'s confirmation of the pending record at `timestamp`.
    ///
    /// Returns `Ok(false)` when the node had already confirmed it.
    ///
    /// # Errors
    /// `InvalidNode`, `NotFound`, or `Storage`.
    pub fn confirm(&self, timestamp: u64, node_id: &str) -> Result<bool> {
        let mut pending = self.pending.lock();

        let mut next = pending.clone();
        if !next.confirm(timestamp, node_id)? {
            return Ok(false);
        }
        self.store.save_pending(next.records())?;
        *pending = next;

        debug!(timestamp, node = node_id, "Record confirmed");
        Ok(true)
    }

    /// Hands every record with at least `threshold` confirmations to `seal`,
    /// holding the pool lock throughout.
    ///
    /// The records leave the pool only if `seal` succeeds; on error the pool
    /// is unchanged and the error is returned as is. Once sealing succeeded
    /// a failure to save the shrunken pool is logged, not returned: the
    /// records are already durable in the sealed output.
    pub fn drain_eligible_with<T, E>(
        &self,
        threshold: usize,
        seal: impl FnOnce(Vec<Record>) -> std::result::Result<T, E>,
    ) -> std::result::Result<T, E> {
        let mut pending = self.pending.lock();
        let (eligible, remaining) = pending.split_eligible(threshold);
        let drained = eligible.len();

        let sealed = seal(eligible)?;

        if drained > 0 {
            *pending = remaining;
            if let Err(e) = self.store.save_pending(pending.records()) {
                error!(error = %e, "Drained records but could not save pending pool");
            }
            debug!(drained, left = pending.len(), "Drained eligible records");
        }
        Ok(sealed)
    }

    /// Removes and returns every record with at least `threshold`
    /// confirmations, in submission order.
    pub fn drain_eligible(&self, threshold: usize) -> Vec<Record> {
        let drained = self.drain_eligible_with(threshold, Ok::<_, Infallible>);
        match drained {
            Ok(records) => records,
            Err(never) => match never {},
        }
    }

    /// Drops pending records that are already sealed in `chain`.
    ///
    /// Such records are left behind when the pool could not be saved after
    /// a block was sealed. Returns how many were dropped.
    ///
    /// # Errors
    /// `Storage` if the cleaned pool could not be saved (nothing is dropped).
    pub fn discard_sealed(&self, chain: &[Block]) -> Result<usize> {
        let mut pending = self.pending.lock();
        let (next, removed) = pending.without_sealed(chain);
        if removed == 0 {
            return Ok(0);
        }
        self.store.save_pending(next.records())?;
        *pending = next;

        warn!(removed, left = pending.len(), "Dropped pending records already sealed");
        Ok(removed)
    }

    /// Snapshot of pending records in submission order.
    pub fn pending(&self) -> Vec<Record> {
        self.pending.lock().records().to_vec()
    }

    pub fn get(&self, timestamp: u64) -> Option<Record> {
        self.pending.lock().get(timestamp).cloned()
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

impl std::fmt::Debug for RecordPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordPool")
            .field("pending", &self.len())
            .finish()
    }
}
