//! # Pending Set
//!
//! The in-memory ordered collection of pending records. Pure data structure:
//! no locking and no persistence, both are the service's job.

use super::errors::{PoolError, Result};
use shared_types::{Block, Record};
use std::collections::HashSet;
use tracing::warn;

/// Pending records in submission order, keyed by `timestamp`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingSet {
    records: Vec<Record>,
}

impl PendingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from stored records, keeping the first of any records
    /// that share a timestamp.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut set = Self::new();
        for record in records {
            let (timestamp, number) = (record.timestamp, record.number.clone());
            if let Err(e) = set.insert(record) {
                warn!(timestamp, number = %number, error = %e, "Dropping stored duplicate");
            }
        }
        set
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, timestamp: u64) -> Option<&Record> {
        self.records.iter().find(|r| r.timestamp == timestamp)
    }

    /// Appends a record.
    ///
    /// # Errors
    /// `DuplicateTimestamp` if a pending record already has its timestamp.
    pub fn insert(&mut self, record: Record) -> Result<()> {
        if self.get(record.timestamp).is_some() {
            return Err(PoolError::DuplicateTimestamp(record.timestamp));
        }
        self.records.push(record);
        Ok(())
    }

    /// Adds `node_id` to the record's confirmations.
    ///
    /// Returns `Ok(false)` if the node had already confirmed it.
    ///
    /// # Errors
    /// - `InvalidNode` for an empty node id
    /// - `NotFound` if no pending record has `timestamp`
    pub fn confirm(&mut self, timestamp: u64, node_id: &str) -> Result<bool> {
        if node_id.trim().is_empty() {
            return Err(PoolError::InvalidNode);
        }
        let record = self
            .records
            .iter_mut()
            .find(|r| r.timestamp == timestamp)
            .ok_or(PoolError::NotFound(timestamp))?;
        Ok(record.add_confirmation(node_id))
    }

    /// Splits into `(eligible, remaining)` without modifying `self`.
    ///
    /// A record is eligible once it has at least `threshold` confirmations.
    /// Both halves keep submission order.
    pub fn split_eligible(&self, threshold: usize) -> (Vec<Record>, PendingSet) {
        let (eligible, remaining): (Vec<Record>, Vec<Record>) = self
            .records
            .iter()
            .cloned()
            .partition(|r| r.confirmation_count() >= threshold);
        (eligible, PendingSet { records: remaining })
    }

    /// Copy of the set without the records already sealed somewhere in
    /// `chain`, together with the number removed.
    ///
    /// A sealed record is recognised by its timestamp and creator.
    pub fn without_sealed(&self, chain: &[Block]) -> (PendingSet, usize) {
        let sealed: HashSet<(u64, &str)> = chain
            .iter()
            .flat_map(|block| &block.records)
            .map(|r| (r.timestamp, r.creator.as_str()))
            .collect();
        let records: Vec<Record> = self
            .records
            .iter()
            .filter(|r| !sealed.contains(&(r.timestamp, r.creator.as_str())))
            .cloned()
            .collect();
        let removed = self.records.len() - records.len();
        (PendingSet { records }, removed)
    }
}
