//! Read-only queries over a sealed chain.

use serde::{Deserialize, Serialize};
use shared_types::{Block, Record};

/// A sealed record together with the index of the block holding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedRecord {
    #[serde(flatten)]
    pub record: Record,
    /// 1-based index of the containing block.
    pub block: u64,
}

/// Filter for sealed-record listings.
///
/// Empty fields count as absent. With both absent every record matches;
/// otherwise a record matches when its `number` OR its `name` is equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecordQuery {
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl RecordQuery {
    fn number(&self) -> Option<&str> {
        self.number.as_deref().filter(|s| !s.is_empty())
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.is_empty())
    }

    pub fn is_unfiltered(&self) -> bool {
        self.number().is_none() && self.name().is_none()
    }

    pub fn matches(&self, record: &Record) -> bool {
        if self.is_unfiltered() {
            return true;
        }
        self.number() == Some(record.number.as_str()) || self.name() == Some(record.name.as_str())
    }
}

/// Per-node counts over the blocks a node mined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeActivity {
    /// Blocks mined by the node.
    pub mined: usize,
    /// Sealed records the node created.
    pub created: usize,
    /// Sealed records the node confirmed.
    pub confirmed: usize,
}

/// Every sealed record matching `query`, newest first.
pub fn sealed_records(chain: &[Block], query: &RecordQuery) -> Vec<SealedRecord> {
    let mut listed: Vec<SealedRecord> = chain
        .iter()
        .flat_map(|block| {
            block.records.iter().map(move |record| SealedRecord {
                record: record.clone(),
                block: block.index,
            })
        })
        .filter(|sealed| query.matches(&sealed.record))
        .collect();
    listed.reverse();
    listed
}

/// Counts `node_id`'s activity over the blocks it mined.
///
/// Creations and confirmations are only counted inside those blocks; a
/// record the node created that another node sealed does not count.
pub fn activity(chain: &[Block], node_id: &str) -> NodeActivity {
    chain
        .iter()
        .filter(|block| block.miner == node_id)
        .fold(NodeActivity::default(), |mut acc, block| {
            acc.mined += 1;
            for record in &block.records {
                if record.creator == node_id {
                    acc.created += 1;
                }
                if record.is_confirmed_by(node_id) {
                    acc.confirmed += 1;
                }
            }
            acc
        })
}
