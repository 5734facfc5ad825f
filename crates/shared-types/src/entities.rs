//! # Core Domain Entities
//!
//! Defines the ledger entities and their wire shapes.
//!
//! ## Clusters
//!
//! - **Chain**: `Block`, `ChainSnapshot`
//! - **Reports**: `Record`, `RecordSubmission`
//! - **Networking**: `NodeId`
//!
//! Field names on the wire (and in the data files) follow the reference
//! node: a block's records travel as `reports`, a record's confirmations as
//! `confirm`, and the organisation fields as `sjCompany` / `wtCompany`.

use crate::errors::MissingField;
use serde::{Deserialize, Serialize};

/// Identifier of a node (32 lowercase hex characters for generated ids).
pub type NodeId = String;

/// Hex-encoded SHA-256 digest of a block.
pub type BlockHash = String;

/// `previous_hash` carried by every genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

// =============================================================================
// CLUSTER A: REPORTS
// =============================================================================

/// An inspection-report record.
///
/// While pending, `confirmations` grows as distinct nodes endorse the
/// record. Once sealed into a block the record is an immutable copy.
/// `timestamp` is the record's key inside the pending pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Report number.
    pub number: String,
    /// Report name.
    pub name: String,
    /// Organisation that requested the inspection.
    #[serde(rename = "sjCompany")]
    pub requester_company: String,
    /// Organisation the report is issued to.
    #[serde(rename = "wtCompany")]
    pub recipient_company: String,
    /// Report kind.
    pub kind: String,
    /// Reference to the stored report document.
    #[serde(rename = "filePath")]
    pub file_path: String,
    /// Node that created the record.
    pub creator: NodeId,
    /// Creation time in milliseconds; unique among pending records.
    pub timestamp: u64,
    /// Distinct nodes that endorsed the record, in arrival order.
    #[serde(rename = "confirm", default)]
    pub confirmations: Vec<NodeId>,
}

impl Record {
    /// Number of distinct confirming nodes.
    pub fn confirmation_count(&self) -> usize {
        self.confirmations.len()
    }

    /// Whether `node` has already endorsed this record.
    pub fn is_confirmed_by(&self, node: &str) -> bool {
        self.confirmations.iter().any(|n| n == node)
    }

    /// Adds `node` to the confirmation set. Returns false if it was present.
    pub fn add_confirmation(&mut self, node: &str) -> bool {
        if self.is_confirmed_by(node) {
            return false;
        }
        self.confirmations.push(node.to_string());
        true
    }
}

/// A record as submitted over the wire, before validation.
///
/// Every field is optional so that a missing one surfaces as a
/// [`MissingField`] instead of a decoding failure. The creator travels as
/// `nodeId` between nodes; `creator` is accepted as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "sjCompany", default, skip_serializing_if = "Option::is_none")]
    pub requester_company: Option<String>,
    #[serde(rename = "wtCompany", default, skip_serializing_if = "Option::is_none")]
    pub recipient_company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(rename = "filePath", default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(
        rename = "nodeId",
        alias = "creator",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub creator: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

impl RecordSubmission {
    /// Validates the submission into a pending record with no confirmations.
    ///
    /// # Errors
    /// Returns the first absent field, in wire order.
    pub fn into_record(self) -> Result<Record, MissingField> {
        Ok(Record {
            number: self.number.ok_or(MissingField("number"))?,
            name: self.name.ok_or(MissingField("name"))?,
            requester_company: self.requester_company.ok_or(MissingField("sjCompany"))?,
            recipient_company: self.recipient_company.ok_or(MissingField("wtCompany"))?,
            kind: self.kind.ok_or(MissingField("kind"))?,
            file_path: self.file_path.ok_or(MissingField("filePath"))?,
            creator: self.creator.ok_or(MissingField("nodeId"))?,
            timestamp: self.timestamp.ok_or(MissingField("timestamp"))?,
            confirmations: Vec::new(),
        })
    }
}

impl From<&Record> for RecordSubmission {
    fn from(record: &Record) -> Self {
        Self {
            number: Some(record.number.clone()),
            name: Some(record.name.clone()),
            requester_company: Some(record.requester_company.clone()),
            recipient_company: Some(record.recipient_company.clone()),
            kind: Some(record.kind.clone()),
            file_path: Some(record.file_path.clone()),
            creator: Some(record.creator.clone()),
            timestamp: Some(record.timestamp),
        }
    }
}

// =============================================================================
// CLUSTER B: THE CHAIN
// =============================================================================

/// A sealed block.
///
/// `index` is 1-based and contiguous; `previous_hash` is the digest of the
/// preceding block, or [`GENESIS_PREVIOUS_HASH`] for the genesis block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the chain, starting at 1.
    pub index: u64,
    /// Sealing time in milliseconds.
    pub timestamp: u64,
    /// Records sealed into this block.
    #[serde(rename = "reports", default)]
    pub records: Vec<Record>,
    /// Proof-of-work nonce against the previous block's proof.
    pub proof: u64,
    /// Digest of the preceding block.
    pub previous_hash: BlockHash,
    /// Node that produced the block.
    pub miner: NodeId,
}

impl Block {
    /// Canonical digest of this block.
    pub fn hash(&self) -> BlockHash {
        crate::hashing::block_hash(self)
    }

    /// Whether this is the first block of a chain.
    pub fn is_genesis(&self) -> bool {
        self.index == 1
    }
}

/// A chain together with its reported length, as stored and as served to
/// peers on `GET /chain`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub chain: Vec<Block>,
    pub length: u64,
}

impl ChainSnapshot {
    /// Wraps a chain, deriving its length.
    pub fn new(chain: Vec<Block>) -> Self {
        let length = chain.len() as u64;
        Self { chain, length }
    }

    /// Whether the reported length matches the number of blocks.
    pub fn is_consistent(&self) -> bool {
        self.length == self.chain.len() as u64
    }
}
