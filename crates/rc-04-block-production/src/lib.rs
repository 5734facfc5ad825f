//! # Block Production Subsystem
//!
//! **Subsystem ID:** 4
//!
//! Owns the node's chain: proof-of-work search and verification, block
//! construction from quorum-confirmed records, and chain replacement.
//!
//! ## Module Structure
//!
//! ```text
//! config.rs           - MiningConfig (difficulty, quorum, genesis seed)
//! domain/pow.rs       - ProofOfWork: search + is_valid, one predicate
//! domain/genesis.rs   - genesis block
//! domain/queries.rs   - sealed-record listing, per-node activity
//! service.rs          - Ledger: locked chain, append/replace, persistence
//! ```
//!
//! ## Mining Flow
//!
//! ```text
//! mine()
//!   ├─ read tip proof             (chain lock, brief)
//!   ├─ ProofOfWork::search        (no lock)
//!   └─ new block                  (chain lock → pool lock)
//!        ├─ drain eligible records
//!        ├─ link to hash(tip), save chain
//!        └─ on save failure: discard block, records stay pending
//! ```

pub mod config;
pub mod domain;
mod error;
pub mod service;

pub use config::{MiningConfig, DEFAULT_DIFFICULTY, DEFAULT_QUORUM, GENESIS_PROOF};
pub use domain::{NodeActivity, ProofOfWork, RecordQuery, SealedRecord};
pub use error::{LedgerError, Result};
pub use service::Ledger;
