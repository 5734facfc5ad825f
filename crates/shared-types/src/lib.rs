//! # Shared Types Crate
//!
//! This crate contains the ledger entities exchanged between subsystems,
//! persisted by storage, and served to peers.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Block`, `Record` and `ChainSnapshot` are
//!   defined once here, with their wire names fixed by serde attributes.
//! - **Canonical Digest**: `hashing::block_hash` is the only way a block is
//!   hashed. Producers and validators must agree byte for byte, so neither
//!   side rolls its own encoding.
//! - **Typed Boundaries**: loosely shaped submissions (`RecordSubmission`)
//!   are validated into fixed-shape `Record`s before they enter the pool.

pub mod entities;
pub mod errors;
pub mod hashing;

pub use entities::*;
pub use errors::*;
pub use hashing::{block_hash, canonical_block, sha256_hex};
