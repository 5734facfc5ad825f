//! # Consensus Subsystem
//!
//! **Subsystem ID:** 5
//!
//! Reconciles this node's chain with its peers by the longest-valid-chain
//! rule, and spreads newly created records to peers.
//!
//! ## Resolution
//!
//! ```text
//! resolve()
//!   ├─ snapshot peer list            (registry lock, brief)
//!   ├─ fetch every peer's /chain     (concurrent, no lock)
//!   ├─ skip unreachable / malformed  (warn, never fatal)
//!   ├─ keep longest chain that is strictly longer than ours
//!   │    and passes ChainValidator
//!   └─ Ledger::adopt_if_longer       (chain lock: re-check + save + swap)
//! ```
//!
//! Equal-length chains never replace the local one.
//!
//! ## Module Structure
//!
//! - `domain/` - [`ChainValidator`], [`NetworkError`]
//! - `ports` - [`PeerNetwork`], the outbound network port
//! - `adapters/` - [`HttpPeerClient`] (reqwest)
//! - `service/` - [`ConsensusResolver`], [`RecordGossip`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::HttpPeerClient;
pub use domain::{ChainValidator, NetworkError};
pub use ports::PeerNetwork;
pub use service::{ConsensusResolver, RecordGossip};
