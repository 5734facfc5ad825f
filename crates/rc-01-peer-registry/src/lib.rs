//! # Peer Registry Subsystem
//!
//! **Subsystem ID:** 1
//!
//! Keeps the set of peer endpoints (`host:port`) this node reconciles with.
//! The set is deduplicated, carries no ordering, and is persisted through
//! the ledger store after every mutation.
//!
//! ## Architecture
//!
//! - **Domain Layer:** endpoint parsing ([`PeerEndpoint`]) and errors
//! - **Service Layer:** [`PeerRegistry`], the locked, persisted peer set
//!
//! The registry has its own lock, independent of the chain and pool locks.
//! Consensus reads it through [`PeerRegistry::peers`], a snapshot.
//!
//! ## Example
//!
//! ```rust
//! use rc_01_peer_registry::PeerRegistry;
//! use rc_02_ledger_storage::MemoryStore;
//! use std::sync::Arc;
//!
//! let registry = PeerRegistry::open(Arc::new(MemoryStore::new())).unwrap();
//! registry.register("http://192.168.0.5:5000").unwrap();
//! registry.register("192.168.0.5:5000").unwrap();
//! assert_eq!(registry.peers(), vec!["192.168.0.5:5000".to_string()]);
//! ```

pub mod domain;
pub mod service;

pub use domain::{PeerEndpoint, PeerError};
pub use service::PeerRegistry;
