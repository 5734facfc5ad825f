//! # Record Pool Subsystem
//!
//! **Subsystem ID:** 3
//!
//! Holds inspection-report records awaiting inclusion in a block and tracks
//! which nodes have confirmed each one.
//!
//! ## Lifecycle
//!
//! ```text
//! submit ──→ [PENDING, 0 confirmations] ──confirm──→ [PENDING, n ≥ quorum]
//!                                                          │
//!                                       drain_eligible ────┘──→ sealed block
//! ```
//!
//! | Stage | Method | Effect |
//! |-------|--------|--------|
//! | Submit | [`RecordPool::submit`] | Validate fields, reject duplicate timestamp |
//! | Confirm | [`RecordPool::confirm`] | Add a distinct node to `confirm` |
//! | Drain | [`RecordPool::drain_eligible_with`] | Hand eligible records to the sealer; remove them only if sealing succeeds |
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Timestamps are unique among pending records | [`PendingSet::insert`] |
//! | Confirmations are distinct and only grow | [`PendingSet::confirm`] |
//! | Drained records keep submission order | [`PendingSet::split_eligible`] |
//!
//! All three mutations run under one lock, so a confirmation can never land
//! on a record that is being drained.

pub mod domain;
pub mod service;

pub use domain::{PendingSet, PoolError, Result};
pub use service::RecordPool;
