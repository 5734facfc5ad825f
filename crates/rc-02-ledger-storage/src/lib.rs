//! # Report Chain - Ledger Storage (Subsystem 2)
//!
//! Persistence collaborator for the ledger engine. The engine never touches
//! files directly; it talks to a [`LedgerStore`] and treats every successful
//! save as the durability point of the mutation that preceded it.
//!
//! ## Load Outcomes
//!
//! Every `load_*` call distinguishes three cases:
//!
//! | Result | Meaning | Caller action |
//! |--------|---------|---------------|
//! | `Ok(Some(v))` | data present and well-formed | use it |
//! | `Ok(None)` | nothing stored yet | initialise fresh state |
//! | `Err(StorageError::Corrupt)` | data present but unreadable | fail loudly |
//!
//! A corrupt file is never silently replaced by fresh state, so an existing
//! chain cannot be lost to a parse error.
//!
//! ## Backends
//!
//! - [`JsonFileStore`]: `data.json`, `temp.json`, `nodes.json` in a data
//!   directory, written atomically (temp file + rename).
//! - [`MemoryStore`]: in-process backend for tests, with failure injection.

pub mod adapters;
mod error;
pub mod ports;

pub use adapters::{JsonFileStore, MemoryStore};
pub use error::{Result, StorageError};
pub use ports::LedgerStore;
