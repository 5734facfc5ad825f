//! Storage backends implementing [`crate::LedgerStore`].

mod json_file;
mod memory;

pub use json_file::{JsonFileStore, CHAIN_FILE, PEERS_FILE, PENDING_FILE};
pub use memory::MemoryStore;
