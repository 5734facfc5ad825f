//! # Subsystem Container
//!
//! Holds the node's subsystem instances, built in dependency order:
//!
//! ```text
//! Level 0: JsonFileStore                  (rc-02)
//! Level 1: PeerRegistry, RecordPool       (rc-01, rc-03)
//! Level 2: Ledger                         (rc-04)
//! Level 3: HttpPeerClient → AppState      (rc-05, rc-06)
//! ```

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, NetworkConfig, NodeConfig, StorageConfig};
pub use subsystems::SubsystemContainer;
