//! # Node Runtime Library
//!
//! Exposes the runtime's building blocks so the binary stays thin and the
//! workspace tests can start real nodes.
//!
//! - `container/` - configuration and subsystem construction
//! - `identity` - persisted node id
//! - `node` - [`ReportNode`]: a fully wired node and its serve loop

pub mod container;
pub mod identity;
pub mod node;

pub use container::{ConfigError, NodeConfig, SubsystemContainer};
pub use node::ReportNode;
