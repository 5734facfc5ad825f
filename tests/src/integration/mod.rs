//! Cross-subsystem integration tests.

pub mod flows;
pub mod multi_node;
pub mod restart;
