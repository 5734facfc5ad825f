//! # Report-Chain Test Suite
//!
//! Flows that cross subsystem boundaries.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs       # one node, in process: submit → confirm → mine
//!     ├── restart.rs     # state reloaded from the data directory
//!     └── multi_node.rs  # real nodes over HTTP: resolve, gossip
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p rc-tests
//! cargo test -p rc-tests integration::multi_node::
//! ```

pub mod integration;
