//! Consensus services.

mod gossip;
mod resolver;

pub use gossip::RecordGossip;
pub use resolver::ConsensusResolver;
