//! Domain layer for the peer registry.

mod endpoint;
mod errors;

pub use endpoint::PeerEndpoint;
pub use errors::PeerError;
