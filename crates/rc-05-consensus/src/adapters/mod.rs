//! Adapters implementing the outbound network port.

mod http;

pub use http::HttpPeerClient;
