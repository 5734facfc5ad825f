//! Peer endpoint parsing.

use super::PeerError;
use std::fmt;
use url::Url;

/// A peer's network authority, `host:port` (or bare `host`).
///
/// Built from either a URL (`http://10.0.0.5:5000/anything`) or the
/// authority itself (`10.0.0.5:5000`); only the authority is kept.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeerEndpoint(String);

impl PeerEndpoint {
    /// Parses an address into its authority.
    ///
    /// Addresses with a scheme go through the URL parser; userinfo is
    /// rejected and a port equal to the scheme's default is dropped.
    pub fn parse(address: &str) -> Result<Self, PeerError> {
        let invalid = || PeerError::InvalidAddress(address.to_string());
        let trimmed = address.trim();

        let authority = if trimmed.contains("://") {
            let url = Url::parse(trimmed).map_err(|_| invalid())?;
            if !url.username().is_empty() || url.password().is_some() {
                return Err(invalid());
            }
            let host = url
                .host_str()
                .filter(|host| !host.is_empty())
                .ok_or_else(invalid)?;
            match url.port() {
                Some(port) => format!("{host}:{port}"),
                None => host.to_string(),
            }
        } else {
            bare_authority(trimmed).ok_or_else(invalid)?.to_string()
        };
        Ok(Self(authority))
    }

    /// The `host:port` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `host:port` given without a scheme, cut at any path, query or fragment.
fn bare_authority(address: &str) -> Option<&str> {
    let authority = address
        .split(|c| matches!(c, '/' | '?' | '#'))
        .next()
        .unwrap_or_default();
    let unusable = authority.is_empty()
        || authority.starts_with(':')
        || authority.contains('@')
        || authority.chars().any(char::is_whitespace);
    (!unusable).then_some(authority)
}

impl fmt::Display for PeerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
