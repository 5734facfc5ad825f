//! HTTP peer client.

use crate::domain::NetworkError;
use crate::ports::PeerNetwork;
use async_trait::async_trait;
use reqwest::Client;
use shared_types::{ChainSnapshot, RecordSubmission};
use std::time::Duration;

/// [`PeerNetwork`] over plain HTTP, one shared connection pool.
#[derive(Debug, Clone)]
pub struct HttpPeerClient {
    client: Client,
}

impl HttpPeerClient {
    /// Builds a client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, NetworkError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NetworkError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    fn unreachable(peer: &str, e: reqwest::Error) -> NetworkError {
        NetworkError::Unreachable {
            peer: peer.to_string(),
            reason: e.to_string(),
        }
    }

    fn check_status(peer: &str, response: &reqwest::Response) -> Result<(), NetworkError> {
        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status {
                peer: peer.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PeerNetwork for HttpPeerClient {
    async fn fetch_chain(&self, peer: &str) -> Result<ChainSnapshot, NetworkError> {
        let response = self
            .client
            .get(format!("http://{peer}/chain"))
            .send()
            .await
            .map_err(|e| Self::unreachable(peer, e))?;
        Self::check_status(peer, &response)?;

        let snapshot: ChainSnapshot =
            response
                .json()
                .await
                .map_err(|e| NetworkError::Malformed {
                    peer: peer.to_string(),
                    reason: e.to_string(),
                })?;
        if !snapshot.is_consistent() {
            return Err(NetworkError::Malformed {
                peer: peer.to_string(),
                reason: format!(
                    "length {} but {} blocks",
                    snapshot.length,
                    snapshot.chain.len()
                ),
            });
        }
        Ok(snapshot)
    }

    async fn send_record(
        &self,
        peer: &str,
        record: &RecordSubmission,
    ) -> Result<(), NetworkError> {
        let response = self
            .client
            .post(format!("http://{peer}/reports/new"))
            .json(record)
            .send()
            .await
            .map_err(|e| Self::unreachable(peer, e))?;
        Self::check_status(peer, &response)
    }
}
