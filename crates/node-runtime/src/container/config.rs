//! # Node Configuration
//!
//! Defaults overridden from `RC_*` environment variables at startup.
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `RC_HOST` | `network.host` | `0.0.0.0` |
//! | `RC_PORT` | `network.port` | `5000` |
//! | `RC_PEER_TIMEOUT_SECS` | `network.peer_timeout_secs` | `5` |
//! | `RC_DATA_DIR` | `storage.data_dir` | `./data` |
//! | `RC_DIFFICULTY` | `mining.difficulty` | `4` |
//! | `RC_QUORUM` | `mining.quorum` | `1` |

use rc_04_block_production::MiningConfig;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Network configuration.
    pub network: NetworkConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Mining/Block Production configuration.
    pub mining: MiningConfig,
}

impl NodeConfig {
    /// Defaults overridden from the process environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Applies `RC_*` overrides from `lookup`. Unparseable values are
    /// logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("RC_HOST") {
            self.network.host = host;
        }
        override_parsed(&lookup, "RC_PORT", &mut self.network.port);
        override_parsed(
            &lookup,
            "RC_PEER_TIMEOUT_SECS",
            &mut self.network.peer_timeout_secs,
        );
        if let Some(dir) = lookup("RC_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }
        override_parsed(&lookup, "RC_DIFFICULTY", &mut self.mining.difficulty);
        override_parsed(&lookup, "RC_QUORUM", &mut self.mining.quorum);
    }

    /// Rejects settings the node cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=64).contains(&self.mining.difficulty) {
            return Err(ConfigError::InvalidDifficulty(self.mining.difficulty));
        }
        if self.mining.quorum == 0 {
            return Err(ConfigError::ZeroQuorum);
        }
        if self.network.peer_timeout_secs == 0 {
            return Err(ConfigError::ZeroPeerTimeout);
        }
        Ok(())
    }

    /// `host:port` to bind.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.network.host, self.network.port)
    }
}

fn override_parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    target: &mut T,
) {
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => {
            *target = value;
            info!(key, value = %raw, "Configuration override");
        }
        Err(_) => warn!(key, value = %raw, "Ignoring unparseable override"),
    }
}

/// Configuration errors.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Difficulty outside 1..=64 hex digits.
    InvalidDifficulty(usize),
    /// A quorum of zero would seal unconfirmed records.
    ZeroQuorum,
    /// Peer requests need a timeout.
    ZeroPeerTimeout,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidDifficulty(d) => {
                write!(f, "RC_DIFFICULTY must be between 1 and 64, got {d}")
            }
            ConfigError::ZeroQuorum => write!(f, "RC_QUORUM must be at least 1"),
            ConfigError::ZeroPeerTimeout => {
                write!(f, "RC_PEER_TIMEOUT_SECS must be at least 1")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Interface to listen on.
    pub host: String,
    /// HTTP listening port.
    pub port: u16,
    /// Per-request timeout when talking to peers.
    pub peer_timeout_secs: u64,
}

impl NetworkConfig {
    pub fn peer_timeout(&self) -> Duration {
        Duration::from_secs(self.peer_timeout_secs)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            peer_timeout_secs: 5,
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding `data.json`, `temp.json`, `nodes.json`, `info.json`.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn overridden(vars: &[(&str, &str)]) -> NodeConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut config = NodeConfig::default();
        config.apply_overrides(|key| vars.get(key).cloned());
        config
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = NodeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.listen_addr(), "0.0.0.0:5000");
        assert_eq!(config.mining.difficulty, 4);
        assert_eq!(config.mining.quorum, 1);
        assert_eq!(config.mining.genesis_proof, 100);
    }

    #[test]
    fn test_overrides() {
        let config = overridden(&[
            ("RC_HOST", "127.0.0.1"),
            ("RC_PORT", "5001"),
            ("RC_DATA_DIR", "/tmp/node-b"),
            ("RC_DIFFICULTY", "3"),
            ("RC_QUORUM", "2"),
            ("RC_PEER_TIMEOUT_SECS", "9"),
        ]);
        assert_eq!(config.listen_addr(), "127.0.0.1:5001");
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/node-b"));
        assert_eq!(config.mining.difficulty, 3);
        assert_eq!(config.mining.quorum, 2);
        assert_eq!(config.network.peer_timeout(), Duration::from_secs(9));
    }

    #[test]
    fn test_unparseable_override_keeps_default() {
        let config = overridden(&[("RC_PORT", "fifty"), ("RC_DIFFICULTY", "-1")]);
        assert_eq!(config.network.port, 5000);
        assert_eq!(config.mining.difficulty, 4);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = overridden(&[("RC_DIFFICULTY", "65")]);
        assert_eq!(config.validate(), Err(ConfigError::InvalidDifficulty(65)));
        let config = overridden(&[("RC_DIFFICULTY", "0")]);
        assert_eq!(config.validate(), Err(ConfigError::InvalidDifficulty(0)));
        let config = overridden(&[("RC_QUORUM", "0")]);
        assert_eq!(config.validate(), Err(ConfigError::ZeroQuorum));
    }
}
