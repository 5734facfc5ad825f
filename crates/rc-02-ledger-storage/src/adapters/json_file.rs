//! JSON-file backend.
//!
//! Keeps the reference node's file layout so an existing data directory
//! can be picked up unchanged:
//!
//! | File | Shape |
//! |------|-------|
//! | `data.json` | `{"chain": [...], "length": n}` |
//! | `temp.json` | `{"temp": [...]}` |
//! | `nodes.json` | `{"nodes": [...]}` |

use crate::error::{Result, StorageError};
use crate::ports::LedgerStore;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared_types::{Block, ChainSnapshot, Record};
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

/// Chain file name.
pub const CHAIN_FILE: &str = "data.json";
/// Pending records file name.
pub const PENDING_FILE: &str = "temp.json";
/// Peer set file name.
pub const PEERS_FILE: &str = "nodes.json";

#[derive(Serialize)]
struct ChainFileRef<'a> {
    chain: &'a [Block],
    length: u64,
}

#[derive(Serialize, Deserialize)]
struct PendingFile {
    temp: Vec<Record>,
}

#[derive(Serialize, Deserialize)]
struct PeersFile {
    nodes: Vec<String>,
}

/// Stores ledger state as JSON documents in one directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens (creating if needed) the data directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    fn read<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.dir.join(name);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} not present", path.display());
                return Ok(None);
            }
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StorageError::Corrupt {
                path,
                reason: e.to_string(),
            })
    }

    fn write<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.dir.join(name);
        let tmp = self.dir.join(format!("{name}.tmp"));
        let bytes =
            serde_json::to_vec(value).map_err(|e| StorageError::Serialize(e.to_string()))?;
        fs::write(&tmp, bytes).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StorageError::Io { path, source })
    }
}

impl LedgerStore for JsonFileStore {
    fn load_chain(&self) -> Result<Option<ChainSnapshot>> {
        let Some(snapshot) = self.read::<ChainSnapshot>(CHAIN_FILE)? else {
            return Ok(None);
        };
        let path = self.dir.join(CHAIN_FILE);
        if snapshot.chain.is_empty() {
            return Err(StorageError::Corrupt {
                path,
                reason: "chain has no genesis block".into(),
            });
        }
        if !snapshot.is_consistent() {
            return Err(StorageError::Corrupt {
                path,
                reason: format!(
                    "length {} does not match {} stored blocks",
                    snapshot.length,
                    snapshot.chain.len()
                ),
            });
        }
        Ok(Some(snapshot))
    }

    fn save_chain(&self, chain: &[Block], length: u64) -> Result<()> {
        self.write(CHAIN_FILE, &ChainFileRef { chain, length })
    }

    fn load_pending(&self) -> Result<Option<Vec<Record>>> {
        Ok(self.read::<PendingFile>(PENDING_FILE)?.map(|f| f.temp))
    }

    fn save_pending(&self, records: &[Record]) -> Result<()> {
        self.write(
            PENDING_FILE,
            &PendingFile {
                temp: records.to_vec(),
            },
        )
    }

    fn load_peers(&self) -> Result<Option<BTreeSet<String>>> {
        Ok(self
            .read::<PeersFile>(PEERS_FILE)?
            .map(|f| f.nodes.into_iter().collect()))
    }

    fn save_peers(&self, peers: &BTreeSet<String>) -> Result<()> {
        self.write(
            PEERS_FILE,
            &PeersFile {
                nodes: peers.iter().cloned().collect(),
            },
        )
    }
}
