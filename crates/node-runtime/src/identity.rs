//! # Node Identity
//!
//! A node's id is generated once and kept in `info.json` (`{"id": "..."}`)
//! in the data directory. It names the node as block miner, as record
//! creator and on the query endpoints.

use serde::{Deserialize, Serialize};
use shared_types::NodeId;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Identity file name.
pub const IDENTITY_FILE: &str = "info.json";

#[derive(Serialize, Deserialize)]
struct IdentityFile {
    id: NodeId,
}

/// Errors loading or creating the node identity.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt identity file {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },
}

/// Fresh id: a v4 UUID as 32 lowercase hex characters.
pub fn generate() -> NodeId {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Loads the id stored in `dir`, generating and storing one if absent.
///
/// # Errors
/// A present but unreadable or empty identity file is an error, never
/// silently replaced.
pub fn load_or_create(dir: &Path) -> Result<NodeId, IdentityError> {
    let path = dir.join(IDENTITY_FILE);
    match fs::read(&path) {
        Ok(bytes) => {
            let file: IdentityFile =
                serde_json::from_slice(&bytes).map_err(|e| IdentityError::Corrupt {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
            if file.id.trim().is_empty() {
                return Err(IdentityError::Corrupt {
                    path,
                    reason: "empty id".into(),
                });
            }
            info!(node_id = %file.id, "Loaded node identity");
            Ok(file.id)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            let id = generate();
            let body = serde_json::to_vec(&IdentityFile { id: id.clone() }).map_err(|e| {
                IdentityError::Corrupt {
                    path: path.clone(),
                    reason: e.to_string(),
                }
            })?;
            fs::write(&path, body).map_err(|source| IdentityError::Io {
                path: path.clone(),
                source,
            })?;
            info!(node_id = %id, "Generated node identity");
            Ok(id)
        }
        Err(source) => Err(IdentityError::Io { path, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generated_id_shape() {
        let id = generate();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_identity_is_stable_across_restarts() {
        let dir = TempDir::new().unwrap();
        let first = load_or_create(dir.path()).unwrap();
        let second = load_or_create(dir.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reads_existing_identity() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(IDENTITY_FILE), r#"{"id": "abc123"}"#).unwrap();
        assert_eq!(load_or_create(dir.path()).unwrap(), "abc123");
    }

    #[test]
    fn test_corrupt_identity_is_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(IDENTITY_FILE), "not json").unwrap();
        assert!(matches!(
            load_or_create(dir.path()),
            Err(IdentityError::Corrupt { .. })
        ));
        // The file is left for the operator to inspect.
        assert_eq!(fs::read_to_string(dir.path().join(IDENTITY_FILE)).unwrap(), "not json");
    }
}
