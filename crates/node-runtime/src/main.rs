//! # Report-Chain Node
//!
//! Entry point of a Report-Chain node.
//!
//! ## Startup Sequence
//!
//! 1. Initialize tracing (`RUST_LOG`, default `info`)
//! 2. Load configuration from `RC_*` environment variables and validate it
//! 3. Load or generate the node identity (`info.json`)
//! 4. Open the data directory and load peers, pending records and chain
//!    (genesis if no chain is stored; abort if a stored file is corrupt)
//! 5. Serve the HTTP surface until Ctrl+C

use anyhow::Result;
use node_runtime::{NodeConfig, ReportNode};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("===========================================");
    info!("  Report-Chain Node v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let config = NodeConfig::from_env();
    let node = ReportNode::build(config)?;

    node.serve(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Could not listen for Ctrl+C, shutting down");
        }
        info!("Initiating graceful shutdown...");
    })
    .await
}
