//! A fully wired node.

use crate::container::{NodeConfig, SubsystemContainer};
use crate::identity;
use anyhow::{Context, Result};
use axum::Router;
use rc_06_api_gateway::build_router;
use std::fs;
use std::future::Future;
use tokio::net::TcpListener;
use tracing::info;

/// One Report-Chain node: configuration, identity and subsystems.
pub struct ReportNode {
    config: NodeConfig,
    container: SubsystemContainer,
}

impl ReportNode {
    /// Validates `config`, prepares the data directory, loads or creates
    /// the node identity and opens every subsystem.
    pub fn build(config: NodeConfig) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let data_dir = &config.storage.data_dir;
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;
        let node_id = identity::load_or_create(data_dir).context("Failed to load node identity")?;

        let container = SubsystemContainer::new(&config, node_id)?;
        Ok(Self { config, container })
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn container(&self) -> &SubsystemContainer {
        &self.container
    }

    pub fn node_id(&self) -> &str {
        &self.container.node_id
    }

    /// The node's HTTP router.
    pub fn router(&self) -> Router {
        build_router(self.container.app_state())
    }

    /// Binds the configured address and serves until `shutdown` resolves.
    pub async fn serve(self, shutdown: impl Future<Output = ()> + Send + 'static) -> Result<()> {
        let addr = self.config.listen_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        self.serve_on(listener, shutdown).await
    }

    /// Serves on an already bound listener until `shutdown` resolves.
    pub async fn serve_on(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<()> {
        let local = listener.local_addr().context("Listener has no address")?;
        info!(
            addr = %local,
            node_id = %self.node_id(),
            data_dir = %self.config.storage.data_dir.display(),
            "Node listening"
        );
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server failed")?;
        info!("Node stopped");
        Ok(())
    }
}
