//! Node-to-node endpoints.

use super::body;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use shared_types::{ChainSnapshot, RecordSubmission};
use tracing::info;

/// `GET /mine`
pub async fn mine(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let ledger = state.ledger.clone();
    let block = tokio::task::spawn_blocking(move || ledger.mine())
        .await
        .map_err(|e| ApiError::Internal(format!("mining task failed: {e}")))??;

    Ok(Json(json!({
        "message": "New Block Forged",
        "index": block.index,
        "reports": block.records,
        "proof": block.proof,
        "previous_hash": block.previous_hash,
        "timestamp": block.timestamp,
        "miner": block.miner,
    })))
}

/// `POST /reports/new`: a record broadcast by a peer.
pub async fn new_report(
    State(state): State<AppState>,
    payload: Result<Json<RecordSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let submission = body(payload)?;
    state.pool.submit(submission)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "add new transaction success" })),
    ))
}

/// `GET /chain`
pub async fn chain(State(state): State<AppState>) -> Json<ChainSnapshot> {
    Json(state.ledger.snapshot())
}

#[derive(Debug, Deserialize)]
pub struct RegisterNodes {
    #[serde(default)]
    pub nodes: Option<Vec<String>>,
}

/// `POST /nodes/register`
pub async fn register_nodes(
    State(state): State<AppState>,
    payload: Result<Json<RegisterNodes>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let nodes = body(payload)?
        .nodes
        .ok_or_else(|| ApiError::BadRequest("Please supply a valid list of nodes".into()))?;

    let added = state.peers.register_all(&nodes)?;
    info!(submitted = nodes.len(), added, total = state.peers.len(), "Peers registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "New nodes have been added",
            "total_nodes": state.peers.peers(),
        })),
    ))
}

/// `GET /nodes/resolve`
pub async fn resolve(State(state): State<AppState>) -> Json<Value> {
    let replaced = state.resolver.resolve().await;
    let chain = state.ledger.snapshot().chain;
    if replaced {
        Json(json!({ "message": "Our chain was replaced", "new_chain": chain }))
    } else {
        Json(json!({ "message": "Our chain is authoritative", "chain": chain }))
    }
}
