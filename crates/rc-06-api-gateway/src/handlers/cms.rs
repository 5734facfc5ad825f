//! Report-management endpoints.

use super::{body, listing, query};
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use rc_04_block_production::RecordQuery;
use serde::Deserialize;
use serde_json::{json, Value};
use shared_types::{now_ms, Block, RecordSubmission};

/// `GET /cms/queryInfo`
pub async fn query_info(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "nodeId": state.node_id }))
}

/// `GET /cms/report/query?number=&name=`
pub async fn query_reports(
    State(state): State<AppState>,
    params: Result<Query<RecordQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let filter = query(params)?;
    Ok(Json(listing(&state.ledger.sealed_records(&filter))))
}

/// `POST /cms/report/add`: creates a record owned by this node and
/// broadcasts it to peers.
pub async fn add_report(
    State(state): State<AppState>,
    payload: Result<Json<RecordSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let mut submission = body(payload)?;
    submission.creator = Some(state.node_id.clone());
    submission.timestamp = Some(now_ms());

    state.pool.submit(submission.clone())?;
    state.gossip.broadcast(submission);

    let sealed = state.ledger.sealed_records(&RecordQuery::default());
    Ok((StatusCode::CREATED, Json(listing(&sealed))))
}

/// Pending records, newest first.
fn pending_listing(state: &AppState) -> Value {
    let mut pending = state.pool.pending();
    pending.reverse();
    listing(&pending)
}

/// `GET /cms/confirm/query`
pub async fn query_pending(State(state): State<AppState>) -> Json<Value> {
    Json(pending_listing(&state))
}

#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    pub timestamp: Option<u64>,
    #[serde(rename = "nodeId")]
    pub node_id: Option<String>,
}

/// `POST /cms/confirm/confirm`
pub async fn confirm(
    State(state): State<AppState>,
    payload: Result<Json<ConfirmRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let request = body(payload)?;
    let timestamp = request
        .timestamp
        .ok_or_else(|| ApiError::BadRequest("missing required field: timestamp".into()))?;
    let node_id = request
        .node_id
        .ok_or_else(|| ApiError::BadRequest("missing required field: nodeId".into()))?;

    state.pool.confirm(timestamp, &node_id)?;
    Ok((StatusCode::CREATED, Json(pending_listing(&state))))
}

/// `GET /cms/user/queryInfo`
pub async fn user_info(State(state): State<AppState>) -> Json<Value> {
    let activity = state.ledger.activity(&state.node_id);
    Json(json!({
        "id": state.node_id,
        "mineNum": activity.mined,
        "createNum": activity.created,
        "confirmNum": activity.confirmed,
    }))
}

#[derive(Debug, Deserialize)]
pub struct BlockIndex {
    pub index: u64,
}

/// `GET /cms/user/queryBlock?index=`
pub async fn query_block(
    State(state): State<AppState>,
    params: Result<Query<BlockIndex>, QueryRejection>,
) -> Result<Json<Block>, ApiError> {
    let BlockIndex { index } = query(params)?;
    state
        .ledger
        .block(index)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no block with index {index}")))
}
