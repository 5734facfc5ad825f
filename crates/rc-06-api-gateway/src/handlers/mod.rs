//! Request handlers.
//!
//! - `peer` - the node-to-node protocol: mining, chain exchange, peers
//! - `cms` - the report-management surface used by the front end

pub mod cms;
pub mod peer;

use crate::error::ApiError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Query};
use serde::Serialize;
use serde_json::{json, Value};

/// Page size reported alongside every listing.
pub const PAGE_SIZE: usize = 10;

/// `{list, pagination: {total, pageSize}}`
pub fn listing<T: Serialize>(list: &[T]) -> Value {
    json!({
        "list": list,
        "pagination": {
            "total": list.len(),
            "pageSize": PAGE_SIZE,
        }
    })
}

/// Unwraps a JSON body, turning extractor rejections into `{message}` 400s.
pub fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

/// Unwraps query parameters the same way.
pub fn query<T>(params: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    params
        .map(|Query(value)| value)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}
