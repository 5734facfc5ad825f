//! Route table.

use crate::handlers::{cms, peer};
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Builds the node's HTTP router.
///
/// | Method | Path | Handler |
/// |--------|------|---------|
/// | GET | `/mine` | [`peer::mine`] |
/// | POST | `/reports/new` | [`peer::new_report`] |
/// | GET | `/chain` | [`peer::chain`] |
/// | POST | `/nodes/register` | [`peer::register_nodes`] |
/// | GET | `/nodes/resolve` | [`peer::resolve`] |
/// | GET | `/cms/queryInfo` | [`cms::query_info`] |
/// | GET | `/cms/report/query` | [`cms::query_reports`] |
/// | POST | `/cms/report/add` | [`cms::add_report`] |
/// | GET | `/cms/confirm/query` | [`cms::query_pending`] |
/// | POST | `/cms/confirm/confirm` | [`cms::confirm`] |
/// | GET | `/cms/user/queryInfo` | [`cms::user_info`] |
/// | GET | `/cms/user/queryBlock` | [`cms::query_block`] |
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/mine", get(peer::mine))
        .route("/reports/new", post(peer::new_report))
        .route("/chain", get(peer::chain))
        .route("/nodes/register", post(peer::register_nodes))
        .route("/nodes/resolve", get(peer::resolve))
        .route("/cms/queryInfo", get(cms::query_info))
        .route("/cms/report/query", get(cms::query_reports))
        .route("/cms/report/add", post(cms::add_report))
        .route("/cms/confirm/query", get(cms::query_pending))
        .route("/cms/confirm/confirm", post(cms::confirm))
        .route("/cms/user/queryInfo", get(cms::user_info))
        .route("/cms/user/queryBlock", get(cms::query_block))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
