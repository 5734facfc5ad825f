//! # API Gateway Subsystem
//!
//! **Subsystem ID:** 6
//!
//! The node's HTTP surface, built on axum. Two groups of routes share one
//! [`AppState`]:
//!
//! - **Peer protocol**: `/mine`, `/reports/new`, `/chain`,
//!   `/nodes/register`, `/nodes/resolve`. Field names on these routes are
//!   the ones other nodes already speak.
//! - **CMS**: `/cms/...`, listings and per-node statistics for the
//!   report-management front end.
//!
//! Every error renders as `{"message": "..."}` with a 400, 404 or 500
//! status. Mining runs on the blocking pool so it never stalls the async
//! workers.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
