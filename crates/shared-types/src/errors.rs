//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// A record submission lacked one of its required fields.
///
/// Carries the wire name of the first missing field, in the order the
/// fields are listed on the submission surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required field: {0}")]
pub struct MissingField(pub &'static str);
