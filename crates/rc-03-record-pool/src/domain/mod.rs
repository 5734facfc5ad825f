//! Pool domain: the pending set and its errors.

mod errors;
mod pending;

pub use errors::{PoolError, Result};
pub use pending::PendingSet;
