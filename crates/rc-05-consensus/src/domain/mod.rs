//! Consensus domain.

mod error;
mod validator;

pub use error::NetworkError;
pub use validator::ChainValidator;
