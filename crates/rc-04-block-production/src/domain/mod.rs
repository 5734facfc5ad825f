//! Block production domain: proof-of-work, genesis, chain queries.

pub mod genesis;
pub mod pow;
pub mod queries;

pub use genesis::create_genesis_block;
pub use pow::ProofOfWork;
pub use queries::{NodeActivity, RecordQuery, SealedRecord};
