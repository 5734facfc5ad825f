//! # Proof of Work
//!
//! A proof `p` is valid against the previous proof `q` when
//! `sha256(format!("{q}{p}"))`, in lowercase hex, starts with `difficulty`
//! zero characters. Search and verification share [`ProofOfWork::is_valid`].

use shared_types::sha256_hex;

/// Hex digits in a SHA-256 digest; the largest meaningful difficulty.
const MAX_DIFFICULTY: usize = 64;

/// Fixed-difficulty proof-of-work puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofOfWork {
    difficulty: usize,
}

impl ProofOfWork {
    /// Creates the puzzle. Difficulty is capped at 64 hex digits.
    pub fn new(difficulty: usize) -> Self {
        Self {
            difficulty: difficulty.min(MAX_DIFFICULTY),
        }
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    /// Whether `proof` solves the puzzle posed by `last_proof`.
    pub fn is_valid(&self, last_proof: u64, proof: u64) -> bool {
        let digest = sha256_hex(format!("{last_proof}{proof}").as_bytes());
        digest.bytes().take(self.difficulty).all(|b| b == b'0')
    }

    /// Scans 0, 1, 2, ... and returns the first valid proof.
    ///
    /// CPU-bound and blocking; callers must not hold shared locks while
    /// this runs.
    #[tracing::instrument(skip(self), fields(difficulty = self.difficulty))]
    pub fn search(&self, last_proof: u64) -> u64 {
        let mut proof = 0;
        while !self.is_valid(last_proof, proof) {
            proof += 1;
        }
        tracing::debug!(proof, "Proof found");
        proof
    }
}

impl Default for ProofOfWork {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_DIFFICULTY)
    }
}
