use std::fmt;

pub mod group;
pub mod challenge;
pub mod keygen;
pub mod elgamal;
pub mod nizk_bit_or;
pub mod tally;
pub mod vote;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ZkProofError {
    InvalidProof,
    InvalidInstance,
    EntropyFailure(String),
}

impl fmt::Display for ZkProofError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZkProofError::InvalidProof => write!(f, "Invalid proof provided"),
            ZkProofError::InvalidInstance => write!(f, "Invalid instance data"),
            ZkProofError::EntropyFailure(e) => write!(f, "Secure random source failed: {}", e),
        }
    }
}

impl std::error::Error for ZkProofError {}
