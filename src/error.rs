use thiserror::Error;
use crate::crypto::ZkProofError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VotingError {
    #[error("Plaintext {0} is not a valid vote, expected 0 or 1")]
    InvalidPlaintext(u64),
    #[error("No plaintext found within search bound {bound}")]
    DecryptionNotFound { bound: u64 },
    #[error("Secure random source failed: {0}")]
    EntropyFailure(String),
    #[error("Failed to create proof: {0}")]
    InvalidProof(ZkProofError),
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    #[error("Invalid private key")]
    InvalidPrivateKey,
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ZkProofError> for VotingError {
    fn from(err: ZkProofError) -> Self {
        match err {
            ZkProofError::EntropyFailure(e) => VotingError::EntropyFailure(e),
            other => VotingError::InvalidProof(other),
        }
    }
}
