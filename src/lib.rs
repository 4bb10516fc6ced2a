//! Library entry point for the stake_voting crate.
//
// Encrypted 0/1 ballots with disjunctive proofs, homomorphic aggregation and
// bounded tally decryption over P-256.

pub mod config;
pub mod crypto;
pub mod error;
pub mod serde_types;

pub use config::VotingConfig;
pub use crypto::elgamal::{encrypt, Ciphertext};
pub use crypto::group::GroupParams;
pub use crypto::keygen::KeyPair;
pub use crypto::nizk_bit_or::ZkProofBitOr;
pub use crypto::tally::{decrypt, decrypt_parallel};
pub use crypto::vote::{cast_vote, Vote, VoteBit};
pub use error::VotingError;
