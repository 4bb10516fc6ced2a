use std::fmt;
use group::ff::Field;
use p256::{ProjectivePoint, Scalar};
use rand_core::{CryptoRng, OsRng, RngCore};
use crate::crypto::group::{point_to_words, random_nonzero_scalar, GroupParams, Word};
use crate::error::VotingError;

/// ElGamal key pair of the tallying authority.
#[derive(Clone)]
pub struct KeyPair {
    private_key: Scalar,
    pub public_key: ProjectivePoint,
}

impl KeyPair {
    /// Draws `x` uniformly from `[1, n)` and computes `y = x*G`.
    pub fn generate<R: RngCore + CryptoRng>(params: &GroupParams, rng: &mut R) -> Result<Self, VotingError> {
        let private_key = random_nonzero_scalar(rng)?;
        Ok(KeyPair {
            private_key,
            public_key: params.g * private_key,
        })
    }

    pub fn generate_os(params: &GroupParams) -> Result<Self, VotingError> {
        Self::generate(params, &mut OsRng)
    }

    pub fn from_private_key(params: &GroupParams, private_key: Scalar) -> Result<Self, VotingError> {
        if bool::from(private_key.is_zero()) {
            return Err(VotingError::InvalidPrivateKey);
        }
        Ok(KeyPair {
            private_key,
            public_key: params.g * private_key,
        })
    }

    pub fn private_key(&self) -> &Scalar {
        &self.private_key
    }

    pub fn public_key_words(&self) -> [Word; 2] {
        point_to_words(&self.public_key)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .finish()
    }
}
