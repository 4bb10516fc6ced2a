use std::borrow::Borrow;
use std::iter::Sum;
use std::ops;
use p256::{ProjectivePoint, Scalar};
use rand_core::{CryptoRng, RngCore};
use crate::crypto::group::{point_from_words, point_to_words, random_nonzero_scalar, GroupParams, Word};
use crate::crypto::vote::VoteBit;
use crate::error::VotingError;

/// Exponential ElGamal ciphertext `(C1, C2) = (k*G, k*y + v*G)`.
///
/// Ciphertexts under the same key add component-wise: the sum encrypts the
/// sum of the plaintexts under the sum of the randomness.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    pub c1: ProjectivePoint,
    pub c2: ProjectivePoint,
}

impl Ciphertext {
    /// Encryption of zero with zero randomness, the neutral element of aggregation.
    pub fn identity() -> Self {
        Ciphertext {
            c1: ProjectivePoint::IDENTITY,
            c2: ProjectivePoint::IDENTITY,
        }
    }

    /// Scales both components by `stake`, giving an encryption of `stake * v`.
    pub fn weighted(&self, stake: u64) -> Self {
        let stake = Scalar::from(stake);
        Ciphertext {
            c1: self.c1 * stake,
            c2: self.c2 * stake,
        }
    }

    /// `[C1.x, C1.y, C2.x, C2.y]`
    pub fn to_words(&self) -> [Word; 4] {
        let [c1x, c1y] = point_to_words(&self.c1);
        let [c2x, c2y] = point_to_words(&self.c2);
        [c1x, c1y, c2x, c2y]
    }

    pub fn from_words(words: &[Word; 4]) -> Result<Self, VotingError> {
        Ok(Ciphertext {
            c1: point_from_words(&[words[0], words[1]])?,
            c2: point_from_words(&[words[2], words[3]])?,
        })
    }
}

impl<B: Borrow<Ciphertext>> ops::AddAssign<B> for Ciphertext {
    fn add_assign(&mut self, rhs: B) {
        let rhs = rhs.borrow();
        self.c1 += rhs.c1;
        self.c2 += rhs.c2;
    }
}

impl<B: Borrow<Ciphertext>> ops::Add<B> for Ciphertext {
    type Output = Self;

    fn add(mut self, rhs: B) -> Self {
        self += rhs;
        self
    }
}

impl<B: Borrow<Ciphertext>> Sum<B> for Ciphertext {
    fn sum<I: Iterator<Item = B>>(iter: I) -> Self {
        iter.fold(Ciphertext::identity(), |acc, c| acc + c)
    }
}

/// Encrypts a vote under `public_key` and returns the randomness `k` with the
/// ciphertext. `k` is the witness for the bit proof and must not outlive it.
pub fn encrypt<R: RngCore + CryptoRng>(
    params: &GroupParams,
    v: u64,
    public_key: &ProjectivePoint,
    rng: &mut R,
) -> Result<(Ciphertext, Scalar), VotingError> {
    let bit = VoteBit::try_from(v)?;
    encrypt_bit(params, bit, public_key, rng)
}

pub fn encrypt_bit<R: RngCore + CryptoRng>(
    params: &GroupParams,
    bit: VoteBit,
    public_key: &ProjectivePoint,
    rng: &mut R,
) -> Result<(Ciphertext, Scalar), VotingError> {
    let k = random_nonzero_scalar(rng)?;
    let ciphertext = Ciphertext {
        c1: params.g * k,
        c2: *public_key * k + params.g * bit.to_scalar(),
    };
    Ok((ciphertext, k))
}
