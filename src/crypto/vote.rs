use p256::elliptic_curve::subtle::Choice;
use p256::{ProjectivePoint, Scalar};
use rand_core::{CryptoRng, RngCore};
use crate::crypto::elgamal::{encrypt_bit, Ciphertext};
use crate::crypto::group::GroupParams;
use crate::crypto::nizk_bit_or::{prove_nizk_bit_or_relation, ZkInstanceBitOr, ZkProofBitOr, ZkWitnessBitOr};
use crate::error::VotingError;
use crate::serde_types::VoteSubmission;

/// A ballot choice. Only these two values can ever be encrypted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VoteBit {
    Zero = 0,
    One = 1,
}

impl VoteBit {
    pub fn to_scalar(self) -> Scalar {
        Scalar::from(self as u64)
    }

    pub(crate) fn choice(self) -> Choice {
        Choice::from(self as u8)
    }
}

impl TryFrom<u64> for VoteBit {
    type Error = VotingError;

    fn try_from(v: u64) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(VoteBit::Zero),
            1 => Ok(VoteBit::One),
            other => Err(VotingError::InvalidPlaintext(other)),
        }
    }
}

impl From<VoteBit> for u64 {
    fn from(bit: VoteBit) -> u64 {
        bit as u64
    }
}

/// An encrypted choice together with its 0/1 proof, as submitted to the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vote {
    pub ciphertext: Ciphertext,
    pub proof: ZkProofBitOr,
}

impl Vote {
    pub fn verify(&self, params: &GroupParams, public_key: &ProjectivePoint) -> bool {
        self.proof.verify(params, public_key, &self.ciphertext)
    }

    pub fn to_submission(&self, stake: u64) -> VoteSubmission {
        VoteSubmission {
            ciphertext: self.ciphertext.to_words(),
            proof: self.proof.to_words(),
            stake,
        }
    }
}

/// Encrypts `v` and proves it is 0 or 1. The encryption randomness is
/// consumed here and never returned.
pub fn cast_vote<R: RngCore + CryptoRng>(
    params: &GroupParams,
    v: u64,
    public_key: &ProjectivePoint,
    rng: &mut R,
) -> Result<Vote, VotingError> {
    let bit = VoteBit::try_from(v)?;
    let (ciphertext, k) = encrypt_bit(params, bit, public_key, rng)?;

    let instance = ZkInstanceBitOr {
        public_key: *public_key,
        ciphertext,
    };
    let witness = ZkWitnessBitOr { bit, k };
    let proof = prove_nizk_bit_or_relation(params, &instance, &witness, rng)?;

    Ok(Vote { ciphertext, proof })
}
