use log::warn;
use p256::elliptic_curve::subtle::ConditionallySelectable;
use p256::{ProjectivePoint, Scalar};
use rand_core::{CryptoRng, RngCore};
use crate::crypto::challenge::challenge;
use crate::crypto::elgamal::Ciphertext;
use crate::crypto::group::{point_from_words, point_to_words, random_nonzero_scalar, scalar_from_word, scalar_to_word, GroupParams, Word};
use crate::crypto::vote::VoteBit;
use crate::crypto::ZkProofError;
use crate::error::VotingError;

/// The nizk proof is used to prove that the elgamal ciphertext (C1, C2) either encrypts zero or one.
///
/// Branch 0 proves knowledge of k with C1 = k*G and C2 = k*y, branch 1 with C1 = k*G and
/// C2 - G = k*y. The prover answers the branch of its bit honestly and simulates the other;
/// the two branch challenges must add up to the Fiat-Shamir challenge H(C1,C2,a0,a1,b0,b1).

#[derive(Clone, Debug)]
pub struct ZkInstanceBitOr {
    pub public_key: ProjectivePoint,
    pub ciphertext: Ciphertext,
}

pub struct ZkWitnessBitOr {
    pub bit: VoteBit,
    pub k: Scalar,
}

/// Zero-knowledge proof of the 0/1 relation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZkProofBitOr {
    pub a0: ProjectivePoint,
    pub a1: ProjectivePoint,
    pub b0: ProjectivePoint,
    pub b1: ProjectivePoint,
    pub c0: Scalar,
    pub c1: Scalar,
    pub f0: Scalar,
    pub f1: Scalar,
}

impl ZkInstanceBitOr {
    pub fn check_instance(&self) -> Result<(), ZkProofError> {
        if self.public_key == ProjectivePoint::IDENTITY {
            return Err(ZkProofError::InvalidInstance);
        }
        Ok(())
    }

    fn transcript(&self, a0: &ProjectivePoint, a1: &ProjectivePoint, b0: &ProjectivePoint, b1: &ProjectivePoint) -> [ProjectivePoint; 6] {
        [self.ciphertext.c1, self.ciphertext.c2, *a0, *a1, *b0, *b1]
    }
}

impl ZkProofBitOr {
    /// Total check used to accept or reject a submitted ciphertext.
    pub fn verify(&self, params: &GroupParams, public_key: &ProjectivePoint, ciphertext: &Ciphertext) -> bool {
        let instance = ZkInstanceBitOr {
            public_key: *public_key,
            ciphertext: *ciphertext,
        };
        verify_nizk_bit_or_relation(params, &instance, self).is_ok()
    }

    /// `[a0.x, a0.y, b0.x, b0.y, a1.x, a1.y, b1.x, b1.y, c0, c1, f0, f1]`
    pub fn to_words(&self) -> [Word; 12] {
        let [a0x, a0y] = point_to_words(&self.a0);
        let [b0x, b0y] = point_to_words(&self.b0);
        let [a1x, a1y] = point_to_words(&self.a1);
        let [b1x, b1y] = point_to_words(&self.b1);
        [
            a0x, a0y,
            b0x, b0y,
            a1x, a1y,
            b1x, b1y,
            scalar_to_word(&self.c0),
            scalar_to_word(&self.c1),
            scalar_to_word(&self.f0),
            scalar_to_word(&self.f1),
        ]
    }

    pub fn from_words(words: &[Word; 12]) -> Result<Self, VotingError> {
        Ok(ZkProofBitOr {
            a0: point_from_words(&[words[0], words[1]])?,
            b0: point_from_words(&[words[2], words[3]])?,
            a1: point_from_words(&[words[4], words[5]])?,
            b1: point_from_words(&[words[6], words[7]])?,
            c0: scalar_from_word(&words[8])?,
            c1: scalar_from_word(&words[9])?,
            f0: scalar_from_word(&words[10])?,
            f1: scalar_from_word(&words[11])?,
        })
    }
}

fn sample_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Scalar, ZkProofError> {
    random_nonzero_scalar(rng).map_err(|err| match err {
        VotingError::EntropyFailure(e) => ZkProofError::EntropyFailure(e),
        other => ZkProofError::EntropyFailure(other.to_string()),
    })
}

/// Proves that `instance.ciphertext` encrypts `witness.bit` with randomness `witness.k`.
///
/// Both bits run the same sequence of group operations; the real and simulated
/// transcripts are routed to branch 0 or 1 by constant-time selection on the bit.
pub fn prove_nizk_bit_or_relation<R: RngCore + CryptoRng>(
    params: &GroupParams,
    instance: &ZkInstanceBitOr,
    witness: &ZkWitnessBitOr,
    rng: &mut R,
) -> Result<ZkProofBitOr, ZkProofError> {
    instance.check_instance()?;

    let g = params.g;
    let y = instance.public_key;
    let Ciphertext { c1: big_c1, c2: big_c2 } = instance.ciphertext;
    let is_one = witness.bit.choice();

    let j = sample_scalar(rng)?;
    let c_sim = sample_scalar(rng)?;
    let f_sim = sample_scalar(rng)?;

    // Simulated branch: a = f*G - c*C1, b = f*y - c*T with T = C2 for branch 0, C2 - G for branch 1
    let sim_target = ProjectivePoint::conditional_select(&(big_c2 - g), &big_c2, is_one);
    let a_sim = g * f_sim - big_c1 * c_sim;
    let b_sim = y * f_sim - sim_target * c_sim;

    // Real branch: a = j*G, b = j*y
    let a_real = g * j;
    let b_real = y * j;

    let a0 = ProjectivePoint::conditional_select(&a_real, &a_sim, is_one);
    let a1 = ProjectivePoint::conditional_select(&a_sim, &a_real, is_one);
    let b0 = ProjectivePoint::conditional_select(&b_real, &b_sim, is_one);
    let b1 = ProjectivePoint::conditional_select(&b_sim, &b_real, is_one);

    // challenge = H(C1,C2,a0,a1,b0,b1)
    let challenge = challenge(params, &instance.transcript(&a0, &a1, &b0, &b1));
    let c_real = challenge - c_sim;
    let f_real = j + c_real * witness.k;

    Ok(ZkProofBitOr {
        a0,
        a1,
        b0,
        b1,
        c0: Scalar::conditional_select(&c_real, &c_sim, is_one),
        c1: Scalar::conditional_select(&c_sim, &c_real, is_one),
        f0: Scalar::conditional_select(&f_real, &f_sim, is_one),
        f1: Scalar::conditional_select(&f_sim, &f_real, is_one),
    })
}

pub fn verify_nizk_bit_or_relation(
    params: &GroupParams,
    instance: &ZkInstanceBitOr,
    nizk: &ZkProofBitOr,
) -> Result<(), ZkProofError> {
    instance.check_instance()?;

    let g = params.g;
    let y = instance.public_key;
    let Ciphertext { c1: big_c1, c2: big_c2 } = instance.ciphertext;

    let challenge = challenge(params, &instance.transcript(&nizk.a0, &nizk.a1, &nizk.b0, &nizk.b1));

    let checks = [
        ("challenge split", nizk.c0 + nizk.c1 == challenge),
        ("f0*G", g * nizk.f0 == nizk.a0 + big_c1 * nizk.c0),
        ("f0*y", y * nizk.f0 == nizk.b0 + big_c2 * nizk.c0),
        ("f1*G", g * nizk.f1 == nizk.a1 + big_c1 * nizk.c1),
        ("f1*y", y * nizk.f1 == nizk.b1 + (big_c2 - g) * nizk.c1),
    ];

    if let Some((name, _)) = checks.iter().find(|(_, ok)| !ok) {
        warn!("Bit proof rejected: {} check failed", name);
        return Err(ZkProofError::InvalidProof);
    }
    Ok(())
}
