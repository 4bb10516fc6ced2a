use group::ff::{Field, PrimeField};
use group::Curve;
use p256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use p256::{AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar};
use rand_core::{CryptoRng, RngCore};
use crate::crypto::challenge::ChallengeHash;
use crate::error::VotingError;

/// A big-endian uint256, the unit of the ledger wire format.
pub type Word = [u8; 32];

/// Group parameters threaded through every operation: the generator `G` of
/// the P-256 group and the hash used for Fiat-Shamir challenges.
/// The group order is fixed by the curve and implicit in `Scalar`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupParams {
    pub g: ProjectivePoint,
    pub challenge_hash: ChallengeHash,
}

impl GroupParams {
    pub fn secp256r1() -> Self {
        GroupParams {
            g: ProjectivePoint::GENERATOR,
            challenge_hash: ChallengeHash::Keccak256,
        }
    }

    pub fn with_challenge_hash(self, challenge_hash: ChallengeHash) -> Self {
        GroupParams { challenge_hash, ..self }
    }
}

impl Default for GroupParams {
    fn default() -> Self {
        GroupParams::secp256r1()
    }
}

/// Affine coordinates of `point`; the identity maps to `(0, 0)`.
pub fn point_to_words(point: &ProjectivePoint) -> [Word; 2] {
    let encoded = point.to_affine().to_encoded_point(false);
    match (encoded.x(), encoded.y()) {
        (Some(x), Some(y)) => [field_bytes_to_word(x), field_bytes_to_word(y)],
        _ => [[0u8; 32], [0u8; 32]],
    }
}

pub fn point_from_words(words: &[Word; 2]) -> Result<ProjectivePoint, VotingError> {
    let [x, y] = words;
    if x.iter().all(|b| *b == 0) && y.iter().all(|b| *b == 0) {
        return Ok(ProjectivePoint::IDENTITY);
    }

    let encoded = EncodedPoint::from_affine_coordinates(
        &FieldBytes::from(*x),
        &FieldBytes::from(*y),
        false,
    );
    let affine: Option<AffinePoint> = AffinePoint::from_encoded_point(&encoded).into();
    affine
        .map(ProjectivePoint::from)
        .ok_or_else(|| VotingError::Deserialization(String::from("Point is not on the curve")))
}

pub fn scalar_to_word(scalar: &Scalar) -> Word {
    field_bytes_to_word(&scalar.to_repr())
}

/// Parses a canonical scalar; values `>= n` are rejected rather than reduced.
pub fn scalar_from_word(word: &Word) -> Result<Scalar, VotingError> {
    let scalar: Option<Scalar> = Scalar::from_repr(FieldBytes::from(*word)).into();
    scalar.ok_or_else(|| VotingError::Deserialization(String::from("Scalar is not reduced modulo the group order")))
}

/// Samples a scalar uniformly from `[1, n)`.
///
/// 256 bits are drawn per attempt and rejected if not canonical or zero, so
/// the result has no modular bias. A failing source is reported, never
/// replaced by a weaker one.
pub fn random_nonzero_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Scalar, VotingError> {
    loop {
        let mut bytes = [0u8; 32];
        rng.try_fill_bytes(&mut bytes)
            .map_err(|e| VotingError::EntropyFailure(e.to_string()))?;

        let candidate: Option<Scalar> = Scalar::from_repr(FieldBytes::from(bytes)).into();
        if let Some(scalar) = candidate {
            if !bool::from(scalar.is_zero()) {
                return Ok(scalar);
            }
        }
    }
}

fn field_bytes_to_word(bytes: &FieldBytes) -> Word {
    let mut word = [0u8; 32];
    word.copy_from_slice(bytes.as_slice());
    word
}
