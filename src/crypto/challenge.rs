use std::fmt;
use std::str::FromStr;
use p256::elliptic_curve::bigint::U256;
use p256::elliptic_curve::ops::Reduce;
use p256::{FieldBytes, ProjectivePoint, Scalar};
use sha2::{Digest, Sha256};
use sha3::Keccak256;
use crate::crypto::group::{point_to_words, GroupParams};

/// Hash function behind the Fiat-Shamir challenge. Keccak-256 is what the
/// ledger's verifier computes; the prover and every verifier must agree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChallengeHash {
    #[default]
    Keccak256,
    Sha256,
}

impl fmt::Display for ChallengeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChallengeHash::Keccak256 => write!(f, "keccak256"),
            ChallengeHash::Sha256 => write!(f, "sha256"),
        }
    }
}

impl FromStr for ChallengeHash {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keccak256" | "keccak" => Ok(ChallengeHash::Keccak256),
            "sha256" => Ok(ChallengeHash::Sha256),
            other => Err(format!("unknown challenge hash '{}'", other)),
        }
    }
}

/// Serializes the points as consecutive `x ‖ y` uint256 words, in the given
/// order. This is the `abi.encode(uint256, ...)` packing of the coordinates.
pub fn encode_transcript(elements: &[ProjectivePoint]) -> Vec<u8> {
    let mut transcript: Vec<u8> = Vec::with_capacity(elements.len() * 64);
    for element in elements {
        let [x, y] = point_to_words(element);
        transcript.extend_from_slice(&x);
        transcript.extend_from_slice(&y);
    }
    transcript
}

// challenge = H(x_1 ‖ y_1 ‖ ... ‖ x_m ‖ y_m) mod n
pub fn challenge(params: &GroupParams, elements: &[ProjectivePoint]) -> Scalar {
    let transcript = encode_transcript(elements);

    let digest: FieldBytes = match params.challenge_hash {
        ChallengeHash::Keccak256 => FieldBytes::clone_from_slice(&Keccak256::digest(&transcript)),
        ChallengeHash::Sha256 => FieldBytes::clone_from_slice(&Sha256::digest(&transcript)),
    };

    <Scalar as Reduce<U256>>::reduce_bytes(&digest)
}

#[cfg(test)]
mod test {
    use group::Group;
    use rand::thread_rng;
    use super::*;

    fn random_points(count: usize) -> Vec<ProjectivePoint> {
        (0..count).map(|_| ProjectivePoint::random(&mut thread_rng())).collect()
    }

    #[test]
    fn challenge_is_deterministic() {
        let params = GroupParams::secp256r1();
        let points = random_points(6);
        assert_eq!(challenge(&params, &points), challenge(&params, &points));
    }

    #[test]
    fn challenge_depends_on_order() {
        let params = GroupParams::secp256r1();
        let points = random_points(6);
        let expected = challenge(&params, &points);

        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                let mut swapped = points.clone();
                swapped.swap(i, j);
                assert_ne!(expected, challenge(&params, &swapped), "swap of {} and {}", i, j);
            }
        }
    }

    #[test]
    fn challenge_depends_on_every_element() {
        let params = GroupParams::secp256r1();
        let points = random_points(6);
        let expected = challenge(&params, &points);

        for i in 0..points.len() {
            let mut omitted = points.clone();
            omitted.remove(i);
            assert_ne!(expected, challenge(&params, &omitted));

            let mut replaced = points.clone();
            replaced[i] += params.g;
            assert_ne!(expected, challenge(&params, &replaced));
        }
    }

    #[test]
    fn hash_choice_changes_challenge() {
        let keccak = GroupParams::secp256r1();
        let sha = keccak.with_challenge_hash(ChallengeHash::Sha256);
        let points = random_points(2);
        assert_ne!(challenge(&keccak, &points), challenge(&sha, &points));
    }

    #[test]
    fn keccak_challenge_of_empty_transcript() {
        // keccak256("") reduced modulo n
        let params = GroupParams::secp256r1();
        let expected = <Scalar as Reduce<U256>>::reduce_bytes(&FieldBytes::clone_from_slice(
            &hex::decode("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470").unwrap(),
        ));
        assert_eq!(expected, challenge(&params, &[]));
    }

    #[test]
    fn transcript_encodes_identity_as_zeros() {
        let transcript = encode_transcript(&[ProjectivePoint::IDENTITY]);
        assert_eq!(vec![0u8; 64], transcript);
    }

    #[test]
    fn parse_challenge_hash() {
        assert_eq!(Ok(ChallengeHash::Keccak256), "KECCAK256".parse());
        assert_eq!(Ok(ChallengeHash::Sha256), "sha256".parse());
        assert!("md5".parse::<ChallengeHash>().is_err());
    }
}
