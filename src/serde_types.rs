use p256::ProjectivePoint;
use serde::{Deserialize, Serialize};
use crate::crypto::elgamal::Ciphertext;
use crate::crypto::group::{point_from_words, point_to_words, Word};
use crate::crypto::nizk_bit_or::ZkProofBitOr;
use crate::crypto::vote::Vote;
use crate::error::VotingError;

/// Parses a uint256 written as hex, with or without `0x`, left-padding short values.
pub fn parse_word(s: &str) -> Result<Word, VotingError> {
    let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    if digits.is_empty() || digits.len() > 64 {
        return Err(VotingError::Deserialization(format!("Could not parse uint256 from '{}'", s)));
    }

    let padded = format!("{:0>64}", digits);
    let mut word = [0u8; 32];
    hex::decode_to_slice(&padded, &mut word)
        .map_err(|e| VotingError::Deserialization(format!("Could not parse uint256 from '{}': {}", s, e)))?;
    Ok(word)
}

pub fn format_word(word: &Word) -> String {
    format!("0x{}", hex::encode(word))
}

pub fn public_key_from_words(words: &[Word; 2]) -> Result<ProjectivePoint, VotingError> {
    let point = point_from_words(words)?;
    if point == ProjectivePoint::IDENTITY {
        return Err(VotingError::Deserialization(String::from("Public key is the identity")));
    }
    Ok(point)
}

mod hex_words {
    use serde::de::Error;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};
    use super::{format_word, parse_word, Word};

    pub fn serialize<S: Serializer, const N: usize>(words: &[Word; N], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(N))?;
        for word in words {
            seq.serialize_element(&format_word(word))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(deserializer: D) -> Result<[Word; N], D::Error> {
        let strings = Vec::<String>::deserialize(deserializer)?;
        if strings.len() != N {
            return Err(D::Error::invalid_length(strings.len(), &"a fixed number of uint256 words"));
        }

        let mut words = [[0u8; 32]; N];
        for (word, s) in words.iter_mut().zip(&strings) {
            *word = parse_word(s).map_err(D::Error::custom)?;
        }
        Ok(words)
    }
}

/// A vote as posted to the ledger: `castVote(C1.x, C1.y, C2.x, C2.y, proof, stake)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteSubmission {
    #[serde(with = "hex_words")]
    pub ciphertext: [Word; 4],
    #[serde(with = "hex_words")]
    pub proof: [Word; 12],
    pub stake: u64,
}

impl VoteSubmission {
    pub fn to_vote(&self) -> Result<Vote, VotingError> {
        Ok(Vote {
            ciphertext: Ciphertext::from_words(&self.ciphertext)?,
            proof: ZkProofBitOr::from_words(&self.proof)?,
        })
    }

    pub fn to_json(&self) -> Result<String, VotingError> {
        serde_json::to_string(self).map_err(|e| VotingError::Deserialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, VotingError> {
        serde_json::from_str(json).map_err(|e| VotingError::Deserialization(e.to_string()))
    }
}

/// The ledger's running aggregate `((c1x, c1y), (c2x, c2y))`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedSum {
    #[serde(with = "hex_words")]
    pub c1: [Word; 2],
    #[serde(with = "hex_words")]
    pub c2: [Word; 2],
}

impl EncryptedSum {
    pub fn to_ciphertext(&self) -> Result<Ciphertext, VotingError> {
        Ok(Ciphertext {
            c1: point_from_words(&self.c1)?,
            c2: point_from_words(&self.c2)?,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, VotingError> {
        serde_json::from_str(json).map_err(|e| VotingError::Deserialization(e.to_string()))
    }
}

impl From<&Ciphertext> for EncryptedSum {
    fn from(ciphertext: &Ciphertext) -> Self {
        EncryptedSum {
            c1: point_to_words(&ciphertext.c1),
            c2: point_to_words(&ciphertext.c2),
        }
    }
}
