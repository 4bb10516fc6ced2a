use std::env::var;
use std::str::FromStr;
use log::debug;
use crate::crypto::challenge::ChallengeHash;
use crate::crypto::elgamal::Ciphertext;
use crate::crypto::group::GroupParams;
use crate::crypto::keygen::KeyPair;
use crate::crypto::tally::{decrypt, decrypt_parallel};
use crate::error::VotingError;

pub const ENV_CHALLENGE_HASH: &str = "STAKE_VOTING_CHALLENGE_HASH";
pub const ENV_DECRYPT_BOUND: &str = "STAKE_VOTING_DECRYPT_BOUND";
pub const ENV_DECRYPT_WORKERS: &str = "STAKE_VOTING_DECRYPT_WORKERS";

pub const DEFAULT_DECRYPT_BOUND: u64 = 1_000_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VotingConfig {
    pub params: GroupParams,
    /// Largest plaintext the tally search will try, typically the total stake.
    pub decrypt_bound: u64,
    /// Number of ranges the tally search is split into; 1 searches sequentially.
    pub decrypt_workers: usize,
}

impl Default for VotingConfig {
    fn default() -> Self {
        VotingConfig {
            params: GroupParams::secp256r1(),
            decrypt_bound: DEFAULT_DECRYPT_BOUND,
            decrypt_workers: 1,
        }
    }
}

impl VotingConfig {
    pub fn from_env() -> Result<Self, VotingError> {
        Self::from_lookup(|key| var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, VotingError> {
        let mut config = VotingConfig::default();

        if let Some(val) = lookup(ENV_CHALLENGE_HASH) {
            let hash = ChallengeHash::from_str(&val).map_err(VotingError::Config)?;
            config.params = config.params.with_challenge_hash(hash);
        }
        if let Some(val) = lookup(ENV_DECRYPT_BOUND) {
            config.decrypt_bound = parse_number(ENV_DECRYPT_BOUND, &val)?;
        }
        if let Some(val) = lookup(ENV_DECRYPT_WORKERS) {
            config.decrypt_workers = parse_number(ENV_DECRYPT_WORKERS, &val)?;
            if config.decrypt_workers == 0 {
                return Err(VotingError::Config(format!("{} must be at least 1", ENV_DECRYPT_WORKERS)));
            }
        }

        debug!(
            "Voting config: challenge hash {}, decrypt bound {}, decrypt workers {}",
            config.params.challenge_hash, config.decrypt_bound, config.decrypt_workers
        );
        Ok(config)
    }

    pub fn with_decrypt_bound(self, decrypt_bound: u64) -> Self {
        VotingConfig { decrypt_bound, ..self }
    }

    /// Decrypts a tally with the configured bound and worker count.
    pub fn decrypt_tally(&self, ciphertext: &Ciphertext, keys: &KeyPair) -> Result<u64, VotingError> {
        if self.decrypt_workers > 1 {
            decrypt_parallel(&self.params, ciphertext, keys.private_key(), self.decrypt_bound, self.decrypt_workers)
        } else {
            decrypt(&self.params, ciphertext, keys.private_key(), self.decrypt_bound)
        }
    }
}

fn parse_number<T: FromStr>(key: &str, val: &str) -> Result<T, VotingError> {
    val.trim()
        .parse()
        .map_err(|_| VotingError::Config(format!("{} must be a non-negative integer, got '{}'", key, val)))
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;
    use rand::thread_rng;
    use crate::crypto::elgamal::encrypt;
    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = VotingConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(VotingConfig::default(), config);
        assert_eq!(ChallengeHash::Keccak256, config.params.challenge_hash);
    }

    #[test]
    fn reads_all_keys() {
        let config = VotingConfig::from_lookup(lookup_from(&[
            (ENV_CHALLENGE_HASH, "sha256"),
            (ENV_DECRYPT_BOUND, "500"),
            (ENV_DECRYPT_WORKERS, " 4 "),
        ]))
        .unwrap();
        assert_eq!(ChallengeHash::Sha256, config.params.challenge_hash);
        assert_eq!(500, config.decrypt_bound);
        assert_eq!(4, config.decrypt_workers);
    }

    #[test]
    fn rejects_malformed_values() {
        for pairs in [
            [(ENV_CHALLENGE_HASH, "md5")],
            [(ENV_DECRYPT_BOUND, "-1")],
            [(ENV_DECRYPT_WORKERS, "many")],
            [(ENV_DECRYPT_WORKERS, "0")],
        ] {
            assert!(matches!(
                VotingConfig::from_lookup(lookup_from(&pairs)),
                Err(VotingError::Config(_))
            ));
        }
    }

    #[test]
    fn decrypt_tally_uses_configured_bound() {
        let config = VotingConfig { decrypt_workers: 3, ..VotingConfig::default() }.with_decrypt_bound(10);
        let keys = KeyPair::generate(&config.params, &mut thread_rng()).unwrap();
        let (one, _) = encrypt(&config.params, 1, &keys.public_key, &mut thread_rng()).unwrap();

        assert_eq!(Ok(10), config.decrypt_tally(&one.weighted(10), &keys));
        assert_eq!(
            Err(VotingError::DecryptionNotFound { bound: 10 }),
            config.decrypt_tally(&one.weighted(11), &keys)
        );
    }
}
