use std::sync::atomic::{AtomicBool, Ordering};
use log::{debug, warn};
use p256::{ProjectivePoint, Scalar};
use rayon::prelude::*;
use crate::crypto::elgamal::Ciphertext;
use crate::crypto::group::GroupParams;
use crate::error::VotingError;

/// Recovers `M = C2 - x*C1 = v*G`.
fn message_point(ciphertext: &Ciphertext, private_key: &Scalar) -> ProjectivePoint {
    ciphertext.c2 - ciphertext.c1 * private_key
}

/// Scans `start..=end` for `i` with `i*G == target`, stepping by one addition per candidate.
/// Gives up early once `stop` is raised by another worker.
fn search_range(
    g: &ProjectivePoint,
    target: &ProjectivePoint,
    start: u64,
    end: u64,
    stop: &AtomicBool,
) -> Option<u64> {
    let mut candidate = *g * Scalar::from(start);
    let mut i = start;
    loop {
        if candidate == *target {
            stop.store(true, Ordering::Relaxed);
            return Some(i);
        }
        if i == end || stop.load(Ordering::Relaxed) {
            return None;
        }
        candidate += g;
        i += 1;
    }
}

/// Decrypts an aggregate ciphertext whose plaintext is known to lie in `[0, bound]`.
///
/// The plaintext is recovered by brute-force discrete log, so the cost is
/// linear in the plaintext. The search never runs past `bound`.
pub fn decrypt(
    params: &GroupParams,
    ciphertext: &Ciphertext,
    private_key: &Scalar,
    bound: u64,
) -> Result<u64, VotingError> {
    let target = message_point(ciphertext, private_key);
    debug!("Searching plaintext in [0, {}]", bound);

    search_range(&params.g, &target, 0, bound, &AtomicBool::new(false)).ok_or_else(|| {
        warn!("Plaintext not found within bound {}", bound);
        VotingError::DecryptionNotFound { bound }
    })
}

/// Splits `[0, bound]` into at most `workers` contiguous inclusive ranges.
/// The last range always ends at `bound`.
fn search_ranges(bound: u64, workers: usize) -> Vec<(u64, u64)> {
    let workers = workers.max(1) as u64;
    let chunk = (bound / workers).saturating_add(1);
    (0..workers)
        .map_while(|w| {
            let start = w.checked_mul(chunk).filter(|start| *start <= bound)?;
            let end = if w + 1 == workers {
                bound
            } else {
                start.saturating_add(chunk - 1).min(bound)
            };
            Some((start, end))
        })
        .collect()
}

/// Same as [`decrypt`] with `[0, bound]` split into `workers` contiguous
/// ranges searched on the rayon pool. The discrete log below the group order
/// is unique, so the first match found is the answer and stops the others.
pub fn decrypt_parallel(
    params: &GroupParams,
    ciphertext: &Ciphertext,
    private_key: &Scalar,
    bound: u64,
    workers: usize,
) -> Result<u64, VotingError> {
    let target = message_point(ciphertext, private_key);
    debug!("Searching plaintext in [0, {}] with {} workers", bound, workers.max(1));

    let stop = AtomicBool::new(false);
    let found = search_ranges(bound, workers)
        .into_par_iter()
        .find_map_any(|(start, end)| search_range(&params.g, &target, start, end, &stop));

    found.ok_or_else(|| {
        warn!("Plaintext not found within bound {}", bound);
        VotingError::DecryptionNotFound { bound }
    })
}
