//! Shared utilities for integration tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use log_location::LocationRecord;

const CLASS_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_.<>`";
const METHOD_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_<>";
const FILE_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789_.-:/\\ ";

/// Deterministic RNG so failures reproduce.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn random_string(rng: &mut StdRng, alphabet: &[u8], max_len: usize) -> String {
    let len = rng.gen_range(0..=max_len);
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

/// A record the codec must round-trip: dots only in the class name,
/// colons only in the file name, no parentheses anywhere.
pub fn random_well_formed(rng: &mut StdRng) -> LocationRecord {
    LocationRecord::new(
        random_string(rng, CLASS_CHARS, 24),
        random_string(rng, METHOD_CHARS, 12),
        random_string(rng, FILE_CHARS, 32),
        rng.gen::<i32>(),
    )
}
