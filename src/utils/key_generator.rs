//! Short key generation.
//!
//! Keys are six characters drawn uniformly from the 62-character alphanumeric
//! alphabet. The generator owns a single PRNG seeded once from the operating
//! system and shared for the lifetime of the process, so keys produced in a
//! tight loop never repeat because of a repeated seed.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of characters in a short key.
pub const KEY_LENGTH: usize = 6;

/// Characters a short key is drawn from.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Source of candidate short keys.
///
/// Generators do not check uniqueness; callers retry on collision.
#[cfg_attr(test, mockall::automock)]
pub trait KeyGenerator: Send + Sync {
    /// Produces a new candidate key.
    fn generate(&self) -> String;
}

/// Key generator backed by one process-lifetime [`StdRng`].
///
/// Safe for concurrent use; callers contend on a mutex held only while the
/// six characters are drawn.
pub struct RandomKeyGenerator {
    rng: Mutex<StdRng>,
}

impl RandomKeyGenerator {
    /// Creates a generator seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Creates a generator with a fixed seed, producing a reproducible sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomKeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyGenerator for RandomKeyGenerator {
    fn generate(&self) -> String {
        let mut rng = self.rng.lock();

        (0..KEY_LENGTH)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

/// Returns true if `key` has the length and alphabet of a generated key.
pub fn is_valid_key(key: &str) -> bool {
    key.len() == KEY_LENGTH && key.bytes().all(|b| b.is_ascii_alphanumeric())
}
