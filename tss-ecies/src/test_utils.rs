//! Random number generators used by the tests.

use core::num::NonZeroU32;

use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, Error, RngCore, SeedableRng};

/// Returns a deterministic CSPRNG seeded with `seed`.
pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// A CSPRNG that starts failing after a given number of successful `try_fill_bytes` calls.
pub struct FailingRng {
    inner: ChaCha20Rng,
    successes_left: usize,
}

impl FailingRng {
    /// An RNG whose every call fails.
    pub fn broken() -> Self {
        Self::failing_after(0)
    }

    pub fn failing_after(successes: usize) -> Self {
        Self { inner: seeded_rng(0), successes_left: successes }
    }
}

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        panic!("infallible RNG method called on FailingRng")
    }

    fn next_u64(&mut self) -> u64 {
        panic!("infallible RNG method called on FailingRng")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        panic!("infallible RNG method called on FailingRng")
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        if self.successes_left == 0 {
            let code = NonZeroU32::new(Error::CUSTOM_START).expect("custom error codes are non-zero");
            return Err(Error::from(code));
        }
        self.successes_left -= 1;
        self.inner.try_fill_bytes(dest)
    }
}

impl CryptoRng for FailingRng {}
