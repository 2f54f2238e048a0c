//! Deterministic RNG wrapper and seed-derivation helpers.

use std::hash::Hasher;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use siphasher::sip::SipHasher13;

/// Owned randomness source threaded through every generator.
///
/// There is no process-wide generator: each call site owns a handle and passes
/// it down by `&mut`, so two instances built on different threads never share
/// state. Substreams are derived by hashing `(master_seed, substream_id)` with
/// SipHash-1-3 configured with fixed zero keys; the rule is stable across
/// platforms.
#[derive(Debug, Clone)]
pub struct RngHandle {
    seed: u64,
    rng: StdRng,
}

impl RngHandle {
    /// Creates a new RNG handle from a master seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Top-level seeding entry point.
    ///
    /// `None` derives the seed from the system clock; the chosen value is
    /// available through [`RngHandle::seed`] so a run can be replayed.
    pub fn initialize(seed: Option<u64>) -> Self {
        Self::from_seed(seed.unwrap_or_else(clock_seed))
    }

    /// Creates the handle for substream `index` of this handle's master seed.
    pub fn substream(&self, index: u64) -> Self {
        Self::from_seed(derive_substream_seed(self.seed, index))
    }

    /// Returns the seed this handle was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RngCore for RngHandle {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Derives the deterministic seed for a specific substream.
pub fn derive_substream_seed(master_seed: u64, substream: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(master_seed);
    hasher.write_u64(substream);
    hasher.finish()
}

fn clock_seed() -> u64 {
    // Clocks set before the epoch map to seed 0.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}
