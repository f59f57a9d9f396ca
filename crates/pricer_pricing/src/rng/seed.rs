//! Seed derivation for per-worker generators.
//!
//! A run draws one entropy value (from the operating system, or the
//! configured seed) and every worker derives its own seed from that value
//! and its index. Mixing uses the SplitMix64 finaliser, whose avalanche
//! behaviour keeps seeds for adjacent worker indices far apart.

use rand::rngs::OsRng;
use rand::RngCore;

const SPLITMIX64_GOLDEN: u64 = 0x9e37_79b9_7f4a_7c15;
const SPLITMIX64_M1: u64 = 0xbf58_476d_1ce4_e5b9;
const SPLITMIX64_M2: u64 = 0x94d0_49bb_1331_11eb;

/// SplitMix64 finaliser applied to `state + golden`.
#[inline]
pub fn splitmix64(state: u64) -> u64 {
    let mut z = state.wrapping_add(SPLITMIX64_GOLDEN);
    z = (z ^ (z >> 30)).wrapping_mul(SPLITMIX64_M1);
    z = (z ^ (z >> 27)).wrapping_mul(SPLITMIX64_M2);
    z ^ (z >> 31)
}

/// Draws a fresh 64-bit entropy value from the operating system.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::fresh_entropy;
///
/// // Two draws colliding is a 2^-64 event.
/// assert_ne!(fresh_entropy(), fresh_entropy());
/// ```
#[inline]
pub fn fresh_entropy() -> u64 {
    OsRng.next_u64()
}

/// Derives the seed of worker `worker_id` from a run's entropy value.
///
/// Deterministic in both arguments: the same `(entropy, worker_id)` pair
/// always yields the same seed.
#[inline]
pub fn worker_seed(entropy: u64, worker_id: usize) -> u64 {
    splitmix64(entropy ^ splitmix64(worker_id as u64))
}
