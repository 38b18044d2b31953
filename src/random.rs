//! Seedable random number generation.
//!
//! Every stochastic operation in this crate takes an explicit `&mut R: Rng`.
//! [`create_rng`] builds the generator used by [`GaRunner`](crate::ga::GaRunner)
//! so that runs are reproducible from a single `u64` seed.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from `seed`.
///
/// `StdRng` produces the same stream on every platform, which keeps seeded
/// test expectations portable.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
