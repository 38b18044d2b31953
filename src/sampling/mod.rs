//! Sampling primitives used by the GA engine and by problem definitions.
//!
//! - [`seek_lower_bound`]: roulette-wheel lookup over cumulative weights, O(log n)
//! - [`SamplePool`]: draws from a fixed value set without replacement

mod lower_bound;
mod pool;

pub use lower_bound::seek_lower_bound;
pub use pool::SamplePool;
