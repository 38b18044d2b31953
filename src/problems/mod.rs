//! Ready-made [`GaProblem`](crate::ga::GaProblem) implementations.
//!
//! - [`Tsp`]: permutation of locations minimizing open-path length, with
//!   order crossover, swap mutation and 2-opt refinement
//! - [`IntegerVector`]: bounded integer variables with a user objective

mod integer;
mod tsp;

pub use integer::{IntegerCrossover, IntegerVector};
pub use tsp::{Location, Tsp};
