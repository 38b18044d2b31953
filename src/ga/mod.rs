//! Genetic Algorithm framework.
//!
//! A generic GA engine for fixed-length discrete chromosomes. Users define
//! their problem by implementing [`GaProblem`], which specifies how to seed,
//! evaluate, recombine, mutate, and optionally refine chromosomes.
//!
//! # Core Types
//!
//! - [`GaProblem`]: Problem definition, the engine's only view of the domain
//! - [`Individual`]: A chromosome with its raw and scaled scores
//! - [`GaConfig`]: Algorithm parameters and stopping criteria
//! - [`GeneticOptimizer`]: Step-by-step state machine for one run
//! - [`GaRunner`]: One-call entry point seeded from the configuration
//! - [`GaResult`]: Best solution, stop reason, and run statistics
//!
//! # Algorithm
//!
//! Each generation the population is scored and linearly rescaled so that
//! better individuals get weights closer to 10.5 and worse ones closer to
//! 0.5. Parents are picked by a two-draw roulette tournament, copied,
//! recombined and mutated per the configured rates, and the offspring
//! replace the whole population. The best individual ever seen is kept
//! outside the population. After the loop, [`GaProblem::refine`] gets one
//! chance to polish it.
//!
//! # Submodules
//!
//! - [`operators`]: Order crossover, swap mutation, 2-opt, positional swaps
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod error;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use error::{ConfigError, GaError};
pub use runner::{GaResult, GaRunner, GenerationStats, GeneticOptimizer, Phase, StopReason};
pub use selection::Selection;
pub use types::{GaProblem, Individual, Objective, Refinement};
