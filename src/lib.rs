//! Genetic optimizer for combinatorial search problems.
//!
//! - **Genetic Algorithm (GA)**: A sequential, seedable GA engine with
//!   linear fitness scaling, roulette-tournament selection, generational
//!   replacement, and three stopping criteria (stagnation, wall clock,
//!   generation count). Problems plug in through [`ga::GaProblem`].
//! - **Problems**: A permutation-encoded routing problem with order
//!   crossover and 2-opt refinement, and a bounded integer vector problem.
//! - **Sampling**: Cumulative-weight binary search and sampling without
//!   replacement.
//!
//! # Example
//!
//! ```
//! use u_genopt::ga::{GaConfig, GaRunner, Objective};
//! use u_genopt::problems::{Location, Tsp};
//!
//! let tsp = Tsp::new(&[
//!     Location::new(0.0, 0.0),
//!     Location::new(2.0, 0.0),
//!     Location::new(1.0, 0.0),
//!     Location::new(3.0, 0.0),
//! ]);
//! let config = GaConfig::default()
//!     .with_population_size(20)
//!     .with_iteration_limit(50)
//!     .with_objective(Objective::Minimize)
//!     .with_seed(3);
//!
//! let result = GaRunner::run(&tsp, &config).unwrap();
//! assert!((result.best_value - 3.0).abs() < 1e-9);
//! ```
//!
//! # Logging
//!
//! Run milestones are emitted through [`tracing`]; install a subscriber to
//! see them. The crate never installs one itself.

pub mod ga;
pub mod problems;
pub mod random;
pub mod sampling;
