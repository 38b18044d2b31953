//! Core type definitions for the GA framework.
//!
//! [`GaProblem`] is the contract between the generic engine and a concrete
//! combinatorial problem; [`Individual`] is the unit the engine breeds.

use rand::Rng;
use std::fmt::Debug;

/// Direction of optimization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Objective {
    /// Higher objective values are better.
    #[default]
    Maximize,
    /// Lower objective values are better.
    Minimize,
}

impl Objective {
    /// Returns `true` if `candidate` is strictly better than `current`.
    pub fn is_better(self, candidate: f64, current: f64) -> bool {
        match self {
            Objective::Maximize => candidate > current,
            Objective::Minimize => candidate < current,
        }
    }
}

/// A candidate solution together with its derived scores.
///
/// `x` always has exactly [`GaProblem::variable_count`] entries. Cloning
/// copies the chromosome, so a clone never shares storage with the original.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual<G> {
    /// The chromosome.
    pub x: Vec<G>,

    /// Raw objective value.
    pub value: f64,

    /// Selection weight after linear rescaling, in `[0.5, 10.5]`.
    ///
    /// Better individuals always receive a higher weight regardless of the
    /// [`Objective`].
    pub scaled_value: f64,

    /// Running sum of `scaled_value` in population order.
    pub cumulative_scaled_value: f64,
}

impl<G> Individual<G> {
    /// Wraps a chromosome with zeroed scores.
    pub fn new(x: Vec<G>) -> Self {
        Self {
            x,
            value: 0.0,
            scaled_value: 0.0,
            cumulative_scaled_value: 0.0,
        }
    }
}

/// Outcome of [`GaProblem::refine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refinement {
    /// The problem has no local search; the chromosome is untouched.
    Unsupported,
    /// Local search ran on the chromosome (it may or may not have changed).
    Applied,
}

/// Defines a combinatorial optimization problem.
///
/// The engine never inspects chromosome contents. Every operator below must
/// keep a chromosome structurally valid: right length, values inside their
/// domains, and for permutation problems no duplicates. Breaking that is a
/// bug in the implementation, not something the engine detects.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_genopt::ga::GaProblem;
///
/// struct OneMax { n: usize }
///
/// impl GaProblem for OneMax {
///     type Gene = bool;
///
///     fn variable_count(&self) -> usize { self.n }
///
///     fn create_chromosome<R: Rng>(&self, rng: &mut R) -> Vec<bool> {
///         (0..self.n).map(|_| rng.random_bool(0.5)).collect()
///     }
///
///     fn evaluate(&self, x: &[bool]) -> f64 {
///         x.iter().filter(|&&b| b).count() as f64
///     }
///
///     fn mutate<R: Rng>(&self, x: &mut [bool], rng: &mut R) {
///         let i = rng.random_range(0..self.n);
///         x[i] = !x[i];
///     }
///
///     fn crossover<R: Rng>(&self, x1: &mut [bool], x2: &mut [bool], rng: &mut R) {
///         let cut = rng.random_range(0..self.n);
///         x1[cut..].swap_with_slice(&mut x2[cut..]);
///     }
/// }
/// ```
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because evaluation may run on rayon
/// workers when the `parallel` feature is enabled.
pub trait GaProblem: Send + Sync {
    /// A single chromosome entry.
    type Gene: Clone + PartialEq + Debug + Send + Sync;

    /// Number of variables in every chromosome.
    fn variable_count(&self) -> usize;

    /// Produces one valid random chromosome.
    fn create_chromosome<R: Rng>(&self, rng: &mut R) -> Vec<Self::Gene>;

    /// Computes the objective value of a chromosome.
    ///
    /// Must be deterministic and free of side effects, and must return a
    /// finite number: the engine rejects NaN and infinities.
    fn evaluate(&self, x: &[Self::Gene]) -> f64;

    /// Perturbs a chromosome in place.
    fn mutate<R: Rng>(&self, x: &mut [Self::Gene], rng: &mut R);

    /// Recombines two chromosomes in place, overwriting both with children.
    fn crossover<R: Rng>(&self, x1: &mut [Self::Gene], x2: &mut [Self::Gene], rng: &mut R);

    /// Improves a chromosome in place with local search.
    ///
    /// Called once on a clone of the best solution after the generation loop.
    /// The default reports [`Refinement::Unsupported`] and leaves `x` alone.
    fn refine(&self, _x: &mut [Self::Gene]) -> Refinement {
        Refinement::Unsupported
    }
}
