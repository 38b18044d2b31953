//! Bounded integer vector problem.

use crate::ga::operators::{single_point_swap, two_point_swap, uniform_swap};
use crate::ga::GaProblem;
use rand::Rng;
use std::fmt;

/// Crossover used by [`IntegerVector`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum IntegerCrossover {
    /// Swap tails after one random cut point.
    #[default]
    SinglePoint,
    /// Swap one random inclusive segment.
    TwoPoint,
    /// Swap each position with probability 0.5.
    Uniform,
}

type ObjectiveFn = dyn Fn(&[u32]) -> f64 + Send + Sync;

/// Vectors of integers where variable `i` ranges over `0..=upper_bounds[i]`.
///
/// The objective defaults to the sum of the values; supply another one with
/// [`with_objective`](Self::with_objective). Mutation resets one random
/// variable to a random value in its domain.
///
/// # Examples
///
/// ```
/// use u_genopt::ga::GaProblem;
/// use u_genopt::problems::{IntegerCrossover, IntegerVector};
///
/// // Knapsack-like score: reward value, penalize going over weight 10.
/// let weights = [3.0, 4.0, 5.0];
/// let values = [4.0, 5.0, 7.0];
/// let problem = IntegerVector::new(vec![1, 1, 1])
///     .with_crossover(IntegerCrossover::Uniform)
///     .with_objective(move |x| {
///         let w: f64 = x.iter().zip(&weights).map(|(&k, w)| k as f64 * w).sum();
///         let v: f64 = x.iter().zip(&values).map(|(&k, v)| k as f64 * v).sum();
///         if w > 10.0 { 0.0 } else { v }
///     });
/// assert_eq!(problem.evaluate(&[1, 0, 1]), 11.0);
/// assert_eq!(problem.evaluate(&[1, 1, 1]), 0.0);
/// ```
pub struct IntegerVector {
    upper_bounds: Vec<u32>,
    crossover: IntegerCrossover,
    objective: Box<ObjectiveFn>,
}

impl IntegerVector {
    /// Creates a problem with one variable per upper bound.
    pub fn new(upper_bounds: Vec<u32>) -> Self {
        Self {
            upper_bounds,
            crossover: IntegerCrossover::default(),
            objective: Box::new(|x: &[u32]| x.iter().map(|&v| f64::from(v)).sum::<f64>()),
        }
    }

    /// Replaces the objective function.
    pub fn with_objective<F>(mut self, objective: F) -> Self
    where
        F: Fn(&[u32]) -> f64 + Send + Sync + 'static,
    {
        self.objective = Box::new(objective);
        self
    }

    /// Selects the crossover operator.
    pub fn with_crossover(mut self, crossover: IntegerCrossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Inclusive upper bound of each variable.
    pub fn upper_bounds(&self) -> &[u32] {
        &self.upper_bounds
    }
}

impl fmt::Debug for IntegerVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntegerVector")
            .field("upper_bounds", &self.upper_bounds)
            .field("crossover", &self.crossover)
            .finish_non_exhaustive()
    }
}

impl GaProblem for IntegerVector {
    type Gene = u32;

    fn variable_count(&self) -> usize {
        self.upper_bounds.len()
    }

    fn create_chromosome<R: Rng>(&self, rng: &mut R) -> Vec<u32> {
        self.upper_bounds
            .iter()
            .map(|&ub| rng.random_range(0..=ub))
            .collect()
    }

    fn evaluate(&self, x: &[u32]) -> f64 {
        (self.objective)(x)
    }

    fn mutate<R: Rng>(&self, x: &mut [u32], rng: &mut R) {
        if x.is_empty() {
            return;
        }
        let i = rng.random_range(0..x.len());
        x[i] = rng.random_range(0..=self.upper_bounds[i]);
    }

    fn crossover<R: Rng>(&self, x1: &mut [u32], x2: &mut [u32], rng: &mut R) {
        match self.crossover {
            IntegerCrossover::SinglePoint => single_point_swap(x1, x2, rng),
            IntegerCrossover::TwoPoint => two_point_swap(x1, x2, rng),
            IntegerCrossover::Uniform => uniform_swap(x1, x2, rng),
        }
    }
}
