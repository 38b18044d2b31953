//! Permutation-encoded routing problem.

use crate::ga::operators::{order_crossover, swap_mutation, two_opt};
use crate::ga::{GaProblem, Refinement};
use crate::sampling::SamplePool;
use rand::Rng;

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Location {
    /// Creates a location at `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Location) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Shortest visiting order over a set of locations.
///
/// A chromosome is a permutation of location indices `0..n`. Its value is
/// the length of the **open** path through them: the sum of distances
/// between consecutive entries, with no edge back from the last location to
/// the first. To score a closed tour, repeat the start location at the end
/// of the input.
///
/// Pairwise distances are computed once in [`new`](Self::new).
///
/// Operators:
///
/// - seed: uniform random permutation via [`SamplePool`]
/// - crossover: [`order_crossover`]
/// - mutation: [`swap_mutation`]
/// - refine: [`two_opt`]
#[derive(Debug, Clone)]
pub struct Tsp {
    n: usize,
    distances: Vec<f64>,
    indices: Vec<usize>,
}

impl Tsp {
    /// Builds the problem and its `n × n` distance matrix.
    pub fn new(locations: &[Location]) -> Self {
        let n = locations.len();
        let mut distances = vec![0.0; n * n];
        for (i, a) in locations.iter().enumerate() {
            for (j, b) in locations.iter().enumerate() {
                if i != j {
                    distances[i * n + j] = a.distance(b);
                }
            }
        }
        Self {
            n,
            distances,
            indices: (0..n).collect(),
        }
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns `true` if there are no locations.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Precomputed distance between locations `a` and `b`.
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        self.distances[a * self.n + b]
    }
}

impl GaProblem for Tsp {
    type Gene = usize;

    fn variable_count(&self) -> usize {
        self.n
    }

    fn create_chromosome<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        SamplePool::new(self.indices.as_slice()).draw_all(rng)
    }

    fn evaluate(&self, x: &[usize]) -> f64 {
        x.windows(2).map(|w| self.distance(w[1], w[0])).sum()
    }

    fn mutate<R: Rng>(&self, x: &mut [usize], rng: &mut R) {
        swap_mutation(x, rng);
    }

    fn crossover<R: Rng>(&self, x1: &mut [usize], x2: &mut [usize], rng: &mut R) {
        order_crossover(x1, x2, rng);
    }

    fn refine(&self, x: &mut [usize]) -> Refinement {
        two_opt(x, |a, b| self.distance(a, b));
        Refinement::Applied
    }
}
