//! Sampling without replacement.

use rand::Rng;

/// A shrinking pool of values that are drawn uniformly without replacement.
///
/// Each draw picks a random remaining slot and fills the hole with the last
/// value (`swap_remove`), so a draw costs O(1). The order of the remaining
/// values is unspecified.
///
/// # Examples
///
/// ```
/// use u_genopt::random::create_rng;
/// use u_genopt::sampling::SamplePool;
///
/// let mut rng = create_rng(42);
/// let mut pool = SamplePool::new(vec![0usize, 1, 2, 3, 4]);
/// let mut perm = pool.draw_all(&mut rng);
/// assert!(pool.is_empty());
/// perm.sort_unstable();
/// assert_eq!(perm, vec![0, 1, 2, 3, 4]);
/// ```
#[derive(Debug, Clone)]
pub struct SamplePool<T> {
    values: Vec<T>,
}

impl<T> SamplePool<T> {
    /// Creates a pool holding `values`.
    pub fn new(values: impl Into<Vec<T>>) -> Self {
        Self {
            values: values.into(),
        }
    }

    /// Number of values not yet drawn.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` once every value has been drawn.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Removes and returns one uniformly chosen remaining value.
    ///
    /// Returns `None` when the pool is exhausted.
    pub fn draw_one<R: Rng>(&mut self, rng: &mut R) -> Option<T> {
        if self.values.is_empty() {
            return None;
        }
        let i = rng.random_range(0..self.values.len());
        Some(self.values.swap_remove(i))
    }

    /// Draws every remaining value, returning them in draw order.
    ///
    /// The result is a uniformly random permutation of the remaining values
    /// and the pool is empty afterwards.
    pub fn draw_all<R: Rng>(&mut self, rng: &mut R) -> Vec<T> {
        let mut drawn = Vec::with_capacity(self.values.len());
        while let Some(value) = self.draw_one(rng) {
            drawn.push(value);
        }
        drawn
    }
}
