//! Generic genetic operators.
//!
//! Operators work in place on chromosome slices so a [`GaProblem`]
//! implementation can call them directly from its `crossover` / `mutate` /
//! `refine` hooks.
//!
//! # Permutation Operators
//!
//! - [`order_crossover`]: prefix-preserving order crossover (OX1), O(n)
//! - [`swap_mutation`]: exchange two random positions, O(1)
//! - [`two_opt`]: segment-reversal local search to a local optimum
//!
//! # Positional Operators
//!
//! - [`single_point_swap`]: exchange tails after one cut point
//! - [`two_point_swap`]: exchange an inclusive segment
//! - [`uniform_swap`]: exchange each position with probability 0.5
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Croes (1958), "A Method for Solving Traveling-Salesman Problems"
//!
//! [`GaProblem`]: super::GaProblem

use rand::Rng;

// ============================================================================
// Permutation crossover
// ============================================================================

/// Order crossover (OX1) with a random cut point.
///
/// Draws `cut` uniformly from `0..n` and rewrites both chromosomes:
/// each keeps its own prefix `[0, cut)` and fills `[cut, n)` with the
/// missing values in the order they appear in the *other* parent. The
/// second child is built from a snapshot of the first parent taken before
/// the first child overwrites it.
///
/// Both inputs must be permutations of `0..n`; the outputs are too.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn order_crossover<R: Rng>(x1: &mut [usize], x2: &mut [usize], rng: &mut R) {
    let n = x1.len();
    assert_eq!(n, x2.len(), "parents must have equal length");
    if n == 0 {
        return;
    }

    let cut = rng.random_range(0..n);
    let snapshot = x1.to_vec();
    order_merge(x1, x2, cut);
    order_merge(x2, &snapshot, cut);
}

/// Merges `donor` onto `target` from position `cut`.
///
/// `target[..cut]` is kept; the remaining slots take, left to right, every
/// value of `donor` not already in that prefix. For example:
///
/// ```
/// use u_genopt::ga::operators::order_merge;
///
/// let mut target = vec![0, 1, 2, 3, 4, 5, 6];
/// let donor = [0, 2, 4, 6, 1, 3, 5];
/// order_merge(&mut target, &donor, 3);
/// assert_eq!(target, vec![0, 1, 2, 4, 6, 3, 5]);
/// ```
pub fn order_merge(target: &mut [usize], donor: &[usize], cut: usize) {
    let n = target.len();
    let mut used = vec![false; n];
    for &v in &target[..cut] {
        used[v] = true;
    }

    let mut pos = cut;
    for &v in donor {
        if !used[v] {
            target[pos] = v;
            pos += 1;
        }
    }
}

// ============================================================================
// Permutation mutation and local search
// ============================================================================

/// Swap mutation: exchange two independently drawn positions.
///
/// The positions may coincide, in which case nothing changes.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<T, R: Rng>(perm: &mut [T], rng: &mut R) {
    let n = perm.len();
    if n == 0 {
        return;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    perm.swap(i, j);
}

/// 2-opt local search on an open path.
///
/// For each start `i` in `0..n-3`, scans every end `j` in `i+3..n` and
/// measures the gain of replacing edges `(x[i], x[i+1])` and
/// `(x[j-1], x[j])` with `(x[i], x[j-1])` and `(x[i+1], x[j])`, which
/// amounts to reversing `x[i+1..j]`. Only the best strictly improving
/// reversal for that `i` is applied before moving to `i + 1`. Sweeps repeat
/// until one full sweep applies nothing.
///
/// `cost(a, b)` is the cost of the edge between locations `a` and `b`.
///
/// Returns `true` if any reversal was applied.
pub fn two_opt<F>(x: &mut [usize], cost: F) -> bool
where
    F: Fn(usize, usize) -> f64,
{
    let n = x.len();
    let mut changed = false;
    let mut improved = true;

    while improved {
        improved = false;
        for i in 0..n.saturating_sub(3) {
            let mut best_gain = 0.0;
            let mut best_end = None;

            for j in (i + 3)..n {
                let gain = two_opt_gain(x, i, j, &cost);
                if gain > best_gain {
                    best_gain = gain;
                    best_end = Some(j);
                }
            }

            if let Some(j) = best_end {
                x[i + 1..j].reverse();
                improved = true;
                changed = true;
            }
        }
    }

    changed
}

/// Cost reduction from reversing `x[i+1..j]`; positive means shorter.
pub fn two_opt_gain<F>(x: &[usize], i: usize, j: usize, cost: F) -> f64
where
    F: Fn(usize, usize) -> f64,
{
    (cost(x[i], x[i + 1]) + cost(x[j - 1], x[j])) - (cost(x[i], x[j - 1]) + cost(x[i + 1], x[j]))
}

// ============================================================================
// Positional crossover
// ============================================================================

/// Exchanges `x1[cut..]` and `x2[cut..]` for a random `cut` in `0..n`.
///
/// # Panics
/// Panics if the chromosomes have different lengths.
pub fn single_point_swap<T, R: Rng>(x1: &mut [T], x2: &mut [T], rng: &mut R) {
    let n = x1.len();
    assert_eq!(n, x2.len(), "parents must have equal length");
    if n == 0 {
        return;
    }
    let cut = rng.random_range(0..n);
    x1[cut..].swap_with_slice(&mut x2[cut..]);
}

/// Exchanges the inclusive segment `[start, end]` between the chromosomes.
///
/// # Panics
/// Panics if the chromosomes have different lengths.
pub fn two_point_swap<T, R: Rng>(x1: &mut [T], x2: &mut [T], rng: &mut R) {
    let n = x1.len();
    assert_eq!(n, x2.len(), "parents must have equal length");
    if n == 0 {
        return;
    }
    let (start, end) = random_segment(n, rng);
    x1[start..=end].swap_with_slice(&mut x2[start..=end]);
}

/// Exchanges each position independently with probability 0.5.
///
/// # Panics
/// Panics if the chromosomes have different lengths.
pub fn uniform_swap<T, R: Rng>(x1: &mut [T], x2: &mut [T], rng: &mut R) {
    assert_eq!(x1.len(), x2.len(), "parents must have equal length");
    for (a, b) in x1.iter_mut().zip(x2.iter_mut()) {
        if rng.random::<f64>() < 0.5 {
            std::mem::swap(a, b);
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick a random segment `[start, end]` within `0..n` where `start <= end`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================
