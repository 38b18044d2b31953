//! Binary search over a cumulative-weight sequence.

/// Finds the element bracketing `key` in an ascending cumulative sequence.
///
/// `cumulative` extracts the running weight of each item; the extracted
/// values must be non-decreasing in slice order. With `key` drawn uniformly
/// from `[0, total)` this is a roulette-wheel draw.
///
/// Resolution rules:
///
/// - empty slice → `None`
/// - `key` below the first weight → index `0`
/// - `key` above the last weight → the last index (floating-point fallback;
///   a correctly drawn key never gets here)
/// - otherwise the search narrows to a bracketing pair `(lo, hi)`; `hi` is
///   returned when its weight equals `key` exactly, else `lo`
///
/// # Complexity
/// O(log n)
///
/// # Examples
///
/// ```
/// use u_genopt::sampling::seek_lower_bound;
///
/// let weights = [1.0, 3.0, 6.0];
/// assert_eq!(seek_lower_bound(&weights, 0.0, |w| *w), Some(0));
/// assert_eq!(seek_lower_bound(&weights, 3.0, |w| *w), Some(1));
/// assert_eq!(seek_lower_bound(&weights, 4.5, |w| *w), Some(1));
/// ```
pub fn seek_lower_bound<T, F>(items: &[T], key: f64, cumulative: F) -> Option<usize>
where
    F: Fn(&T) -> f64,
{
    if items.is_empty() {
        return None;
    }

    let mut lo = 0;
    let mut hi = items.len() - 1;

    if key > cumulative(&items[hi]) {
        return Some(hi);
    }
    if key < cumulative(&items[lo]) {
        return Some(lo);
    }

    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if cumulative(&items[mid]) > key {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    if key == cumulative(&items[hi]) {
        Some(hi)
    } else {
        Some(lo)
    }
}
