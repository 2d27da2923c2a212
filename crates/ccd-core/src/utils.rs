//! Utility functions for working with data slices

/// Sort data and return a new vector
///
/// Handles NaN values by placing them at the end.
///
/// # Examples
///
/// ```rust
/// use ccd_core::utils::sorted;
///
/// let data = vec![3.0, 1.0, 5.0, 2.0, 4.0];
/// assert_eq!(sorted(&data), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
/// ```
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| match (a.is_nan(), b.is_nan()) {
        (true, true) => std::cmp::Ordering::Equal,
        (true, false) => std::cmp::Ordering::Greater,
        (false, true) => std::cmp::Ordering::Less,
        (false, false) => a.total_cmp(b),
    });
    sorted
}

/// Calculate the mean of a slice
///
/// Returns 0.0 for empty slices.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Median of a slice, averaging the two middle values for even lengths
///
/// Returns 0.0 for empty slices.
///
/// # Examples
///
/// ```rust
/// use ccd_core::utils::median;
///
/// assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
/// assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
/// ```
pub fn median(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sorted = sorted(data);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Euclidean (2-) norm of the element-wise difference `predicted - observed`
///
/// Only the overlapping prefix is used when lengths differ.
pub fn residual_norm(predicted: &[f64], observed: &[f64]) -> f64 {
    predicted
        .iter()
        .zip(observed)
        .map(|(p, o)| {
            let diff = p - o;
            diff * diff
        })
        .sum::<f64>()
        .sqrt()
}

/// Whether a sequence of ordinal days is strictly increasing
pub fn strictly_increasing(times: &[i64]) -> bool {
    times.windows(2).all(|pair| pair[0] < pair[1])
}
