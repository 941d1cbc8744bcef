//! Association metrics shared by the embedding and axis analysis.
//!
//! # Metrics Overview
//!
//! | Metric | Range | Degenerate input |
//! |--------|-------|------------------|
//! | [`mean`] | ℝ | empty → 0 |
//! | [`pearson`] | [-1, 1] | constant, empty or mismatched → 0 |
//! | [`euclidean`] | [0, ∞) | mismatched → over the shorter prefix |
//!
//! Degenerate inputs return a neutral value instead of an error: a rater
//! group in perfect agreement produces constant vectors, and that is normal
//! data, not a failure.
//!
//! # Example
//!
//! ```rust
//! use tastemap::metrics::pearson;
//!
//! let ranks = [1.0, 2.0, 3.0, 4.0];
//! let coords = [0.5, 1.0, 1.5, 2.0];
//! assert!((pearson(&ranks, &coords) - 1.0).abs() < 1e-12);
//! ```

/// Arithmetic mean, 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Pearson correlation coefficient between two equal-length sequences.
///
/// ```text
/// r = Σ(x - x̄)(y - ȳ) / sqrt(Σ(x - x̄)² · Σ(y - ȳ)²)
/// ```
///
/// Returns 0 when either sequence has zero variance, when the lengths
/// differ, or when the input is empty. The result is clamped to `[-1, 1]`.
///
/// # Example
///
/// ```rust
/// use tastemap::metrics::pearson;
///
/// let x = [3.0, 1.0, 2.0];
/// let neg: Vec<f64> = x.iter().map(|v| -v).collect();
/// assert!((pearson(&x, &neg) + 1.0).abs() < 1e-12);
///
/// // Constant input has no variance to correlate with.
/// assert_eq!(pearson(&x, &[5.0, 5.0, 5.0]), 0.0);
/// ```
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n == 0 || n != y.len() {
        return 0.0;
    }

    let mx = mean(x);
    let my = mean(y);

    let mut num = 0.0;
    let mut dx2 = 0.0;
    let mut dy2 = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mx;
        let dy = yi - my;
        num += dx * dy;
        dx2 += dx * dx;
        dy2 += dy * dy;
    }

    if dx2 == 0.0 || dy2 == 0.0 {
        return 0.0;
    }
    (num / (dx2 * dy2).sqrt()).clamp(-1.0, 1.0)
}

/// Euclidean distance between two points.
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
