//! Symmetric eigen-decomposition by the Jacobi rotation method.
//!
//! Each step finds the largest off-diagonal entry `a_pq` and applies a plane
//! rotation that zeroes it:
//!
//! ```text
//! θ  = ½ · atan2(2·a_pq, a_qq − a_pp)
//! A' = Gᵀ A G,   V' = V G
//! ```
//!
//! where `G` is the identity except for the `(p, q)` plane. Repeating drives
//! the matrix towards diagonal form; the diagonal holds the eigenvalues and
//! the accumulated rotations `V` hold the eigenvectors as columns.
//!
//! Complexity is O(N) per rotation plus an O(N²) pivot search, so this is
//! meant for tens to low hundreds of rows. Reaching `max_iter` before the
//! tolerance is not an error: the best approximation is returned and
//! [`EigenDecomposition::converged`] is false.

use log::{debug, trace, warn};
use ndarray::{Array1, Array2};

use crate::error::{Error, Result};

/// Default off-diagonal magnitude below which the matrix counts as diagonal.
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// Default cap on the number of rotations.
pub const DEFAULT_MAX_ITER: usize = 100;

/// An eigenvalue with its unit-norm eigenvector.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenPair {
    /// Eigenvalue.
    pub value: f64,
    /// Eigenvector, length N.
    pub vector: Array1<f64>,
}

/// Output of [`JacobiSolver::decompose`].
#[derive(Debug, Clone)]
pub struct EigenDecomposition {
    /// Eigenpairs sorted by descending eigenvalue.
    pub pairs: Vec<EigenPair>,
    /// Rotations applied.
    pub iterations: usize,
    /// Largest off-diagonal magnitude left when the solver stopped.
    pub residual: f64,
    /// Whether the residual fell below the tolerance.
    pub converged: bool,
}

impl EigenDecomposition {
    /// Eigenvalues in descending order.
    pub fn values(&self) -> Vec<f64> {
        self.pairs.iter().map(|p| p.value).collect()
    }
}

/// Jacobi eigen-solver configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JacobiSolver {
    /// Convergence tolerance on the largest off-diagonal entry.
    tolerance: f64,
    /// Maximum rotations.
    max_iter: usize,
}

impl Default for JacobiSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl JacobiSolver {
    /// Solver with the default tolerance and iteration cap.
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iter: DEFAULT_MAX_ITER,
        }
    }

    /// Set convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set maximum rotations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Convergence tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Maximum rotations.
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// Diagonalize a real symmetric matrix.
    ///
    /// Only the symmetric part of `a` is meaningful; the caller guarantees
    /// symmetry.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tastemap::embed::JacobiSolver;
    /// use ndarray::array;
    ///
    /// let eig = JacobiSolver::new().decompose(&array![[2.0, 1.0], [1.0, 2.0]]).unwrap();
    /// assert!((eig.pairs[0].value - 3.0).abs() < 1e-8);
    /// assert!((eig.pairs[1].value - 1.0).abs() < 1e-8);
    /// ```
    pub fn decompose(&self, a: &Array2<f64>) -> Result<EigenDecomposition> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(Error::InvalidParameter {
                name: "tolerance",
                message: "must be finite and non-negative",
            });
        }
        let n = a.nrows();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        if a.ncols() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                found: a.ncols(),
            });
        }

        let mut d = a.clone();
        let mut v = Array2::<f64>::eye(n);

        let mut iterations = 0;
        let (mut residual, mut p, mut q) = max_off_diagonal(&d);
        while residual > 0.0 && residual >= self.tolerance && iterations < self.max_iter {
            rotate(&mut d, &mut v, p, q);
            iterations += 1;
            trace!("jacobi rotation {iterations}: pivot ({p}, {q}) = {residual:.3e}");
            (residual, p, q) = max_off_diagonal(&d);
        }
        // A zero pivot on a 1×1 or already-diagonal input counts as converged.
        let converged = residual < self.tolerance || residual == 0.0;

        if converged {
            debug!("jacobi converged: n={n}, rotations={iterations}, residual={residual:.3e}");
        } else {
            warn!(
                "jacobi hit iteration cap: n={n}, rotations={iterations}, residual={residual:.3e}"
            );
        }

        let mut pairs: Vec<EigenPair> = (0..n)
            .map(|i| EigenPair {
                value: d[[i, i]],
                vector: v.column(i).to_owned(),
            })
            .collect();
        pairs.sort_by(|x, y| y.value.total_cmp(&x.value));

        Ok(EigenDecomposition {
            pairs,
            iterations,
            residual,
            converged,
        })
    }
}

/// Largest `|a_ij|` above the diagonal with its position.
fn max_off_diagonal(a: &Array2<f64>) -> (f64, usize, usize) {
    let n = a.nrows();
    let (mut best, mut p, mut q) = (0.0, 0, 0);
    for i in 0..n {
        for j in (i + 1)..n {
            let m = a[[i, j]].abs();
            if m > best {
                best = m;
                p = i;
                q = j;
            }
        }
    }
    (best, p, q)
}

/// Apply the rotation that zeroes `d[p, q]` to `d` (both sides) and `v` (columns).
fn rotate(d: &mut Array2<f64>, v: &mut Array2<f64>, p: usize, q: usize) {
    let n = d.nrows();
    let app = d[[p, p]];
    let aqq = d[[q, q]];
    let apq = d[[p, q]];

    let theta = 0.5 * (2.0 * apq).atan2(aqq - app);
    let (s, c) = theta.sin_cos();

    for k in 0..n {
        if k == p || k == q {
            continue;
        }
        let akp = d[[k, p]];
        let akq = d[[k, q]];
        let new_kp = c * akp - s * akq;
        let new_kq = s * akp + c * akq;
        d[[k, p]] = new_kp;
        d[[p, k]] = new_kp;
        d[[k, q]] = new_kq;
        d[[q, k]] = new_kq;
    }

    d[[p, p]] = c * c * app - 2.0 * s * c * apq + s * s * aqq;
    d[[q, q]] = s * s * app + 2.0 * s * c * apq + c * c * aqq;
    d[[p, q]] = 0.0;
    d[[q, p]] = 0.0;

    for k in 0..n {
        let vkp = v[[k, p]];
        let vkq = v[[k, q]];
        v[[k, p]] = c * vkp - s * vkq;
        v[[k, q]] = s * vkp + c * vkq;
    }
}
