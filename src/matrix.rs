//! Dissimilarity matrices and double-centering.
//!
//! A [`DissimilarityMatrix`] is a dense `N × N` array paired with an ordered
//! list of entity ids, so rows can never be ragged and index ↔ id translation
//! is explicit. Construction validates every structural invariant:
//!
//! - at least two entities, ids unique
//! - every entry finite and non-negative
//! - zero diagonal
//! - `d(i, j) == d(j, i)` up to a relative tolerance
//!
//! A malformed matrix would otherwise produce silently wrong geometry, so it
//! is rejected up front.

use std::collections::{HashMap, HashSet};

use ndarray::Array2;

use crate::error::{Error, Result};

/// Minimum number of entities an embedding needs.
pub const MIN_ENTITIES: usize = 2;

/// Relative tolerance for the symmetry and zero-diagonal checks.
pub const SYMMETRY_TOL: f64 = 1e-9;

/// Square, symmetric, zero-diagonal matrix of pairwise dissimilarities.
#[derive(Debug, Clone, PartialEq)]
pub struct DissimilarityMatrix {
    ids: Vec<String>,
    values: Array2<f64>,
}

impl DissimilarityMatrix {
    /// Build from ordered entity ids and a dense matrix.
    ///
    /// Row/column `i` of `values` belongs to `ids[i]`.
    pub fn new(ids: Vec<String>, values: Array2<f64>) -> Result<Self> {
        let n = ids.len();
        if n < MIN_ENTITIES {
            return Err(Error::InvalidInputSize {
                found: n,
                min: MIN_ENTITIES,
            });
        }
        if values.nrows() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                found: values.nrows(),
            });
        }
        if values.ncols() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                found: values.ncols(),
            });
        }

        let mut seen = HashSet::with_capacity(n);
        for id in &ids {
            if !seen.insert(id.as_str()) {
                return Err(Error::DuplicateEntity(id.clone()));
            }
        }

        validate(&values)?;
        Ok(Self { ids, values })
    }

    /// Build from the nested `id -> id -> value` mapping a statistics
    /// service hands out.
    ///
    /// Ids are ordered ascending. A missing diagonal entry is read as 0; a
    /// missing off-diagonal pair is an error, and so is an inner key with
    /// no row of its own.
    pub fn from_nested(nested: &HashMap<String, HashMap<String, f64>>) -> Result<Self> {
        let mut ids: Vec<String> = nested.keys().cloned().collect();
        ids.sort();

        let n = ids.len();
        let mut values = Array2::zeros((n, n));
        for (i, row_id) in ids.iter().enumerate() {
            let row = &nested[row_id];
            if let Some(stray) = row
                .keys()
                .filter(|k| !nested.contains_key(k.as_str()))
                .min()
            {
                return Err(Error::UnknownEntity(stray.clone()));
            }
            for (j, col_id) in ids.iter().enumerate() {
                match row.get(col_id) {
                    Some(&v) => values[[i, j]] = v,
                    None if i == j => {}
                    None => {
                        return Err(Error::MissingEntry {
                            row: row_id.clone(),
                            col: col_id.clone(),
                        })
                    }
                }
            }
        }

        Self::new(ids, values)
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always false: construction requires at least two entities.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Entity ids in row order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Row index of an entity.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|x| x == id)
    }

    /// Dissimilarity between two entities by id.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        Some(self.values[[self.index_of(a)?, self.index_of(b)?]])
    }

    /// The dense matrix.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Inner-product matrix `B = -½ J D² J` (see [`double_center`]).
    pub fn gram(&self) -> Array2<f64> {
        double_center(&self.values.mapv(|v| v * v))
    }
}

fn validate(values: &Array2<f64>) -> Result<()> {
    let n = values.nrows();
    for i in 0..n {
        for j in 0..n {
            let v = values[[i, j]];
            if !v.is_finite() || v < 0.0 {
                return Err(Error::InvalidDissimilarity {
                    row: i,
                    col: j,
                    value: v,
                });
            }
        }
    }

    let scale = values.iter().cloned().fold(1.0_f64, f64::max);
    let tol = SYMMETRY_TOL * scale;

    for i in 0..n {
        let d = values[[i, i]];
        if d > tol {
            return Err(Error::NonZeroDiagonal { index: i, value: d });
        }
        for j in (i + 1)..n {
            let upper = values[[i, j]];
            let lower = values[[j, i]];
            if (upper - lower).abs() > tol {
                return Err(Error::NotSymmetric {
                    row: i,
                    col: j,
                    upper,
                    lower,
                });
            }
        }
    }
    Ok(())
}

/// Double-center a square matrix of squared distances.
///
/// ```text
/// b_ij = -½ (d²_ij - r̄_i - c̄_j + ḡ)
/// ```
///
/// where `r̄_i` is the mean of row `i`, `c̄_j` the mean of column `j` and `ḡ`
/// the grand mean. The result approximates the inner products of points in
/// the latent metric space.
pub fn double_center(squared: &Array2<f64>) -> Array2<f64> {
    let n = squared.nrows();
    if n == 0 {
        return Array2::zeros((0, 0));
    }
    let nf = n as f64;

    let row_means: Vec<f64> = squared.rows().into_iter().map(|r| r.sum() / nf).collect();
    let col_means: Vec<f64> = squared
        .columns()
        .into_iter()
        .map(|c| c.sum() / nf)
        .collect();
    let grand = row_means.iter().sum::<f64>() / nf;

    Array2::from_shape_fn((n, n), |(i, j)| {
        -0.5 * (squared[[i, j]] - row_means[i] - col_means[j] + grand)
    })
}
