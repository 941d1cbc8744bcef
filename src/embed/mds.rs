//! Classical (Torgerson) multidimensional scaling.
//!
//! # Algorithm
//!
//! ```text
//! 1. Square the dissimilarities element-wise: D²
//! 2. Double-center: B = -½ (D² - row means - column means + grand mean)
//! 3. Eigen-decompose B (Jacobi), eigenvalues descending
//! 4. Axis k coordinate of entity i = v_k[i] · sqrt(λ_k) when λ_k > 0, else 0
//! 5. Variance explained = 100 · (λ⁺₁ + λ⁺₂) / Σ λ⁺
//! ```
//!
//! The first three axes are kept. For a Euclidean input the recovered
//! configuration reproduces the input distances exactly once enough axes are
//! kept; for non-Euclidean inputs (rank divergences rarely are) the negative
//! eigenvalues are discarded.
//!
//! The embedding is unique only up to rotation and a sign flip per axis. Two
//! runs may mirror an axis; nothing here picks a canonical orientation.

use log::debug;
use ndarray::Array1;

use super::jacobi::{EigenDecomposition, JacobiSolver};
use crate::axis::Axis;
use crate::diagnostics::{DiagnosticKind, DiagnosticReport};
use crate::error::{Error, Result};
use crate::matrix::{DissimilarityMatrix, MIN_ENTITIES};

/// One entity's coordinates on the three principal axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmbeddingPoint {
    /// First principal axis.
    pub x: f64,
    /// Second principal axis.
    pub y: f64,
    /// Third principal axis.
    pub z: f64,
}

impl EmbeddingPoint {
    /// Coordinate on one axis.
    pub fn on(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Distance to another point over all three axes.
    pub fn distance(&self, other: &EmbeddingPoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2) + (self.z - other.z).powi(2))
            .sqrt()
    }

    /// Distance to another point in the (x, y) plane.
    pub fn planar_distance(&self, other: &EmbeddingPoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Distance from the origin, i.e. from the group consensus.
    pub fn norm(&self) -> f64 {
        self.distance(&EmbeddingPoint::default())
    }
}

/// Result of one MDS run.
#[derive(Debug, Clone)]
pub struct Embedding {
    ids: Vec<String>,
    points: Vec<EmbeddingPoint>,
    eigenvalues: Vec<f64>,
    variance_explained: f64,
    iterations: usize,
    residual: f64,
    diagnostics: DiagnosticReport,
}

impl Embedding {
    /// Entity ids, aligned with [`points`](Self::points).
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// One point per entity.
    pub fn points(&self) -> &[EmbeddingPoint] {
        &self.points
    }

    /// Number of embedded entities.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if nothing was embedded (never the case for a fitted embedding).
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Row index of an entity.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|x| x == id)
    }

    /// Coordinates of an entity by id.
    pub fn point(&self, id: &str) -> Option<&EmbeddingPoint> {
        self.index_of(id).map(|i| &self.points[i])
    }

    /// Pairs of (id, point) in entity order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EmbeddingPoint)> {
        self.ids.iter().map(String::as_str).zip(self.points.iter())
    }

    /// Per-entity coordinates along one axis.
    pub fn axis_values(&self, axis: Axis) -> Vec<f64> {
        self.points.iter().map(|p| p.on(axis)).collect()
    }

    /// Every eigenvalue of the Gram matrix, descending.
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }

    /// Share of positive spectral mass captured by the first two axes, in percent.
    pub fn variance_explained(&self) -> f64 {
        self.variance_explained
    }

    /// [`variance_explained`](Self::variance_explained) rounded to a whole percent.
    pub fn variance_explained_percent(&self) -> u32 {
        self.variance_explained.round() as u32
    }

    /// Jacobi rotations spent.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Largest off-diagonal magnitude the solver left behind.
    pub fn residual(&self) -> f64 {
        self.residual
    }

    /// Conditions absorbed during the fit.
    pub fn diagnostics(&self) -> &DiagnosticReport {
        &self.diagnostics
    }

    /// Distance of entity `i` from the origin over all three axes.
    pub fn distance_from_origin(&self, i: usize) -> Option<f64> {
        self.points.get(i).map(EmbeddingPoint::norm)
    }

    /// Distance of entity `i` from the origin in the (x, y) plane.
    pub fn planar_distance_from_origin(&self, i: usize) -> Option<f64> {
        self.points
            .get(i)
            .map(|p| p.planar_distance(&EmbeddingPoint::default()))
    }

    /// True when every entity sits at the origin (perfect agreement).
    pub fn is_consensus(&self) -> bool {
        self.points
            .iter()
            .all(|p| p.x == 0.0 && p.y == 0.0 && p.z == 0.0)
    }
}

/// Classical MDS runner.
///
/// ```rust
/// use tastemap::{ClassicalMds, DissimilarityMatrix, JacobiSolver};
/// use ndarray::array;
///
/// let d = DissimilarityMatrix::new(
///     vec!["a".into(), "b".into(), "c".into()],
///     array![[0.0, 3.0, 4.0], [3.0, 0.0, 5.0], [4.0, 5.0, 0.0]],
/// ).unwrap();
///
/// let embedding = ClassicalMds::new()
///     .with_solver(JacobiSolver::new().with_max_iter(200))
///     .fit(&d)
///     .unwrap();
///
/// // A 3-4-5 triangle is planar: two axes explain everything.
/// assert_eq!(embedding.variance_explained_percent(), 100);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicalMds {
    solver: JacobiSolver,
}

impl ClassicalMds {
    /// MDS with the default Jacobi solver.
    pub fn new() -> Self {
        Self {
            solver: JacobiSolver::new(),
        }
    }

    /// Use a differently configured eigen-solver.
    pub fn with_solver(mut self, solver: JacobiSolver) -> Self {
        self.solver = solver;
        self
    }

    /// Embed the entities of `d` into three dimensions.
    pub fn fit(&self, d: &DissimilarityMatrix) -> Result<Embedding> {
        let n = d.len();
        if n < MIN_ENTITIES {
            return Err(Error::InvalidInputSize {
                found: n,
                min: MIN_ENTITIES,
            });
        }

        let gram = d.gram();
        let eig = self.solver.decompose(&gram)?;

        let mut diagnostics = DiagnosticReport::new();
        if !eig.converged {
            diagnostics.push(DiagnosticKind::NonConvergence {
                iterations: eig.iterations,
                residual: eig.residual,
            });
        }

        let coords: Vec<Array1<f64>> = Axis::ALL
            .iter()
            .map(|&axis| axis_coordinates(&eig, axis, n, &mut diagnostics))
            .collect();

        let variance_explained = variance_explained(&eig.values(), &mut diagnostics);

        let points = (0..n)
            .map(|i| EmbeddingPoint {
                x: coords[0][i],
                y: coords[1][i],
                z: coords[2][i],
            })
            .collect();

        debug!(
            "mds: n={n}, rotations={}, variance_explained={variance_explained:.1}%",
            eig.iterations
        );

        Ok(Embedding {
            ids: d.ids().to_vec(),
            points,
            eigenvalues: eig.values(),
            variance_explained,
            iterations: eig.iterations,
            residual: eig.residual,
            diagnostics,
        })
    }
}

fn axis_coordinates(
    eig: &EigenDecomposition,
    axis: Axis,
    n: usize,
    diagnostics: &mut DiagnosticReport,
) -> Array1<f64> {
    match eig.pairs.get(axis.index()) {
        Some(pair) if pair.value > 0.0 => &pair.vector * pair.value.sqrt(),
        other => {
            diagnostics.push(DiagnosticKind::DegenerateAxis {
                axis,
                eigenvalue: other.map(|p| p.value),
            });
            Array1::zeros(n)
        }
    }
}

/// Percent of positive spectral mass carried by the two largest eigenvalues.
///
/// Defined as 100 when fewer than two eigenvalues are positive.
pub fn variance_explained(eigenvalues_desc: &[f64], diagnostics: &mut DiagnosticReport) -> f64 {
    let positive: Vec<f64> = eigenvalues_desc
        .iter()
        .copied()
        .filter(|&v| v > 0.0)
        .collect();
    let total: f64 = positive.iter().sum();

    if positive.len() < 2 || total <= 0.0 {
        diagnostics.push(DiagnosticKind::TrivialVariance {
            positive: positive.len(),
        });
        return 100.0;
    }
    (100.0 * (positive[0] + positive[1]) / total).clamp(0.0, 100.0)
}
