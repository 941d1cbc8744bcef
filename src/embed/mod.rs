//! Spatial embedding of entities from pairwise dissimilarities.
//!
//! ## Pipeline
//!
//! ```text
//! DissimilarityMatrix ──square──▶ D² ──double-center──▶ Gram B
//!        ──Jacobi──▶ eigenpairs (descending) ──scale by √λ──▶ (x, y, z) per entity
//! ```
//!
//! ## Eigen-solver
//!
//! [`JacobiSolver`] is a max-pivot Jacobi rotation solver written for small
//! dense symmetric matrices (rater counts in the tens to low hundreds):
//!
//! | Aspect | Jacobi |
//! |--------|--------|
//! | Accuracy | all eigenpairs, orthonormal vectors |
//! | Cost | O(N²) pivot search per rotation |
//! | Stopping | off-diagonal < tolerance, or rotation cap |
//!
//! Hitting the rotation cap returns the best approximation and records a
//! [`DiagnosticKind::NonConvergence`](crate::diagnostics::DiagnosticKind).
//!
//! ## Classical MDS
//!
//! [`ClassicalMds`] keeps the three leading axes and reports the share of
//! positive spectral mass carried by the first two. For a perfect-agreement
//! matrix (all zeros) every point lands on the origin and the share is 100%.
//!
//! ## Usage
//!
//! ```rust
//! use tastemap::embed::ClassicalMds;
//! use tastemap::DissimilarityMatrix;
//! use ndarray::array;
//!
//! let d = DissimilarityMatrix::new(
//!     vec!["ann".into(), "bo".into(), "cy".into(), "di".into()],
//!     array![
//!         [0.0, 1.0, 10.0, 10.0],
//!         [1.0, 0.0, 10.0, 10.0],
//!         [10.0, 10.0, 0.0, 1.0],
//!         [10.0, 10.0, 1.0, 0.0],
//!     ],
//! ).unwrap();
//!
//! let embedding = ClassicalMds::new().fit(&d).unwrap();
//! let ann = embedding.point("ann").unwrap();
//! let cy = embedding.point("cy").unwrap();
//! assert!(ann.distance(cy) > 8.0);
//! assert!(embedding.variance_explained() > 95.0);
//! ```

pub mod jacobi;
mod mds;

pub use jacobi::{EigenDecomposition, EigenPair, JacobiSolver};
pub use mds::{variance_explained, ClassicalMds, Embedding, EmbeddingPoint};
