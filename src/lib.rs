//! # tastemap
//!
//! Spatial layout of raters from a pairwise taste-divergence matrix, plus the
//! items that explain each axis of that layout.
//!
//! - [`embed`]: from-scratch Jacobi eigen-solver and classical (Torgerson) MDS
//! - [`axis`]: per-item Pearson loadings, driver rankings, axis descriptions
//! - [`metrics`]: correlation and distance helpers
//! - [`diagnostics`]: non-fatal conditions absorbed along the way
//!
//! Everything is a pure, synchronous computation over in-memory arrays; no
//! state survives between calls.
//!
//! ```rust
//! use std::collections::HashMap;
//! use tastemap::{analyze, Axis, DissimilarityMatrix, ItemMetrics};
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
//! let mut ranks: ItemMetrics = HashMap::new();
//! ranks.insert(
//!     "song".into(),
//!     [("ann", 1.0), ("bo", 2.0), ("cy", 9.0), ("di", 10.0)]
//!         .into_iter()
//!         .map(|(k, v)| (k.to_string(), v))
//!         .collect(),
//! );
//!
//! let map = analyze(&d, &ranks).unwrap();
//! assert_eq!(map.embedding.len(), 4);
//! assert_eq!(map.axes.ranked(Axis::X)[0].item, "song");
//! ```

pub mod axis;
pub mod diagnostics;
pub mod embed;
/// Error types used across `tastemap`.
pub mod error;
pub mod matrix;
pub mod metrics;

#[cfg(test)]
mod pipeline_tests;

pub use axis::{
    Axis, AxisAnalysis, AxisDescription, AxisLoading, AxisLoadingAnalyzer, ItemContribution,
    ItemMetrics,
};
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticReport, Severity};
pub use embed::{
    ClassicalMds, EigenDecomposition, EigenPair, Embedding, EmbeddingPoint, JacobiSolver,
};
pub use error::{Error, Result};
pub use matrix::DissimilarityMatrix;
pub use metrics::pearson;

/// Embedding and axis analysis for one divergence matrix.
#[derive(Debug, Clone)]
pub struct TasteMap {
    /// Per-entity coordinates and variance explained.
    pub embedding: Embedding,
    /// Item loadings and axis descriptions.
    pub axes: AxisAnalysis,
}

impl TasteMap {
    /// Diagnostics from both stages, embedding first.
    pub fn diagnostics(&self) -> DiagnosticReport {
        let mut report = self.embedding.diagnostics().clone();
        report.extend(self.axes.diagnostics());
        report
    }
}

/// Run MDS and axis analysis with default settings.
pub fn analyze(matrix: &DissimilarityMatrix, metrics: &ItemMetrics) -> Result<TasteMap> {
    let embedding = ClassicalMds::new().fit(matrix)?;
    let axes = AxisLoadingAnalyzer::new().analyze(&embedding, metrics)?;
    Ok(TasteMap { embedding, axes })
}
