//! Axis interpretation: which items drive each embedding axis.
//!
//! After [`ClassicalMds`](crate::embed::ClassicalMds) places raters in space,
//! the axes themselves carry no names. This module correlates each item's
//! per-rater values (e.g. the rank every rater gave a song) with the
//! per-rater coordinates on each axis:
//!
//! ```text
//! loading(item, axis) = pearson(values(item), coordinates(axis))
//! ```
//!
//! Items with the largest |loading| are the axis "drivers". The top two
//! drivers give the axis a readable description:
//!
//! | Second driver | Description |
//! |---------------|-------------|
//! | none, or \|r\| < 0.3 | polarized by the top item |
//! | \|r\| ≥ 0.3, opposite sign | top item *vs* second item |
//! | \|r\| ≥ 0.3, same sign | driven by both |
//!
//! Raters missing a value for an item count as 0 for that item, so sparse
//! metrics still produce loadings.
//!
//! ## Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use tastemap::axis::{Axis, AxisLoadingAnalyzer, ItemMetrics};
//! use tastemap::{ClassicalMds, DissimilarityMatrix};
//! use ndarray::array;
//!
//! let d = DissimilarityMatrix::new(
//!     vec!["a".into(), "b".into(), "c".into()],
//!     array![[0.0, 1.0, 4.0], [1.0, 0.0, 3.0], [4.0, 3.0, 0.0]],
//! ).unwrap();
//! let embedding = ClassicalMds::new().fit(&d).unwrap();
//!
//! let mut metrics: ItemMetrics = HashMap::new();
//! metrics.insert(
//!     "song".into(),
//!     [("a".to_string(), 1.0), ("b".to_string(), 2.0), ("c".to_string(), 9.0)]
//!         .into_iter()
//!         .collect(),
//! );
//!
//! let axes = AxisLoadingAnalyzer::new().analyze(&embedding, &metrics).unwrap();
//! assert!(axes.loading("song").unwrap().on(Axis::X).abs() > 0.9);
//! ```

mod contribution;
mod describe;
mod loading;

use std::collections::HashMap;

pub use contribution::ItemContribution;
pub use describe::AxisDescription;
pub use loading::{AxisAnalysis, AxisLoading, AxisLoadingAnalyzer};

/// Item id → (entity id → value).
pub type ItemMetrics = HashMap<String, HashMap<String, f64>>;

/// One of the three embedding axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// First principal axis (largest eigenvalue).
    X,
    /// Second principal axis.
    Y,
    /// Third principal axis.
    Z,
}

impl Axis {
    /// All axes in eigenvalue order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position in eigenvalue order.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Principal-component label ("PC1", "PC2", "PC3").
    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "PC1",
            Axis::Y => "PC2",
            Axis::Z => "PC3",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
