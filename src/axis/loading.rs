//! Per-item axis loadings and their ranking.

use log::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::describe::AxisDescription;
use super::{Axis, ItemMetrics};
use crate::diagnostics::{DiagnosticKind, DiagnosticReport};
use crate::embed::Embedding;
use crate::error::{Error, Result};
use crate::metrics::pearson;

/// Minimum |loading| for the runner-up item to enter an axis description.
pub const DEFAULT_CONTRAST_THRESHOLD: f64 = 0.3;

/// Default length of a drill-down driver list.
pub const DEFAULT_DRIVER_LIMIT: usize = 10;

/// Correlation of one item with each axis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisLoading {
    /// Item id.
    pub item: String,
    /// Pearson r with the first axis.
    pub x: f64,
    /// Pearson r with the second axis.
    pub y: f64,
    /// Pearson r with the third axis.
    pub z: f64,
}

impl AxisLoading {
    /// Loading on one axis.
    pub fn on(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

/// Axis loading analysis configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLoadingAnalyzer {
    /// |r| the second driver needs to appear in a description.
    contrast_threshold: f64,
    /// Length of [`AxisAnalysis::drivers`].
    driver_limit: usize,
}

impl Default for AxisLoadingAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl AxisLoadingAnalyzer {
    /// Analyzer with the default threshold (0.3) and driver limit (10).
    pub fn new() -> Self {
        Self {
            contrast_threshold: DEFAULT_CONTRAST_THRESHOLD,
            driver_limit: DEFAULT_DRIVER_LIMIT,
        }
    }

    /// Set the runner-up threshold.
    pub fn with_contrast_threshold(mut self, threshold: f64) -> Self {
        self.contrast_threshold = threshold;
        self
    }

    /// Set the drill-down list length.
    pub fn with_driver_limit(mut self, limit: usize) -> Self {
        self.driver_limit = limit;
        self
    }

    /// Correlate every item with every axis of `embedding`.
    ///
    /// Items are processed in ascending id order. Entities an item has no
    /// value for count as 0.
    pub fn analyze(&self, embedding: &Embedding, metrics: &ItemMetrics) -> Result<AxisAnalysis> {
        if !(0.0..=1.0).contains(&self.contrast_threshold) {
            return Err(Error::InvalidParameter {
                name: "contrast_threshold",
                message: "must lie in [0, 1]",
            });
        }

        let coords: [Vec<f64>; 3] = Axis::ALL.map(|axis| embedding.axis_values(axis));

        let mut items: Vec<&String> = metrics.keys().collect();
        items.sort();

        #[cfg(feature = "parallel")]
        let computed: Vec<(AxisLoading, Vec<DiagnosticKind>)> = items
            .par_iter()
            .map(|item| load_item(item, &metrics[*item], embedding, &coords))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let computed: Vec<(AxisLoading, Vec<DiagnosticKind>)> = items
            .iter()
            .map(|item| load_item(item, &metrics[*item], embedding, &coords))
            .collect();

        let mut diagnostics = DiagnosticReport::new();
        let mut loadings = Vec::with_capacity(computed.len());
        for (loading, kinds) in computed {
            for kind in kinds {
                diagnostics.push(kind);
            }
            loadings.push(loading);
        }

        let ranked = Axis::ALL.map(|axis| rank(&loadings, axis));
        let descriptions = Axis::ALL.map(|axis| {
            AxisDescription::from_ranked(
                ranked[axis.index()].iter().map(|&i| &loadings[i]),
                axis,
                self.contrast_threshold,
            )
        });

        debug!(
            "axis loadings: {} items over {} entities; {:?}",
            loadings.len(),
            embedding.len(),
            descriptions
        );

        Ok(AxisAnalysis {
            entities: embedding.ids().to_vec(),
            loadings,
            ranked,
            descriptions,
            driver_limit: self.driver_limit,
            diagnostics,
        })
    }
}

fn load_item(
    item: &str,
    values: &std::collections::HashMap<String, f64>,
    embedding: &Embedding,
    coords: &[Vec<f64>; 3],
) -> (AxisLoading, Vec<DiagnosticKind>) {
    let mut kinds = Vec::new();
    let mut missing = 0;
    let aligned: Vec<f64> = embedding
        .ids()
        .iter()
        .map(|id| match values.get(id) {
            Some(&v) => v,
            None => {
                missing += 1;
                0.0
            }
        })
        .collect();

    if missing > 0 {
        kinds.push(DiagnosticKind::MissingMetric {
            item: item.to_string(),
            missing,
        });
    }
    if aligned.windows(2).all(|w| w[0] == w[1]) {
        kinds.push(DiagnosticKind::ZeroVariance {
            item: item.to_string(),
        });
    }

    let loading = AxisLoading {
        item: item.to_string(),
        x: pearson(&aligned, &coords[0]),
        y: pearson(&aligned, &coords[1]),
        z: pearson(&aligned, &coords[2]),
    };
    (loading, kinds)
}

/// Indices of `loadings` by descending |r| on `axis`; ties keep input order.
fn rank(loadings: &[AxisLoading], axis: Axis) -> Vec<usize> {
    let mut order: Vec<usize> = (0..loadings.len()).collect();
    order.sort_by(|&a, &b| {
        loadings[b]
            .on(axis)
            .abs()
            .total_cmp(&loadings[a].on(axis).abs())
    });
    order
}

/// Loadings, rankings and descriptions for one embedding.
#[derive(Debug, Clone)]
pub struct AxisAnalysis {
    entities: Vec<String>,
    loadings: Vec<AxisLoading>,
    ranked: [Vec<usize>; 3],
    descriptions: [AxisDescription; 3],
    driver_limit: usize,
    diagnostics: DiagnosticReport,
}

impl AxisAnalysis {
    /// Loadings in ascending item id order.
    pub fn loadings(&self) -> &[AxisLoading] {
        &self.loadings
    }

    /// Loading of one item.
    pub fn loading(&self, item: &str) -> Option<&AxisLoading> {
        self.loadings.iter().find(|l| l.item == item)
    }

    /// All items by descending |r| on `axis`.
    pub fn ranked(&self, axis: Axis) -> Vec<&AxisLoading> {
        self.top_drivers(axis, usize::MAX)
    }

    /// The `k` strongest items on `axis`.
    pub fn top_drivers(&self, axis: Axis, k: usize) -> Vec<&AxisLoading> {
        self.ranked[axis.index()]
            .iter()
            .take(k)
            .map(|&i| &self.loadings[i])
            .collect()
    }

    /// The drill-down list for `axis`, capped at the configured driver limit.
    pub fn drivers(&self, axis: Axis) -> Vec<&AxisLoading> {
        self.top_drivers(axis, self.driver_limit)
    }

    /// Description of `axis`.
    pub fn description(&self, axis: Axis) -> &AxisDescription {
        &self.descriptions[axis.index()]
    }

    /// Rendered labels for all three axes, resolving item ids through `names`.
    pub fn labels(&self, names: &std::collections::HashMap<String, String>) -> [String; 3] {
        Axis::ALL.map(|axis| self.description(axis).label(axis, names))
    }

    /// Entity ids the loadings were computed over.
    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    /// Conditions absorbed while correlating.
    pub fn diagnostics(&self) -> &DiagnosticReport {
        &self.diagnostics
    }
}
