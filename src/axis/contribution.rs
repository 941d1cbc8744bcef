//! Per-entity position breakdown.
//!
//! For one rater, each item contributes to each axis in proportion to the
//! item's loading and to how far the rater's value sits from the item mean:
//!
//! ```text
//! contribution(item, axis) = loading(item, axis) · (value − mean(item))
//! ```
//!
//! The mean runs over every value recorded for the item, so it matches what
//! the rater sees as "the community average" for that item.

use super::loading::AxisAnalysis;
use super::{Axis, ItemMetrics};
use crate::error::{Error, Result};
use crate::metrics::mean;

/// How one item moves one entity along each axis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemContribution {
    /// Item id.
    pub item: String,
    /// The entity's value for the item.
    pub value: f64,
    /// Mean value for the item over every entity that has one.
    pub mean: f64,
    /// `value - mean`.
    pub deviation: f64,
    /// Contribution along the first axis.
    pub x: f64,
    /// Contribution along the second axis.
    pub y: f64,
    /// Contribution along the third axis.
    pub z: f64,
}

impl ItemContribution {
    /// Contribution along one axis.
    pub fn on(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

impl AxisAnalysis {
    /// Break down where `entity` sits, item by item.
    ///
    /// Only items the entity has a value for are listed, ordered by
    /// descending `|x| + |y|` contribution.
    pub fn contributions(
        &self,
        entity: &str,
        metrics: &ItemMetrics,
    ) -> Result<Vec<ItemContribution>> {
        if !self.entities().iter().any(|e| e == entity) {
            return Err(Error::UnknownEntity(entity.to_string()));
        }

        let mut out: Vec<ItemContribution> = self
            .loadings()
            .iter()
            .filter_map(|loading| {
                let values = metrics.get(&loading.item)?;
                let value = *values.get(entity)?;
                let all: Vec<f64> = values.values().copied().collect();
                let item_mean = mean(&all);
                let deviation = value - item_mean;
                Some(ItemContribution {
                    item: loading.item.clone(),
                    value,
                    mean: item_mean,
                    deviation,
                    x: loading.x * deviation,
                    y: loading.y * deviation,
                    z: loading.z * deviation,
                })
            })
            .collect();

        out.sort_by(|a, b| {
            let ta = a.x.abs() + a.y.abs();
            let tb = b.x.abs() + b.y.abs();
            tb.total_cmp(&ta)
        });
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisLoadingAnalyzer;
    use crate::embed::ClassicalMds;
    use crate::matrix::DissimilarityMatrix;
    use ndarray::array;
    use std::collections::HashMap;

    fn setup() -> (AxisAnalysis, ItemMetrics) {
        let d = DissimilarityMatrix::new(
            vec!["a".into(), "b".into(), "c".into()],
            array![[0.0, 1.0, 5.0], [1.0, 0.0, 4.0], [5.0, 4.0, 0.0]],
        )
        .unwrap();
        let emb = ClassicalMds::new().fit(&d).unwrap();

        let mut metrics: ItemMetrics = HashMap::new();
        metrics.insert(
            "hit".into(),
            [("a".to_string(), 1.0), ("b".to_string(), 2.0), ("c".to_string(), 9.0)]
                .into_iter()
                .collect(),
        );
        metrics.insert(
            "deep-cut".into(),
            [("a".to_string(), 4.0), ("c".to_string(), 4.0)]
                .into_iter()
                .collect(),
        );
        metrics.insert(
            "b-only".into(),
            [("b".to_string(), 3.0)].into_iter().collect(),
        );

        let analysis = AxisLoadingAnalyzer::new().analyze(&emb, &metrics).unwrap();
        (analysis, metrics)
    }

    #[test]
    fn test_contributions_use_item_mean() {
        let (analysis, metrics) = setup();
        let rows = analysis.contributions("c", &metrics).unwrap();

        // c has values for "hit" and "deep-cut" only.
        assert_eq!(rows.len(), 2);
        let hit = rows.iter().find(|r| r.item == "hit").unwrap();
        assert!((hit.mean - 4.0).abs() < 1e-12);
        assert!((hit.deviation - 5.0).abs() < 1e-12);

        let loading = analysis.loading("hit").unwrap();
        for axis in Axis::ALL {
            assert!((hit.on(axis) - loading.on(axis) * 5.0).abs() < 1e-12);
        }

        // deep-cut: c sits exactly on the item mean.
        let deep = rows.iter().find(|r| r.item == "deep-cut").unwrap();
        assert_eq!(deep.deviation, 0.0);
        assert_eq!(rows[0].item, "hit");
    }

    #[test]
    fn test_contributions_sorted_by_planar_magnitude() {
        let (analysis, metrics) = setup();
        let rows = analysis.contributions("a", &metrics).unwrap();
        let totals: Vec<f64> = rows.iter().map(|r| r.x.abs() + r.y.abs()).collect();
        assert!(totals.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_unknown_entity() {
        let (analysis, metrics) = setup();
        assert_eq!(
            analysis.contributions("zoe", &metrics).unwrap_err(),
            Error::UnknownEntity("zoe".into())
        );
    }
}
