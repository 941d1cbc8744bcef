//! Human-readable axis descriptions.

use std::collections::HashMap;

use super::loading::AxisLoading;
use super::Axis;

/// What an axis represents, derived from its two strongest drivers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisDescription {
    /// No items were analyzed.
    Undetermined,
    /// A single item dominates.
    Polarized {
        /// Top item id.
        item: String,
    },
    /// The two strongest items pull in opposite directions.
    Contrast {
        /// Top item id.
        first: String,
        /// Runner-up item id.
        second: String,
    },
    /// The two strongest items pull in the same direction.
    Joint {
        /// Top item id.
        first: String,
        /// Runner-up item id.
        second: String,
    },
}

impl AxisDescription {
    /// Describe an axis from loadings already sorted by descending |r|.
    pub fn from_ranked<'a>(
        mut ranked: impl Iterator<Item = &'a AxisLoading>,
        axis: Axis,
        threshold: f64,
    ) -> Self {
        let Some(top) = ranked.next() else {
            return AxisDescription::Undetermined;
        };

        match ranked.next() {
            Some(second) if second.on(axis).abs() >= threshold => {
                let first = top.item.clone();
                let second_item = second.item.clone();
                if (top.on(axis) > 0.0) != (second.on(axis) > 0.0) {
                    AxisDescription::Contrast {
                        first,
                        second: second_item,
                    }
                } else {
                    AxisDescription::Joint {
                        first,
                        second: second_item,
                    }
                }
            }
            _ => AxisDescription::Polarized {
                item: top.item.clone(),
            },
        }
    }

    /// Render as an axis label, e.g. `PC1: "Song A" vs "Song B"`.
    ///
    /// Item ids are resolved through `names`; unknown ids show their first
    /// eight characters.
    pub fn label(&self, axis: Axis, names: &HashMap<String, String>) -> String {
        let name = |id: &str| -> String {
            names
                .get(id)
                .cloned()
                .unwrap_or_else(|| id.chars().take(8).collect())
        };

        match self {
            AxisDescription::Undetermined => format!("{axis}: Variance"),
            AxisDescription::Polarized { item } => {
                format!("{axis}: Polarized by \"{}\"", name(item))
            }
            AxisDescription::Contrast { first, second } => {
                format!("{axis}: \"{}\" vs \"{}\"", name(first), name(second))
            }
            AxisDescription::Joint { first, second } => {
                format!("{axis}: Driven by \"{}\" & \"{}\"", name(first), name(second))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l(item: &str, x: f64) -> AxisLoading {
        AxisLoading {
            item: item.into(),
            x,
            y: 0.0,
            z: 0.0,
        }
    }

    fn describe(loadings: &[AxisLoading]) -> AxisDescription {
        AxisDescription::from_ranked(loadings.iter(), Axis::X, 0.3)
    }

    #[test]
    fn test_opposite_signs_contrast() {
        let d = describe(&[l("a", 0.9), l("b", -0.6)]);
        assert_eq!(
            d,
            AxisDescription::Contrast {
                first: "a".into(),
                second: "b".into()
            }
        );
    }

    #[test]
    fn test_same_sign_joint() {
        let d = describe(&[l("a", -0.9), l("b", -0.3)]);
        assert_eq!(
            d,
            AxisDescription::Joint {
                first: "a".into(),
                second: "b".into()
            }
        );
    }

    #[test]
    fn test_weak_second_polarized() {
        let d = describe(&[l("a", 0.9), l("b", -0.29)]);
        assert_eq!(d, AxisDescription::Polarized { item: "a".into() });

        let d = describe(&[l("solo", 0.1)]);
        assert_eq!(d, AxisDescription::Polarized { item: "solo".into() });
    }

    #[test]
    fn test_empty_undetermined() {
        assert_eq!(describe(&[]), AxisDescription::Undetermined);
    }

    #[test]
    fn test_labels() {
        let names: HashMap<String, String> =
            [("a".to_string(), "Snow Halation".to_string())].into_iter().collect();

        let d = AxisDescription::Contrast {
            first: "a".into(),
            second: "0123456789abcdef".into(),
        };
        assert_eq!(
            d.label(Axis::X, &names),
            "PC1: \"Snow Halation\" vs \"01234567\""
        );

        let d = AxisDescription::Joint {
            first: "a".into(),
            second: "b".into(),
        };
        assert_eq!(
            d.label(Axis::Y, &names),
            "PC2: Driven by \"Snow Halation\" & \"b\""
        );

        let d = AxisDescription::Polarized { item: "a".into() };
        assert_eq!(d.label(Axis::Z, &names), "PC3: Polarized by \"Snow Halation\"");

        assert_eq!(
            AxisDescription::Undetermined.label(Axis::X, &names),
            "PC1: Variance"
        );
    }
}
