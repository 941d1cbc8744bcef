#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use ndarray::{array, Array2};
    use rand::prelude::*;

    use crate::axis::{Axis, AxisDescription, ItemMetrics};
    use crate::embed::{ClassicalMds, JacobiSolver};
    use crate::matrix::DissimilarityMatrix;
    use crate::metrics::euclidean;
    use crate::{analyze, Result};

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn nested(pairs: &[(&str, &str, f64)]) -> HashMap<String, HashMap<String, f64>> {
        let mut out: HashMap<String, HashMap<String, f64>> = HashMap::new();
        for &(a, b, v) in pairs {
            out.entry(a.into()).or_default().insert(b.into(), v);
            out.entry(b.into()).or_default().insert(a.into(), v);
        }
        out
    }

    fn ranks(rows: &[(&str, &[(&str, f64)])]) -> ItemMetrics {
        rows.iter()
            .map(|(item, vals)| {
                (
                    item.to_string(),
                    vals.iter().map(|(e, v)| (e.to_string(), *v)).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_two_tight_clusters_end_to_end() -> Result<()> {
        init();
        let d = DissimilarityMatrix::from_nested(&nested(&[
            ("A", "B", 1.0),
            ("C", "D", 1.0),
            ("A", "C", 10.0),
            ("A", "D", 10.0),
            ("B", "C", 10.0),
            ("B", "D", 10.0),
        ]))?;

        // "split" separates the clusters; "wobble" is within-cluster noise.
        let metrics = ranks(&[
            ("split", &[("A", 1.0), ("B", 2.0), ("C", 20.0), ("D", 19.0)]),
            ("wobble", &[("A", 3.0), ("B", 5.0), ("C", 5.0), ("D", 3.0)]),
        ]);

        let map = analyze(&d, &metrics)?;
        let emb = &map.embedding;

        let a = emb.point("A").unwrap();
        let b = emb.point("B").unwrap();
        let c = emb.point("C").unwrap();
        let dd = emb.point("D").unwrap();
        assert!(a.distance(b) < 2.0 && c.distance(dd) < 2.0);
        assert!(a.distance(c) > 8.0 && b.distance(dd) > 8.0);
        assert!(emb.variance_explained() > 95.0);
        assert!(emb.variance_explained_percent() >= 99);

        let x_top = map.axes.ranked(Axis::X)[0];
        assert_eq!(x_top.item, "split");
        assert!(x_top.x.abs() > 0.99);
        assert!(map.diagnostics().converged());
        Ok(())
    }

    #[test]
    fn test_perfect_agreement() -> Result<()> {
        init();
        let d = DissimilarityMatrix::new(
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            Array2::zeros((4, 4)),
        )?;
        let metrics = ranks(&[("s", &[("a", 1.0), ("b", 2.0), ("c", 3.0), ("d", 4.0)])]);

        let map = analyze(&d, &metrics)?;
        assert!(map.embedding.is_consensus());
        assert_eq!(map.embedding.variance_explained(), 100.0);

        // Every axis is flat, so nothing correlates with anything.
        let l = map.axes.loading("s").unwrap();
        assert_eq!((l.x, l.y, l.z), (0.0, 0.0, 0.0));
        assert_eq!(
            *map.axes.description(Axis::X),
            AxisDescription::Polarized { item: "s".into() }
        );
        Ok(())
    }

    #[test]
    fn test_affine_item_drives_second_axis() -> Result<()> {
        init();
        // Points on a 6 × 2 rectangle grid: x spread dominates, y second.
        let pts: Vec<Vec<f64>> = vec![
            vec![0.0, 0.0],
            vec![3.0, 0.0],
            vec![6.0, 0.0],
            vec![0.0, 2.0],
            vec![3.0, 2.0],
            vec![6.0, 2.0],
        ];
        let ids: Vec<String> = (0..pts.len()).map(|i| format!("u{i}")).collect();
        let m = Array2::from_shape_fn((6, 6), |(i, j)| euclidean(&pts[i], &pts[j]));
        let d = DissimilarityMatrix::new(ids.clone(), m)?;

        let emb = ClassicalMds::new()
            .with_solver(JacobiSolver::new().with_max_iter(1_000))
            .fit(&d)?;
        let ys = emb.axis_values(Axis::Y);

        let mut metrics: ItemMetrics = HashMap::new();
        metrics.insert(
            "second".into(),
            ids.iter()
                .zip(&ys)
                .map(|(id, y)| (id.clone(), 0.5 * y - 2.0))
                .collect(),
        );
        metrics.insert(
            "first".into(),
            ids.iter()
                .zip(&pts)
                .map(|(id, p)| (id.clone(), p[0]))
                .collect(),
        );

        let axes = crate::AxisLoadingAnalyzer::new().analyze(&emb, &metrics)?;
        let y_top = axes.ranked(Axis::Y)[0];
        assert_eq!(y_top.item, "second");
        assert!((y_top.y - 1.0).abs() < 1e-9);

        let x_top = axes.ranked(Axis::X)[0];
        assert_eq!(x_top.item, "first");
        assert!((x_top.x.abs() - 1.0).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_labels_for_contrasting_items() -> Result<()> {
        init();
        let d = DissimilarityMatrix::new(
            vec!["a".into(), "b".into(), "c".into()],
            array![[0.0, 2.0, 4.0], [2.0, 0.0, 2.0], [4.0, 2.0, 0.0]],
        )?;
        let metrics = ranks(&[
            ("up", &[("a", 1.0), ("b", 2.0), ("c", 3.0)]),
            ("down", &[("a", 3.0), ("b", 2.0), ("c", 0.5)]),
        ]);
        let map = analyze(&d, &metrics)?;

        let names: HashMap<String, String> = [
            ("up".to_string(), "Rising".to_string()),
            ("down".to_string(), "Falling".to_string()),
        ]
        .into_iter()
        .collect();

        // Both items track the single axis with opposite signs.
        let [x_label, _, _] = map.axes.labels(&names);
        assert!(x_label.starts_with("PC1: \""));
        assert!(x_label.contains(" vs "));
        assert!(x_label.contains("Rising") && x_label.contains("Falling"));
        Ok(())
    }

    #[test]
    fn test_random_point_clouds_reproduce_distances() -> Result<()> {
        init();
        let mut rng = StdRng::seed_from_u64(7);
        for n in [3usize, 5, 8] {
            // Points in 3D: a full embedding reproduces every distance.
            let pts: Vec<Vec<f64>> = (0..n)
                .map(|_| (0..3).map(|_| rng.random_range(-5.0..5.0)).collect())
                .collect();
            let ids: Vec<String> = (0..n).map(|i| format!("r{i}")).collect();
            let m = Array2::from_shape_fn((n, n), |(i, j)| euclidean(&pts[i], &pts[j]));
            let d = DissimilarityMatrix::new(ids, m)?;

            let emb = ClassicalMds::new()
                .with_solver(JacobiSolver::new().with_max_iter(10_000))
                .fit(&d)?;
            assert!(emb.diagnostics().converged());

            for i in 0..n {
                for j in 0..n {
                    let want = euclidean(&pts[i], &pts[j]);
                    let got = emb.points()[i].distance(&emb.points()[j]);
                    assert!((want - got).abs() < 1e-5, "n={n} ({i},{j}): {want} vs {got}");
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_rejects_malformed_input() {
        init();
        let err = DissimilarityMatrix::from_nested(&nested(&[])).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidInputSize { found: 0, .. }));

        let mut asym = nested(&[("a", "b", 1.0)]);
        asym.get_mut("b").unwrap().insert("a".into(), 2.0);
        assert!(matches!(
            DissimilarityMatrix::from_nested(&asym),
            Err(crate::Error::NotSymmetric { .. })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_outputs_serialize() -> Result<()> {
        init();
        let d = DissimilarityMatrix::new(
            vec!["a".into(), "b".into(), "c".into()],
            array![[0.0, 1.0, 2.0], [1.0, 0.0, 1.5], [2.0, 1.5, 0.0]],
        )?;
        let metrics = ranks(&[("s", &[("a", 1.0), ("b", 2.0), ("c", 3.0)])]);
        let map = analyze(&d, &metrics)?;

        let json = serde_json::to_string(map.embedding.points()).unwrap();
        assert!(json.contains("\"x\""));
        let json = serde_json::to_string(map.axes.loadings()).unwrap();
        assert!(json.contains("\"item\":\"s\""));
        let json = serde_json::to_string(map.axes.description(Axis::X)).unwrap();
        assert!(json.contains("Polarized"));
        Ok(())
    }
}
