use std::collections::HashMap;

use tastemap::{analyze, Axis, DissimilarityMatrix, ItemMetrics};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Six raters, two taste camps, and a few songs ranked by each of them.
    let raters = ["honoka", "kotori", "umi", "maki", "rin", "hanayo"];
    let songs: &[(&str, &str, [f64; 6])] = &[
        ("s1", "Snow Halation", [1.0, 2.0, 1.0, 9.0, 8.0, 9.0]),
        ("s2", "Bokura no LIVE", [8.0, 9.0, 8.0, 2.0, 1.0, 1.0]),
        ("s3", "Susume Tomorrow", [3.0, 3.0, 4.0, 3.0, 4.0, 3.0]),
        ("s4", "Kitto Seishun", [5.0, 1.0, 6.0, 5.0, 2.0, 6.0]),
    ];

    // Divergence = mean absolute rank difference over the shared songs.
    let mut nested: HashMap<String, HashMap<String, f64>> = HashMap::new();
    for (i, a) in raters.iter().enumerate() {
        for (j, b) in raters.iter().enumerate() {
            let div = songs
                .iter()
                .map(|(_, _, r)| (r[i] - r[j]).abs())
                .sum::<f64>()
                / songs.len() as f64;
            nested
                .entry(a.to_string())
                .or_default()
                .insert(b.to_string(), div);
        }
    }
    let matrix = DissimilarityMatrix::from_nested(&nested)?;

    let mut ranks: ItemMetrics = HashMap::new();
    let mut names = HashMap::new();
    for (id, name, r) in songs {
        ranks.insert(
            id.to_string(),
            raters
                .iter()
                .zip(r)
                .map(|(u, v)| (u.to_string(), *v))
                .collect(),
        );
        names.insert(id.to_string(), name.to_string());
    }

    let map = analyze(&matrix, &ranks)?;

    println!(
        "2D accuracy: {}%",
        map.embedding.variance_explained_percent()
    );
    for (id, p) in map.embedding.iter() {
        println!("  {id:<8} x={:>7.3} y={:>7.3} z={:>7.3}", p.x, p.y, p.z);
    }

    for label in map.axes.labels(&names) {
        println!("{label}");
    }
    println!("PC1 drivers:");
    for l in map.axes.drivers(Axis::X) {
        println!("  {:<16} {:+.3}", names[&l.item], l.x);
    }

    println!("maki's position:");
    for c in map.axes.contributions("maki", &ranks)? {
        println!(
            "  {:<16} dev={:+.1} pc1={:+.3} pc2={:+.3}",
            names[&c.item], c.deviation, c.x, c.y
        );
    }

    let report = map.diagnostics();
    if !report.is_clean() {
        print!("{report}");
    }
    Ok(())
}
