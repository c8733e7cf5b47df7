//! Build, prune and decompose the three-distinction CES used in the docs.
//!
//! Run: `cargo run -p cesgraph --example layered_ces`

use cesgraph::prelude::*;
use cesgraph::ces::decompose_ces_by_color;
use cesgraph::model::Direction::{Cause, Effect};

fn main() -> Result<(), CesError> {
    let universe = Universe::alphabetic(3);
    let a = Distinction::new([0], 0.5, [0, 1], [0, 1]);
    let b = Distinction::new([1], 0.3, [0, 1, 2], [1, 2]);
    let c = Distinction::new([2], 0.4, [1, 2], [2]);

    let ab = Relation::pair(
        &a,
        &b,
        vec![
            Face::from_purviews(vec![
                a.purview(Cause),
                a.purview(Effect),
                b.purview(Cause),
                b.purview(Effect),
            ]),
            Face::from_purviews(vec![a.purview(Cause), b.purview(Cause)]),
        ],
    );
    let bc = Relation::pair(
        &b,
        &c,
        vec![Face::from_purviews(vec![
            b.purview(Cause),
            b.purview(Effect),
            c.purview(Cause),
        ])],
    );

    let ces = build_ces(&universe, [&a, &b, &c], [&ab, &bc], CesCfg::default())?;
    let pruned = filter_by_overlap(&ces)?;
    for (degree, layer) in pruned.layers() {
        println!("{degree}-faces:");
        for e in layer.edges() {
            println!("  {} -> {} {:?} {}", e.source, e.target, e.color, e.purview);
        }
    }
    for (degree, parts) in decompose_ces_by_color(&pruned) {
        let counts: Vec<String> = parts
            .iter()
            .map(|(color, g)| format!("{color:?}={}", g.edge_count()))
            .collect();
        println!("{degree}: {}", counts.join(" "));
    }
    Ok(())
}
