//! Purview-overlap pruning of lower-degree layers.

use tracing::debug;

use crate::error::{CesError, Result};

use super::types::{Ces, Edge, GraphKind, LayerGraph};

/// Remove lower-degree edges whose purview is a subset of a corresponding
/// higher-degree edge's purview. The input is left untouched.
///
/// Order: 3 by 4, then 2 by 4, then 2 by the already filtered 3. Degree-4
/// edges are never removed, so a second pass removes nothing.
pub fn filter_by_overlap(ces: &Ces) -> Result<Ces> {
    let face3 = filter_layer_by_overlap(&ces.face4, &ces.face3)?;
    let face2 = filter_layer_by_overlap(&ces.face4, &ces.face2)?;
    let face2 = filter_layer_by_overlap(&face3, &face2)?;
    debug!(
        removed3 = ces.face3.edge_count() - face3.edge_count(),
        removed2 = ces.face2.edge_count() - face2.edge_count(),
        "overlap filter"
    );
    Ok(Ces {
        face4: ces.face4.clone(),
        face3,
        face2,
    })
}

/// Filter one constrained layer against one constraining layer.
///
/// Supported pairings: undirected simple → directed multigraph (match on the
/// unordered pair) and directed multigraph → directed multigraph (match on
/// both orientations, every parallel edge is a candidate).
pub fn filter_layer_by_overlap(
    constraining: &LayerGraph,
    constrained: &LayerGraph,
) -> Result<LayerGraph> {
    match (constraining.kind(), constrained.kind()) {
        (GraphKind::Undirected, GraphKind::MultiDirected)
        | (GraphKind::MultiDirected, GraphKind::MultiDirected) => {}
        (a, b) => {
            return Err(CesError::UnsupportedFilterCase {
                constraining: a.name(),
                constrained: b.name(),
            })
        }
    }
    let mut out = constrained.clone();
    out.retain_edges(|e| !is_covered(constraining, e));
    Ok(out)
}

fn is_covered(constraining: &LayerGraph, edge: &Edge) -> bool {
    let forward = constraining.edges_between(&edge.source, &edge.target);
    // Undirected lookups already ignore orientation; self-loops have one orientation.
    let reverse: &[Edge] = if constraining.is_directed() && edge.source != edge.target {
        constraining.edges_between(&edge.target, &edge.source)
    } else {
        &[]
    };
    forward
        .iter()
        .chain(reverse)
        .any(|c| edge.purview.is_subset_of(&c.purview))
}
