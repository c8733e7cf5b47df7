//! Decomposition by edge attribute and restriction to a node context.

use std::collections::{BTreeMap, BTreeSet};

use super::types::{Ces, ContextMode, Edge, EdgeColor, LayerGraph};

/// Partition edges by `attribute`. Each subgraph keeps every node of `graph`.
///
/// Only values that occur get a key; see [`decompose_ces_by_color`] for a
/// backfilled variant.
pub fn decompose_by_edge_attribute<K, F>(graph: &LayerGraph, attribute: F) -> BTreeMap<K, LayerGraph>
where
    K: Ord,
    F: Fn(&Edge) -> K,
{
    let mut parts: BTreeMap<K, LayerGraph> = BTreeMap::new();
    for e in graph.edges() {
        parts
            .entry(attribute(e))
            .or_insert_with(|| graph.without_edges())
            .push_edge(e.clone());
    }
    parts
}

pub fn decompose_by_color(graph: &LayerGraph) -> BTreeMap<EdgeColor, LayerGraph> {
    decompose_by_edge_attribute(graph, |e| e.color)
}

/// Color decomposition of every layer, with an (edgeless) subgraph for each
/// color the layer can carry even if no edge has it.
pub fn decompose_ces_by_color(ces: &Ces) -> BTreeMap<usize, BTreeMap<EdgeColor, LayerGraph>> {
    ces.layers()
        .map(|(degree, g)| {
            let mut parts = decompose_by_color(g);
            for &color in EdgeColor::expected_for_degree(degree) {
                parts.entry(color).or_insert_with(|| g.without_edges());
            }
            (degree, parts)
        })
        .collect()
}

/// Keep, in every layer, only edges whose endpoints satisfy `mode` against
/// `node_labels`. Nodes are kept; the input is not modified.
pub fn restrict_to_context<I, S>(ces: &Ces, node_labels: I, mode: ContextMode) -> Ces
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let context: BTreeSet<String> = node_labels
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect();
    let inside = |label: &str| context.contains(label);
    ces.map_layers(|g| {
        let mut out = g.clone();
        out.retain_edges(|e| match mode {
            ContextMode::All => inside(&e.source) && inside(&e.target),
            ContextMode::Any => inside(&e.source) || inside(&e.target),
        });
        out
    })
}
