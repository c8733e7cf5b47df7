//! Layer graphs, node/edge records and construction options.
//!
//! Kept small and explicit so `build`, `filter` and `context` read easily.

use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{CesError, Result};
use crate::model::NodeIxs;

/// Shape of a layer: the 4-face layer is simple and undirected, the others are
/// directed multigraphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphKind {
    Undirected,
    MultiDirected,
}

impl GraphKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Undirected => "undirected simple graph",
            Self::MultiDirected => "directed multigraph",
        }
    }
}

/// Edge classification; the renderer maps these to actual colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeColor {
    /// 4-face marker.
    Dominant,
    Effect,
    Cause,
    Mixed,
}

impl EdgeColor {
    /// Every color a layer of the given face degree can carry.
    pub fn expected_for_degree(degree: usize) -> &'static [EdgeColor] {
        match degree {
            4 => &[EdgeColor::Dominant],
            3 => &[EdgeColor::Effect, EdgeColor::Cause],
            2 => &[EdgeColor::Effect, EdgeColor::Cause, EdgeColor::Mixed],
            _ => &[],
        }
    }
}

/// Node record; `label` is the node identity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
    pub mechanism: NodeIxs,
    pub phi: f64,
}

/// Edge record. `purview` is compared by the overlap filter and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub color: EdgeColor,
    pub purview: NodeIxs,
}

impl Edge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        color: EdgeColor,
        purview: NodeIxs,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            color,
            purview,
        }
    }
}

/// One layer over the distinction node set.
///
/// Invariants:
/// - nodes keep insertion order and have unique labels;
/// - edges live in an ordered list per node pair (insertion order within the pair);
/// - `Undirected` layers key pairs unordered and hold at most one edge per pair.
///
/// Serialized as `{kind, nodes, edges}`; reading it back replays `add_node` and
/// `add_edge`, so duplicate labels and dangling endpoints are rejected.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "LayerRecord")]
pub struct LayerGraph {
    kind: GraphKind,
    nodes: Vec<NodeData>,
    index: BTreeMap<String, usize>,
    edges: BTreeMap<(String, String), Vec<Edge>>,
}

impl LayerGraph {
    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            nodes: Vec::new(),
            index: BTreeMap::new(),
            edges: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    #[inline]
    pub fn is_directed(&self) -> bool {
        self.kind == GraphKind::MultiDirected
    }

    pub fn add_node(&mut self, node: NodeData) -> Result<()> {
        if self.index.contains_key(&node.label) {
            return Err(CesError::DuplicateNode { label: node.label });
        }
        self.index.insert(node.label.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    pub fn node(&self, label: &str) -> Option<&NodeData> {
        self.index.get(label).map(|&k| &self.nodes[k])
    }

    #[inline]
    pub fn contains_node(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeData> {
        self.nodes.iter()
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn pair_key(&self, u: &str, v: &str) -> (String, String) {
        if !self.is_directed() && v < u {
            (v.to_string(), u.to_string())
        } else {
            (u.to_string(), v.to_string())
        }
    }

    /// Add an edge between existing nodes. On an undirected layer a second edge
    /// on the same pair replaces the first.
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        for end in [&edge.source, &edge.target] {
            if !self.contains_node(end) {
                return Err(CesError::UnknownNode { node: end.clone() });
            }
        }
        self.push_edge(edge);
        Ok(())
    }

    /// Endpoints are assumed present (edges copied from a graph with the same nodes).
    pub(crate) fn push_edge(&mut self, edge: Edge) {
        let key = self.pair_key(&edge.source, &edge.target);
        let slot = self.edges.entry(key).or_default();
        if self.kind == GraphKind::Undirected {
            slot.clear();
        }
        slot.push(edge);
    }

    /// Edges ordered by pair, then by insertion within a pair.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values().flatten()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Parallel edges `u → v` (either orientation on an undirected layer).
    pub fn edges_between(&self, u: &str, v: &str) -> &[Edge] {
        self.edges
            .get(&self.pair_key(u, v))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First edge `u → v`, the only one on an undirected layer.
    pub fn edge(&self, u: &str, v: &str) -> Option<&Edge> {
        self.edges_between(u, v).first()
    }

    #[inline]
    pub fn has_edge(&self, u: &str, v: &str) -> bool {
        !self.edges_between(u, v).is_empty()
    }

    pub fn retain_edges<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Edge) -> bool,
    {
        for slot in self.edges.values_mut() {
            slot.retain(|e| keep(e));
        }
        self.edges.retain(|_, slot| !slot.is_empty());
    }

    /// Same kind and nodes, no edges.
    pub fn without_edges(&self) -> Self {
        Self {
            kind: self.kind,
            nodes: self.nodes.clone(),
            index: self.index.clone(),
            edges: BTreeMap::new(),
        }
    }
}

impl Serialize for LayerGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let edges: Vec<&Edge> = self.edges().collect();
        let mut s = serializer.serialize_struct("LayerGraph", 3)?;
        s.serialize_field("kind", &self.kind)?;
        s.serialize_field("nodes", &self.nodes)?;
        s.serialize_field("edges", &edges)?;
        s.end()
    }
}

#[derive(Deserialize)]
struct LayerRecord {
    kind: GraphKind,
    nodes: Vec<NodeData>,
    edges: Vec<Edge>,
}

impl TryFrom<LayerRecord> for LayerGraph {
    type Error = CesError;

    fn try_from(rec: LayerRecord) -> Result<Self> {
        let mut g = LayerGraph::new(rec.kind);
        for node in rec.nodes {
            g.add_node(node)?;
        }
        for edge in rec.edges {
            g.add_edge(edge)?;
        }
        Ok(g)
    }
}

/// The three layers, keyed by face degree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ces {
    #[serde(rename = "4")]
    pub face4: LayerGraph,
    #[serde(rename = "3")]
    pub face3: LayerGraph,
    #[serde(rename = "2")]
    pub face2: LayerGraph,
}

impl Ces {
    /// Face degrees in processing order.
    pub const DEGREES: [usize; 3] = [4, 3, 2];

    pub fn empty() -> Self {
        Self {
            face4: LayerGraph::new(GraphKind::Undirected),
            face3: LayerGraph::new(GraphKind::MultiDirected),
            face2: LayerGraph::new(GraphKind::MultiDirected),
        }
    }

    pub fn layer(&self, degree: usize) -> Option<&LayerGraph> {
        match degree {
            4 => Some(&self.face4),
            3 => Some(&self.face3),
            2 => Some(&self.face2),
            _ => None,
        }
    }

    pub fn layers(&self) -> impl Iterator<Item = (usize, &LayerGraph)> {
        [(4, &self.face4), (3, &self.face3), (2, &self.face2)].into_iter()
    }

    pub(crate) fn layers_mut(&mut self) -> [&mut LayerGraph; 3] {
        [&mut self.face4, &mut self.face3, &mut self.face2]
    }

    /// Apply `f` to every layer, producing a new CES.
    pub fn map_layers<F>(&self, mut f: F) -> Ces
    where
        F: FnMut(&LayerGraph) -> LayerGraph,
    {
        Ces {
            face4: f(&self.face4),
            face3: f(&self.face3),
            face2: f(&self.face2),
        }
    }

    pub fn edge_count(&self) -> usize {
        self.layers().map(|(_, g)| g.edge_count()).sum()
    }
}

/// Construction options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CesCfg {
    /// When set, 3-face arrows point at the base mechanism instead of away from it.
    pub invert_3face_convention: bool,
}

/// Membership predicate for [`restrict_to_context`](super::restrict_to_context).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextMode {
    /// Both endpoints inside the context.
    All,
    /// At least one endpoint inside the context.
    #[default]
    Any,
}
