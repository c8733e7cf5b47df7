//! Curated surface for presentation layers (UNSTABLE).
//!
//! Important
//! - Convenience re-exports for renderers and orchestration code; not a stable API.
//! - Renderers need the layers, their node/edge records, the color decomposition
//!   and context restriction; nothing else.

// Input records
pub use crate::model::{Direction, Distinction, Face, NodeIxs, Purview, Relation, Universe};
// Labels
pub use crate::labels::{indices_to_label, is_contiguous, label_to_indices, nodes_to_labels};
// Classification
pub use crate::classify::{
    base_mechanism_of_3face, classify_2face, classify_3face, dominant_face, ThreeFaceKind,
    TwoFaceKind,
};
// Layers
pub use crate::ces::{
    build_ces, build_ces_with_defaults, decompose_by_color, decompose_by_edge_attribute,
    decompose_ces_by_color, filter_by_overlap, filter_layer_by_overlap, restrict_to_context, Ces,
    CesCfg, ContextMode, Edge, EdgeColor, GraphKind, LayerGraph, NodeData,
};
// Selection
pub use crate::select::{
    filter_contiguous_distinctions, filter_relations_by_degree, filter_relations_by_distinctions,
    sort_distinctions,
};
