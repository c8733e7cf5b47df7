//! Layered CES graphs: construction, overlap pruning and context views.
//!
//! Purpose
//! - Compress distinctions and their binary relations into three layers, one
//!   per face degree (4, 3, 2). Nodes are distinctions (by mechanism label);
//!   edges say which face of a relation is structurally dominant, with color
//!   and direction encoding its classification.
//! - Prune lower-degree edges made redundant by a higher-degree edge covering
//!   the same purview content.
//!
//! Two notions of dominance are in play and are kept apart on purpose:
//! construction compares purview cardinality (3-face vs 4-face), the overlap
//! filter tests subset containment.
//!
//! Layout: `types.rs` (records and layers), `build.rs` (construction),
//! `filter.rs` (overlap pruning), `context.rs` (decomposition, restriction).

mod build;
mod context;
mod filter;
mod types;

pub use build::{build_ces, build_ces_with_defaults};
pub use context::{
    decompose_by_color, decompose_by_edge_attribute, decompose_ces_by_color, restrict_to_context,
};
pub use filter::{filter_by_overlap, filter_layer_by_overlap};
pub use types::{Ces, CesCfg, ContextMode, Edge, EdgeColor, GraphKind, LayerGraph, NodeData};
