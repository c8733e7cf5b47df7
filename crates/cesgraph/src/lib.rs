//! Layered cause-effect structure (CES) graphs.
//!
//! Takes already computed distinctions and binary relations and compresses them
//! into three graphs, one per face degree (4, 3, 2), then prunes lower-degree
//! edges made redundant by higher-degree ones. Rendering and layout belong to
//! the caller; this crate only produces the graphs.
//!
//! API Policy
//! - The crate is project-internal; breaking changes are fine when they make
//!   the model clearer.

pub mod api;
pub mod ces;
pub mod classify;
pub mod error;
pub mod labels;
pub mod model;
pub mod select;
pub mod synth;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{CesError, Result};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::ces::{
        build_ces, decompose_ces_by_color, filter_by_overlap, restrict_to_context, Ces, CesCfg,
        ContextMode, Edge, EdgeColor, LayerGraph,
    };
    pub use crate::error::CesError;
    pub use crate::model::{Direction, Distinction, Face, NodeIxs, Purview, Relation, Universe};
}
