//! Error kinds shared by construction, classification and filtering.
//!
//! None of these are transient: the core holds no external resources, so every
//! error aborts the call it occurs in and no partial CES is returned.

use thiserror::Error;

use crate::model::NodeIxs;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CesError {
    /// Malformed face: wrong degree, bad directions, or no uniquely repeated mechanism.
    #[error("invalid face: {reason}")]
    InvalidFace { reason: String },

    /// A 3-face base mechanism that is neither relation endpoint.
    #[error("inconsistent mechanisms ({first}, {second}) and base {base}")]
    InconsistentMechanism {
        base: NodeIxs,
        first: NodeIxs,
        second: NodeIxs,
    },

    /// Label symbol absent from the universe.
    #[error("symbol {symbol:?} is not a node label")]
    UnknownSymbol { symbol: char },

    /// A universe label given twice; label lookups would be ambiguous.
    #[error("symbol {symbol:?} appears twice in the universe")]
    DuplicateSymbol { symbol: char },

    /// Node index past the end of the universe.
    #[error("node index {index} out of range for {len} node labels")]
    IndexOutOfRange { index: usize, len: usize },

    /// Overlap filter asked to compare a layer pairing it does not define.
    #[error("unsupported overlap filter case: {constraining} constraining {constrained}")]
    UnsupportedFilterCase {
        constraining: &'static str,
        constrained: &'static str,
    },

    /// Two distinctions share a node label.
    #[error("duplicate node {label}")]
    DuplicateNode { label: String },

    /// A relation or edge refers to a node that was never added.
    #[error("unknown node {node}")]
    UnknownNode { node: String },
}

impl CesError {
    pub(crate) fn invalid_face(reason: impl Into<String>) -> Self {
        Self::InvalidFace {
            reason: reason.into(),
        }
    }

    /// True for the two label/index lookup variants.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            Self::UnknownSymbol { .. } | Self::IndexOutOfRange { .. }
        )
    }
}

pub type Result<T, E = CesError> = std::result::Result<T, E>;
