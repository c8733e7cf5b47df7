//! Face classification: 2-face direction pairs, 3-face dominance and base mechanism.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CesError, Result};
use crate::model::{Direction, Face, NodeIxs, Purview, Relation};

/// Directions of a 2-face, first relatum's purview then second's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwoFaceKind {
    CauseCause,
    CauseEffect,
    EffectCause,
    EffectEffect,
}

impl TwoFaceKind {
    pub fn from_directions(first: Direction, second: Direction) -> Self {
        match (first, second) {
            (Direction::Cause, Direction::Cause) => Self::CauseCause,
            (Direction::Cause, Direction::Effect) => Self::CauseEffect,
            (Direction::Effect, Direction::Cause) => Self::EffectCause,
            (Direction::Effect, Direction::Effect) => Self::EffectEffect,
        }
    }
}

/// Which direction holds two of the three purviews.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreeFaceKind {
    CauseDominated,
    EffectDominated,
}

fn expect_degree(face: &Face, degree: usize) -> Result<()> {
    if face.degree() != degree {
        return Err(CesError::invalid_face(format!(
            "expected a {degree}-face, got degree {}",
            face.degree()
        )));
    }
    Ok(())
}

/// Classify a 2-face by the directions of its purviews, ordered by relatum.
///
/// The purview owned by `first` decides the first half of the kind, regardless
/// of where it sits in `face.purviews`. Fails if the two purviews are not owned
/// by `first` and `second` respectively.
pub fn classify_2face(face: &Face, first: &NodeIxs, second: &NodeIxs) -> Result<TwoFaceKind> {
    expect_degree(face, 2)?;
    let (p, q) = (&face.purviews[0], &face.purviews[1]);
    let owned = |a: &Purview, b: &Purview| a.mechanism == *first && b.mechanism == *second;
    let (a, b) = if owned(p, q) {
        (p, q)
    } else if owned(q, p) {
        (q, p)
    } else {
        return Err(CesError::invalid_face(format!(
            "2-face purviews owned by {} and {}, expected {first} and {second}",
            p.mechanism, q.mechanism
        )));
    };
    Ok(TwoFaceKind::from_directions(a.direction, b.direction))
}

/// Exactly two cause purviews → cause-dominated; anything else → effect-dominated.
pub fn classify_3face(face: &Face) -> Result<ThreeFaceKind> {
    expect_degree(face, 3)?;
    let n_cause = face
        .purviews
        .iter()
        .filter(|p| p.direction == Direction::Cause)
        .count();
    Ok(if n_cause == 2 {
        ThreeFaceKind::CauseDominated
    } else {
        ThreeFaceKind::EffectDominated
    })
}

/// Mechanism of the distinction contributing two purviews to a 3-face.
pub fn base_mechanism_of_3face(face: &Face) -> Result<NodeIxs> {
    expect_degree(face, 3)?;
    let mut counts: BTreeMap<&NodeIxs, usize> = BTreeMap::new();
    for p in &face.purviews {
        *counts.entry(&p.mechanism).or_default() += 1;
    }
    // Three purviews over two mechanisms means one appears twice and one once.
    if counts.len() != 2 {
        return Err(CesError::invalid_face(format!(
            "3-face spans {} distinct mechanisms, expected 2",
            counts.len()
        )));
    }
    counts
        .into_iter()
        .find(|&(_, n)| n == 2)
        .map(|(m, _)| m.clone())
        .ok_or_else(|| CesError::invalid_face("no mechanism appears exactly twice"))
}

/// Face of maximum degree; the first one wins among equals.
pub fn dominant_face(relation: &Relation) -> Option<&Face> {
    relation.faces.iter().fold(None, |best: Option<&Face>, f| match best {
        Some(b) if b.degree() >= f.degree() => Some(b),
        _ => Some(f),
    })
}
