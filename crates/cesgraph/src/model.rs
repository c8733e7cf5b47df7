//! Input records: universe, distinctions, purviews, faces and relations.
//!
//! These are already-computed values handed to the core by an upstream layer.
//! Nothing here is mutated after construction; relations refer to their relata
//! by mechanism, which is also the node identity in every layer.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CesError, Result};

/// Increasing tuple of indices into the universe (a mechanism or a purview support).
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeIxs(pub Vec<usize>);

impl NodeIxs {
    /// Sorts and dedups `ixs`, so any input becomes a valid increasing tuple.
    pub fn new(ixs: impl IntoIterator<Item = usize>) -> Self {
        let set: BTreeSet<usize> = ixs.into_iter().collect();
        Self(set.into_iter().collect())
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn contains(&self, ix: usize) -> bool {
        self.0.contains(&ix)
    }

    /// Pure set containment; order and duplicates in either side are ignored.
    pub fn is_subset_of(&self, other: &NodeIxs) -> bool {
        let other: BTreeSet<usize> = other.0.iter().copied().collect();
        self.0.iter().all(|ix| other.contains(ix))
    }

    pub fn intersection(&self, other: &NodeIxs) -> NodeIxs {
        NodeIxs::new(self.0.iter().copied().filter(|ix| other.contains(*ix)))
    }
}

impl fmt::Display for NodeIxs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (k, ix) in self.0.iter().enumerate() {
            if k > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{ix}")?;
        }
        write!(f, ")")
    }
}

impl From<Vec<usize>> for NodeIxs {
    fn from(v: Vec<usize>) -> Self {
        Self(v)
    }
}

impl<const N: usize> From<[usize; N]> for NodeIxs {
    fn from(v: [usize; N]) -> Self {
        Self(v.to_vec())
    }
}

/// Ordered single-character labels of the base elements; no label repeats.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<char>", into = "Vec<char>")]
pub struct Universe {
    labels: Vec<char>,
}

impl Universe {
    /// Fails with [`CesError::DuplicateSymbol`] if a label appears twice.
    pub fn new(labels: impl IntoIterator<Item = char>) -> Result<Self> {
        let labels: Vec<char> = labels.into_iter().collect();
        let mut seen = BTreeSet::new();
        if let Some(&symbol) = labels.iter().find(|&&l| !seen.insert(l)) {
            return Err(CesError::DuplicateSymbol { symbol });
        }
        Ok(Self { labels })
    }

    /// `A`, `B`, `C`, … for the first `n` elements (up to 26).
    pub fn alphabetic(n: usize) -> Self {
        Self {
            labels: ('A'..='Z').take(n).collect(),
        }
    }

    pub fn labels(&self) -> &[char] {
        &self.labels
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl TryFrom<Vec<char>> for Universe {
    type Error = CesError;

    fn try_from(labels: Vec<char>) -> Result<Self> {
        Self::new(labels)
    }
}

impl From<Universe> for Vec<char> {
    fn from(u: Universe) -> Self {
        u.labels
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Cause,
    Effect,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cause => write!(f, "CAUSE"),
            Self::Effect => write!(f, "EFFECT"),
        }
    }
}

/// A directed support owned by exactly one distinction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Purview {
    pub direction: Direction,
    /// Mechanism of the owning distinction.
    pub mechanism: NodeIxs,
    pub support: NodeIxs,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Distinction {
    pub mechanism: NodeIxs,
    pub phi: f64,
    pub cause_purview: NodeIxs,
    pub effect_purview: NodeIxs,
}

impl Distinction {
    pub fn new(
        mechanism: impl Into<NodeIxs>,
        phi: f64,
        cause_purview: impl Into<NodeIxs>,
        effect_purview: impl Into<NodeIxs>,
    ) -> Self {
        Self {
            mechanism: mechanism.into(),
            phi,
            cause_purview: cause_purview.into(),
            effect_purview: effect_purview.into(),
        }
    }

    pub fn purview(&self, direction: Direction) -> Purview {
        let support = match direction {
            Direction::Cause => self.cause_purview.clone(),
            Direction::Effect => self.effect_purview.clone(),
        };
        Purview {
            direction,
            mechanism: self.mechanism.clone(),
            support,
        }
    }
}

/// A joint structural claim over 2–4 purviews of a relation's relata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Face {
    pub purviews: Vec<Purview>,
    /// Overlap purview; the only index set compared by later stages.
    pub purview: NodeIxs,
}

impl Face {
    pub fn new(purviews: Vec<Purview>, purview: impl Into<NodeIxs>) -> Self {
        Self {
            purviews,
            purview: purview.into(),
        }
    }

    /// Overlap purview = intersection of all constituent supports.
    pub fn from_purviews(purviews: Vec<Purview>) -> Self {
        let purview = match purviews.split_first() {
            Some((head, rest)) => rest
                .iter()
                .fold(head.support.clone(), |acc, p| acc.intersection(&p.support)),
            None => NodeIxs::default(),
        };
        Self { purviews, purview }
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.purviews.len()
    }
}

/// Relata (by mechanism) plus every face computed between them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub relata: Vec<NodeIxs>,
    pub faces: Vec<Face>,
}

impl Relation {
    pub fn new(relata: Vec<NodeIxs>, faces: Vec<Face>) -> Self {
        Self { relata, faces }
    }

    /// Binary relation between two distinctions.
    pub fn pair(first: &Distinction, second: &Distinction, faces: Vec<Face>) -> Self {
        Self {
            relata: vec![first.mechanism.clone(), second.mechanism.clone()],
            faces,
        }
    }

    /// Number of relata (not to be confused with face degree).
    #[inline]
    pub fn degree(&self) -> usize {
        self.relata.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_ixs_subset_is_set_containment() {
        let abc = NodeIxs::from([0, 1, 2]);
        assert!(NodeIxs::from([0, 2]).is_subset_of(&abc));
        assert!(abc.is_subset_of(&abc));
        assert!(NodeIxs::default().is_subset_of(&abc));
        assert!(!NodeIxs::from([0, 3]).is_subset_of(&abc));
        // Cardinality alone never decides containment.
        assert!(!NodeIxs::from([3]).is_subset_of(&abc));
    }

    #[test]
    fn node_ixs_new_sorts_and_dedups() {
        assert_eq!(NodeIxs::new([2, 0, 2, 1]), NodeIxs::from([0, 1, 2]));
        assert_eq!(NodeIxs::from([0, 4]).to_string(), "(0, 4)");
    }

    #[test]
    fn face_overlap_is_intersection_of_supports() {
        let a = Distinction::new([0], 0.5, [0, 1], [0, 1, 2]);
        let b = Distinction::new([1], 0.3, [1, 2], [1]);
        let face = Face::from_purviews(vec![
            a.purview(Direction::Cause),
            a.purview(Direction::Effect),
            b.purview(Direction::Cause),
        ]);
        assert_eq!(face.degree(), 3);
        assert_eq!(face.purview, NodeIxs::from([1]));
        assert!(Face::from_purviews(Vec::new()).purview.is_empty());
    }

    #[test]
    fn relation_pair_keeps_relata_order() {
        let a = Distinction::new([0], 0.5, [0], [0]);
        let b = Distinction::new([1, 2], 0.3, [1], [2]);
        let rel = Relation::pair(&b, &a, Vec::new());
        assert_eq!(rel.degree(), 2);
        assert_eq!(rel.relata[0], b.mechanism);
        assert_eq!(rel.relata[1], a.mechanism);
    }
}
