//! Layered CES construction from distinctions and binary relations.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::classify::{
    base_mechanism_of_3face, classify_2face, classify_3face, ThreeFaceKind, TwoFaceKind,
};
use crate::error::{CesError, Result};
use crate::labels::indices_to_label;
use crate::model::{Distinction, Face, NodeIxs, Relation, Universe};
use crate::select::filter_relations_by_degree;

use super::types::{Ces, CesCfg, Edge, EdgeColor, LayerGraph, NodeData};

/// Build the three layers (4-face, 3-face, 2-face) over the given distinctions.
///
/// Relations with more or fewer than two relata are dropped. Faces of one
/// relation are processed by descending degree; a 3-face is only drawn when no
/// 4-face edge joins the pair yet, or when its purview is strictly larger than
/// that edge's purview. 2-faces are always drawn; pruning them against richer
/// layers is left to [`filter_by_overlap`](super::filter_by_overlap).
///
/// Every face of degree 2 to 4 is checked against the relation's two relata
/// before any dominance decision, so a malformed relation fails the whole call
/// even when its faces would not have been drawn.
pub fn build_ces<'a, 'b, D, R>(
    universe: &Universe,
    distinctions: D,
    relations: R,
    cfg: CesCfg,
) -> Result<Ces>
where
    D: IntoIterator<Item = &'a Distinction>,
    R: IntoIterator<Item = &'b Relation>,
{
    let mut ces = Ces::empty();
    let mut labels: BTreeMap<NodeIxs, String> = BTreeMap::new();
    for d in distinctions {
        let label = indices_to_label(&d.mechanism, universe)?;
        let node = NodeData {
            label: label.clone(),
            mechanism: d.mechanism.clone(),
            phi: d.phi,
        };
        for layer in ces.layers_mut() {
            layer.add_node(node.clone())?;
        }
        labels.insert(d.mechanism.clone(), label);
    }

    let relations: Vec<&Relation> = relations.into_iter().collect();
    let binary = filter_relations_by_degree(relations.iter().copied(), 2);
    debug!(
        distinctions = labels.len(),
        relations = binary.len(),
        dropped = relations.len() - binary.len(),
        "building ces"
    );
    for rel in binary {
        add_relation(&mut ces, rel, &labels, cfg)?;
    }
    debug!(
        face4 = ces.face4.edge_count(),
        face3 = ces.face3.edge_count(),
        face2 = ces.face2.edge_count(),
        "ces built"
    );
    Ok(ces)
}

/// Convenience: default options (arrows leave the 3-face base mechanism).
pub fn build_ces_with_defaults(
    universe: &Universe,
    distinctions: &[Distinction],
    relations: &[Relation],
) -> Result<Ces> {
    build_ces(universe, distinctions, relations, CesCfg::default())
}

fn add_relation(
    ces: &mut Ces,
    rel: &Relation,
    labels: &BTreeMap<NodeIxs, String>,
    cfg: CesCfg,
) -> Result<()> {
    let (m1, m2) = (&rel.relata[0], &rel.relata[1]);
    let label_of = |m: &NodeIxs| {
        labels
            .get(m)
            .cloned()
            .ok_or_else(|| CesError::UnknownNode {
                node: m.to_string(),
            })
    };
    let (l1, l2) = (label_of(m1)?, label_of(m2)?);

    let mut faces: Vec<&Face> = rel.faces.iter().collect();
    // Stable: equal-degree faces keep their input order.
    faces.sort_by(|a, b| b.degree().cmp(&a.degree()));

    for face in faces {
        match face.degree() {
            4 => {
                check_owners(face, m1, m2)?;
                // Simple layer: a later 4-face on the same pair overwrites.
                ces.face4
                    .add_edge(Edge::new(&l1, &l2, EdgeColor::Dominant, face.purview.clone()))?;
            }
            3 => {
                let color = match classify_3face(face)? {
                    ThreeFaceKind::EffectDominated => EdgeColor::Effect,
                    ThreeFaceKind::CauseDominated => EdgeColor::Cause,
                };
                let base = base_mechanism_of_3face(face)?;
                let (from, to) = if base == *m1 {
                    (&l1, &l2)
                } else if base == *m2 {
                    (&l2, &l1)
                } else {
                    return Err(CesError::InconsistentMechanism {
                        base,
                        first: m1.clone(),
                        second: m2.clone(),
                    });
                };
                check_owners(face, m1, m2)?;
                if !face3_dominates(&ces.face4, &l1, &l2, face) {
                    trace!(source = %l1, target = %l2, "3-face covered by 4-face");
                    continue;
                }
                let (from, to) = if cfg.invert_3face_convention {
                    (to, from)
                } else {
                    (from, to)
                };
                ces.face3
                    .add_edge(Edge::new(from, to, color, face.purview.clone()))?;
            }
            2 => {
                let (from, to, color) = match classify_2face(face, m1, m2)? {
                    TwoFaceKind::EffectEffect => (&l1, &l2, EdgeColor::Effect),
                    TwoFaceKind::CauseCause => (&l1, &l2, EdgeColor::Cause),
                    TwoFaceKind::CauseEffect => (&l1, &l2, EdgeColor::Mixed),
                    TwoFaceKind::EffectCause => (&l2, &l1, EdgeColor::Mixed),
                };
                ces.face2
                    .add_edge(Edge::new(from, to, color, face.purview.clone()))?;
            }
            degree => trace!(degree, "ignoring face outside degrees 2..=4"),
        }
    }
    Ok(())
}

/// Every purview must belong to one of the two relata, and both must contribute.
fn check_owners(face: &Face, m1: &NodeIxs, m2: &NodeIxs) -> Result<()> {
    if let Some(p) = face
        .purviews
        .iter()
        .find(|p| p.mechanism != *m1 && p.mechanism != *m2)
    {
        return Err(CesError::invalid_face(format!(
            "{}-face purview owned by {}, expected {m1} or {m2}",
            face.degree(),
            p.mechanism
        )));
    }
    let draws_on = |m: &NodeIxs| face.purviews.iter().any(|p| p.mechanism == *m);
    if !draws_on(m1) || !draws_on(m2) {
        return Err(CesError::invalid_face(format!(
            "{}-face does not draw on both {m1} and {m2}",
            face.degree()
        )));
    }
    Ok(())
}

/// Cardinality test: a 3-face beats an existing 4-face edge only with a strictly
/// larger purview.
fn face3_dominates(face4: &LayerGraph, l1: &str, l2: &str, face: &Face) -> bool {
    match face4.edge(l1, l2) {
        None => true,
        Some(e) => face.purview.len() > e.purview.len(),
    }
}
