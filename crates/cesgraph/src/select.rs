//! Selection and ordering of distinctions and relations before construction.

use std::collections::{BTreeMap, BTreeSet};

use crate::labels::is_contiguous;
use crate::model::{Distinction, NodeIxs, Relation};

/// Relations with exactly `degree` relata.
pub fn filter_relations_by_degree<'a, I>(relations: I, degree: usize) -> Vec<&'a Relation>
where
    I: IntoIterator<Item = &'a Relation>,
{
    relations
        .into_iter()
        .filter(|r| r.degree() == degree)
        .collect()
}

/// Relations whose relata are all among `distinctions`.
pub fn filter_relations_by_distinctions<'a, 'b, I, D>(
    relations: I,
    distinctions: D,
) -> Vec<&'a Relation>
where
    I: IntoIterator<Item = &'a Relation>,
    D: IntoIterator<Item = &'b Distinction>,
{
    let mechs: BTreeSet<&NodeIxs> = distinctions.into_iter().map(|d| &d.mechanism).collect();
    relations
        .into_iter()
        .filter(|r| r.relata.iter().all(|m| mechs.contains(m)))
        .collect()
}

/// Distinctions whose mechanism is a contiguous run of indices.
pub fn filter_contiguous_distinctions<'a, D>(distinctions: D) -> Vec<&'a Distinction>
where
    D: IntoIterator<Item = &'a Distinction>,
{
    distinctions
        .into_iter()
        .filter(|d| is_contiguous(d.mechanism.as_slice()))
        .collect()
}

/// Order distinctions by the position of their mechanism in
/// [`powerset(n_nodes)`](powerset) (by size, then lexicographic).
///
/// Mechanisms outside that powerset are dropped, as are repeats of a mechanism
/// already placed. Builds the whole powerset, so `n_nodes` should stay small.
pub fn sort_distinctions(distinctions: &[Distinction], n_nodes: usize) -> Vec<&Distinction> {
    let position: BTreeMap<NodeIxs, usize> = powerset(n_nodes)
        .into_iter()
        .enumerate()
        .map(|(k, m)| (m, k))
        .collect();
    let mut placed: BTreeSet<usize> = BTreeSet::new();
    let mut out: Vec<(usize, &Distinction)> = distinctions
        .iter()
        .filter_map(|d| position.get(&d.mechanism).map(|&k| (k, d)))
        .filter(|&(k, _)| placed.insert(k))
        .collect();
    out.sort_by_key(|&(k, _)| k);
    out.into_iter().map(|(_, d)| d).collect()
}

/// Non-empty subsets of `0..n_nodes` in powerset order.
pub fn powerset(n_nodes: usize) -> Vec<NodeIxs> {
    let mut out = Vec::new();
    for size in 1..=n_nodes {
        let mut combo: Vec<usize> = (0..size).collect();
        loop {
            out.push(NodeIxs(combo.clone()));
            // Advance to the next combination in lexicographic order.
            let Some(k) = (0..size).rev().find(|&k| combo[k] != k + n_nodes - size) else {
                break;
            };
            combo[k] += 1;
            for j in k + 1..size {
                combo[j] = combo[j - 1] + 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Face;

    fn d(m: &[usize]) -> Distinction {
        Distinction::new(m.to_vec(), 0.1, m.to_vec(), m.to_vec())
    }

    #[test]
    fn powerset_order() {
        let p: Vec<Vec<usize>> = powerset(3).into_iter().map(|m| m.0).collect();
        assert_eq!(
            p,
            vec![
                vec![0],
                vec![1],
                vec![2],
                vec![0, 1],
                vec![0, 2],
                vec![1, 2],
                vec![0, 1, 2]
            ]
        );
        assert!(powerset(0).is_empty());
    }

    #[test]
    fn sorting_follows_powerset_and_drops_foreign() {
        let ds = vec![d(&[0, 2]), d(&[1]), d(&[0, 1, 2]), d(&[3]), d(&[0]), d(&[1])];
        let sorted = sort_distinctions(&ds, 3);
        let mechs: Vec<&[usize]> = sorted.iter().map(|d| d.mechanism.as_slice()).collect();
        assert_eq!(mechs, vec![&[0][..], &[1][..], &[0, 2][..], &[0, 1, 2][..]]);
        // Matches a linear scan over the powerset.
        let by_scan: Vec<NodeIxs> = powerset(3)
            .into_iter()
            .filter(|m| ds.iter().any(|d| d.mechanism == *m))
            .collect();
        let got: Vec<NodeIxs> = sorted.iter().map(|d| d.mechanism.clone()).collect();
        assert_eq!(got, by_scan);
    }

    #[test]
    fn relation_filters() {
        let (a, b, c) = (d(&[0]), d(&[1]), d(&[2]));
        let ab = Relation::pair(&a, &b, Vec::<Face>::new());
        let bc = Relation::pair(&b, &c, Vec::new());
        let abc = Relation::new(
            vec![a.mechanism.clone(), b.mechanism.clone(), c.mechanism.clone()],
            Vec::new(),
        );
        let rels = vec![ab.clone(), bc.clone(), abc];
        assert_eq!(filter_relations_by_degree(&rels, 2), vec![&ab, &bc]);
        assert_eq!(filter_relations_by_degree(&rels, 3).len(), 1);
        let within = filter_relations_by_distinctions(&rels, [&a, &b]);
        assert_eq!(within, vec![&ab]);
    }

    #[test]
    fn contiguous_filter() {
        let ds = vec![d(&[0, 1]), d(&[0, 2]), d(&[2])];
        let kept: Vec<&[usize]> = filter_contiguous_distinctions(&ds)
            .into_iter()
            .map(|d| d.mechanism.as_slice())
            .collect();
        assert_eq!(kept, vec![&[0, 1][..], &[2][..]]);
    }
}
