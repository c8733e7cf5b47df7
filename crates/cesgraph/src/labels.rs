//! Index tuple ↔ label conversion and the contiguity predicate.
//!
//! A label is the concatenation of the universe labels at the given indices,
//! in index order: `(3, 4, 5)` over `HGFEDCBA` is `"EDC"`.

use crate::error::{CesError, Result};
use crate::model::{NodeIxs, Universe};

/// Concatenate the universe labels at `ixs`, preserving order.
pub fn indices_to_label(ixs: &NodeIxs, universe: &Universe) -> Result<String> {
    ixs.as_slice()
        .iter()
        .map(|&ix| {
            universe
                .labels()
                .get(ix)
                .copied()
                .ok_or(CesError::IndexOutOfRange {
                    index: ix,
                    len: universe.len(),
                })
        })
        .collect()
}

/// Inverse of [`indices_to_label`]; universe labels are unique, so each
/// character has exactly one position.
pub fn label_to_indices(label: &str, universe: &Universe) -> Result<NodeIxs> {
    let ixs = label
        .chars()
        .map(|symbol| {
            universe
                .labels()
                .iter()
                .position(|&l| l == symbol)
                .ok_or(CesError::UnknownSymbol { symbol })
        })
        .collect::<Result<Vec<usize>>>()?;
    Ok(NodeIxs(ixs))
}

/// Batch form of [`indices_to_label`].
pub fn nodes_to_labels<'a, I>(mechanisms: I, universe: &Universe) -> Result<Vec<String>>
where
    I: IntoIterator<Item = &'a NodeIxs>,
{
    mechanisms
        .into_iter()
        .map(|m| indices_to_label(m, universe))
        .collect()
}

/// Successive indices differ by exactly one; empty and singletons are contiguous.
pub fn is_contiguous(ixs: &[usize]) -> bool {
    ixs.windows(2).all(|w| w[0].checked_add(1) == Some(w[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reversed8() -> Universe {
        Universe::new("HGFEDCBA".chars()).unwrap()
    }

    #[test]
    fn label_examples() {
        let u = reversed8();
        assert_eq!(indices_to_label(&NodeIxs::from([3, 4, 5]), &u).unwrap(), "EDC");
        assert_eq!(label_to_indices("EDC", &u).unwrap(), NodeIxs::from([3, 4, 5]));
        assert_eq!(indices_to_label(&NodeIxs::default(), &u).unwrap(), "");
    }

    #[test]
    fn lookup_failures() {
        let u = Universe::alphabetic(3);
        let err = label_to_indices("AZ", &u).unwrap_err();
        assert_eq!(err, CesError::UnknownSymbol { symbol: 'Z' });
        assert!(err.is_lookup());
        let err = indices_to_label(&NodeIxs::from([0, 3]), &u).unwrap_err();
        assert_eq!(err, CesError::IndexOutOfRange { index: 3, len: 3 });
        assert!(err.is_lookup());
    }

    #[test]
    fn contiguity() {
        assert!(is_contiguous(&[]));
        assert!(is_contiguous(&[4]));
        assert!(is_contiguous(&[3, 4, 5, 6]));
        assert!(!is_contiguous(&[3, 5, 6]));
        assert!(!is_contiguous(&[2, 1]));
        assert!(!is_contiguous(&[usize::MAX, 0]));
        assert!(is_contiguous(&[usize::MAX - 1, usize::MAX]));
    }

    #[test]
    fn repeated_universe_label_is_rejected() {
        let err = Universe::new("ABA".chars()).unwrap_err();
        assert_eq!(err, CesError::DuplicateSymbol { symbol: 'A' });
        assert!(Universe::try_from(vec!['B', 'B']).is_err());
    }

    #[test]
    fn batch_labels() {
        let u = Universe::alphabetic(4);
        let ms = [NodeIxs::from([0]), NodeIxs::from([1, 3])];
        assert_eq!(nodes_to_labels(&ms, &u).unwrap(), vec!["A", "BD"]);
    }

    proptest! {
        #[test]
        fn label_roundtrip(n in 1usize..=26, raw in proptest::collection::btree_set(0usize..26, 0..8)) {
            let u = Universe::alphabetic(n);
            let ixs = NodeIxs::new(raw.into_iter().filter(|&ix| ix < n));
            let label = indices_to_label(&ixs, &u).unwrap();
            prop_assert_eq!(label_to_indices(&label, &u).unwrap(), ixs);
        }
    }
}
