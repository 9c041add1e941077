//! Property-based tests for PairList and PairView laws.
//!
//! This module verifies the invariants of lists and views against a plain
//! `Vec` model using proptest.

use pairlist::prelude::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Operation {
    Insert(usize, u8, i16),
    Remove(usize),
    Set(usize, u8, i16),
    Clear,
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        4 => (any::<usize>(), any::<u8>(), any::<i16>())
            .prop_map(|(index, first, second)| Operation::Insert(index, first, second)),
        2 => any::<usize>().prop_map(Operation::Remove),
        2 => (any::<usize>(), any::<u8>(), any::<i16>())
            .prop_map(|(index, first, second)| Operation::Set(index, first, second)),
        1 => Just(Operation::Clear),
    ]
}

fn build(pairs: &[(u8, i16)]) -> PairList<u8, i16> {
    pairs.iter().copied().collect()
}

/// Applies `operation` to both `sequence` and `model`; returns whether the
/// model changed.
fn apply<S>(sequence: &mut S, model: &mut Vec<(u8, i16)>, operation: &Operation) -> bool
where
    S: PairSequence<First = u8, Second = i16>,
{
    match *operation {
        Operation::Insert(index, first, second) => {
            let index = index % (model.len() + 1);
            sequence.put_at(index, first, second).unwrap();
            model.insert(index, (first, second));
            true
        }
        Operation::Remove(index) => {
            if model.is_empty() {
                assert!(sequence.remove(0).is_err());
                return false;
            }
            let index = index % model.len();
            let removed = sequence.remove(index).unwrap();
            assert_eq!(removed.into_inner(), model.remove(index));
            true
        }
        Operation::Set(index, first, second) => {
            if model.is_empty() {
                return false;
            }
            let index = index % model.len();
            sequence.set_slots(index, first, second).unwrap();
            model[index] = (first, second);
            true
        }
        Operation::Clear => {
            sequence.clear().unwrap();
            let changed = !model.is_empty();
            model.clear();
            changed
        }
    }
}

fn contents<S: PairSequence<First = u8, Second = i16>>(sequence: &S) -> Vec<(u8, i16)> {
    sequence
        .pairs()
        .unwrap()
        .into_iter()
        .map(Pair::into_inner)
        .collect()
}

// =============================================================================
// List Laws
// =============================================================================

proptest! {
    /// The list behaves like a Vec under any sequence of operations.
    #[test]
    fn prop_list_matches_model(
        initial in prop::collection::vec(any::<(u8, i16)>(), 0..20),
        operations in prop::collection::vec(operation(), 0..40)
    ) {
        let mut list = build(&initial);
        let mut model = initial;
        for operation in &operations {
            apply(&mut list, &mut model, operation);
            prop_assert_eq!(contents(&list), model.clone());
        }
    }

    /// The version moves by exactly one per content-changing call and never
    /// otherwise.
    #[test]
    fn prop_version_counts_changes(
        initial in prop::collection::vec(any::<(u8, i16)>(), 0..20),
        operations in prop::collection::vec(operation(), 0..40)
    ) {
        let mut list = build(&initial);
        let mut model = initial;
        let mut expected = Version::INITIAL;
        for operation in &operations {
            if apply(&mut list, &mut model, operation) {
                expected = expected.next();
            }
            prop_assert_eq!(list.version().unwrap(), expected);
        }
    }

    /// Flat round-trip through an alike list reproduces an equal list.
    #[test]
    fn prop_flat_round_trip(initial in prop::collection::vec(any::<(u8, i16)>(), 0..30)) {
        let list = build(&initial);
        let mut copy = list.alike();
        copy.load(list.to_flat().unwrap()).unwrap();
        prop_assert_eq!(copy, list);
    }

    /// zip appends everything for equal lengths and nothing otherwise.
    #[test]
    fn prop_zip_is_atomic(
        initial in prop::collection::vec(any::<(u8, i16)>(), 0..10),
        firsts in prop::collection::vec(any::<u8>(), 0..10),
        seconds in prop::collection::vec(any::<i16>(), 0..10)
    ) {
        let mut list = build(&initial);
        let result = list.zip(firsts.clone(), seconds.clone());
        if firsts.len() == seconds.len() {
            prop_assert!(result.is_ok());
            let mut expected = initial;
            expected.extend(firsts.into_iter().zip(seconds));
            prop_assert_eq!(contents(&list), expected);
        } else {
            prop_assert!(result.is_err());
            prop_assert_eq!(contents(&list), initial);
            prop_assert_eq!(list.version().unwrap(), Version::INITIAL);
        }
    }
}

// =============================================================================
// View Laws
// =============================================================================

proptest! {
    /// Operations through a view act on the matching slice of the list.
    #[test]
    fn prop_view_matches_model_slice(
        initial in prop::collection::vec(any::<(u8, i16)>(), 0..20),
        bounds in (any::<usize>(), any::<usize>()),
        operations in prop::collection::vec(operation(), 0..30)
    ) {
        let list = build(&initial);
        let to = bounds.1 % (initial.len() + 1);
        let from = bounds.0 % (to + 1);
        let mut view = list.view(from, to).unwrap();

        let prefix = initial[..from].to_vec();
        let suffix = initial[to..].to_vec();
        let mut window = initial[from..to].to_vec();

        for operation in &operations {
            apply(&mut view, &mut window, operation);
            prop_assert_eq!(contents(&view), window.clone());
        }

        let mut expected = prefix;
        expected.extend(window);
        expected.extend(suffix);
        prop_assert_eq!(contents(&list), expected);
    }

    /// Any change to the list makes every nested view stale.
    #[test]
    fn prop_list_change_invalidates_nested_views(
        initial in prop::collection::vec(any::<(u8, i16)>(), 1..20),
        first in any::<u8>(),
        second in any::<i16>()
    ) {
        let mut list = build(&initial);
        let outer = list.view(0, initial.len()).unwrap();
        let inner = outer.subview(0, initial.len()).unwrap();

        list.put(first, second).unwrap();

        prop_assert_eq!(outer.len().unwrap_err().kind(), ErrorKind::StructuralConflict);
        prop_assert_eq!(inner.len().unwrap_err().kind(), ErrorKind::StructuralConflict);
    }
}
