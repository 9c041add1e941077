//! Integration tests for Pair, Triple and the Tuple trait.

use std::collections::HashSet;

use pairlist::{Pair, Triple, Tuple};
use rstest::rstest;

#[rstest]
fn test_pairs_deduplicate_in_hash_set() {
    let set: HashSet<Pair<&str, i32>> = [Pair::new("a", 1), Pair::new("a", 1), Pair::new("b", 1)]
        .into_iter()
        .collect();
    assert_eq!(set.len(), 2);
}

#[rstest]
fn test_clone_is_identical_but_new_is_not() {
    let pair = Pair::new(String::from("x"), vec![1, 2]);
    assert!(pair.ptr_eq(&pair.clone()));
    assert!(!pair.ptr_eq(&Pair::new(String::from("x"), vec![1, 2])));
}

#[rstest]
#[case(0, true)]
#[case(1, false)]
fn test_contains_is_typed(#[case] probe: u8, #[case] expected: bool) {
    let pair = Pair::new(0_u8, 1_i32);
    assert_eq!(pair.contains(&probe), expected);
}

#[rstest]
fn test_tuples_as_trait_objects() {
    let tuples: Vec<Box<dyn Tuple>> = vec![
        Box::new(Pair::new(1, 2)),
        Box::new(Triple::new(1, 2, 3)),
    ];
    let arities: Vec<_> = tuples.iter().map(|tuple| tuple.arity()).collect();
    assert_eq!(arities, vec![2, 3]);
    assert!(tuples.iter().all(|tuple| tuple.slot(tuple.arity()).is_none()));
}

#[rstest]
fn test_triple_display_and_slots() {
    let triple = Triple::from(("x", 2, 'z'));
    assert_eq!(triple.to_string(), "(x, 2, z)");
    assert_eq!(triple.third(), &'z');
    assert_eq!(triple.slot(2).and_then(|slot| slot.downcast_ref::<char>()), Some(&'z'));
}

#[cfg(feature = "arc")]
mod arc_tests {
    use super::*;

    static_assertions::assert_impl_all!(Pair<String, i32>: Send, Sync);
    static_assertions::assert_impl_all!(Triple<String, i32, u8>: Send, Sync);

    #[rstest]
    fn test_pair_crosses_threads() {
        let pair = Pair::new(String::from("shared"), 7);
        let moved = pair.clone();
        let handle = std::thread::spawn(move || *moved.second() * 6);
        assert_eq!(handle.join().unwrap(), 42);
        assert_eq!(pair.first(), "shared");
    }
}

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(Pair<String, i32>: Send, Sync);
