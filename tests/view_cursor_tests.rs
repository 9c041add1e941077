//! Integration tests for ViewCursor.

use pairlist::prelude::*;
use rstest::{fixture, rstest};

#[fixture]
fn list() -> PairList<&'static str, i32> {
    [("a", 1), ("b", 2), ("c", 3), ("d", 4), ("e", 5)]
        .into_iter()
        .collect()
}

#[rstest]
fn test_cursor_yields_window_in_order(list: PairList<&'static str, i32>) {
    let mut view = list.view(1, 4).unwrap();
    let yielded: Vec<_> = view
        .cursor()
        .map(|pair| pair.map(|pair| *pair.first()))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(yielded, vec!["b", "c", "d"]);
}

#[rstest]
fn test_cursor_over_empty_view(list: PairList<&'static str, i32>) {
    let mut view = list.view(2, 2).unwrap();
    let mut cursor = view.cursor();
    assert!(!cursor.has_next());
    assert!(cursor.next().is_none());
}

#[rstest]
fn test_remove_shrinks_root_by_one_and_shifts_successor(list: PairList<&'static str, i32>) {
    let mut view = list.view(1, 4).unwrap();
    let mut cursor = view.cursor();

    assert_eq!(cursor.next().unwrap().unwrap(), Pair::new("b", 2));
    assert_eq!(cursor.remove().unwrap(), Pair::new("b", 2));
    assert_eq!(list.len().unwrap(), 4);

    assert_eq!(cursor.next().unwrap().unwrap(), Pair::new("c", 3));
    assert_eq!(
        cursor.remove().and_then(|_| cursor.remove()).unwrap_err(),
        PairListError::IllegalIteratorState
    );
    assert_eq!(list.firsts().unwrap(), vec!["a", "d", "e"]);
    assert_eq!(view.len().unwrap(), 1);
}

#[rstest]
fn test_remove_every_element(list: PairList<&'static str, i32>) {
    let mut view = list.view(0, 5).unwrap();
    let mut cursor = view.cursor();
    let mut removed = 0;
    while let Some(pair) = cursor.next() {
        pair.unwrap();
        cursor.remove().unwrap();
        removed += 1;
    }
    assert_eq!(removed, 5);
    assert!(list.is_empty().unwrap());
    assert_eq!(list.version().unwrap().get(), 5);
}

#[rstest]
fn test_cursor_remove_keeps_nested_parent_fresh(list: PairList<&'static str, i32>) {
    let outer = list.view(0, 5).unwrap();
    let mut inner = outer.subview(2, 5).unwrap();
    {
        let mut cursor = inner.cursor();
        cursor.next().unwrap().unwrap();
        cursor.remove().unwrap();
    }
    assert_eq!(outer.firsts().unwrap(), vec!["a", "b", "d", "e"]);
    assert_eq!(inner.firsts().unwrap(), vec!["d", "e"]);
}

#[rstest]
fn test_external_mutation_surfaces_on_next(mut list: PairList<&'static str, i32>) {
    let mut view = list.view(0, 3).unwrap();
    let external = list.view(3, 5).unwrap();
    let mut cursor = view.cursor();
    cursor.next().unwrap().unwrap();

    list.put("f", 6).unwrap();

    let error = cursor.next().unwrap().unwrap_err();
    assert_eq!(error.kind(), ErrorKind::StructuralConflict);
    assert!(cursor.next().is_none());
    assert_eq!(
        cursor.remove().unwrap_err(),
        PairListError::IllegalIteratorState
    );
    assert!(external.len().is_err());
}

#[rstest]
fn test_remove_after_external_mutation_is_conflict(mut list: PairList<&'static str, i32>) {
    let mut view = list.view(0, 3).unwrap();
    let mut cursor = view.cursor();
    cursor.next().unwrap().unwrap();

    list.remove(4).unwrap();

    let error = cursor.remove().unwrap_err();
    assert_eq!(error.kind(), ErrorKind::StructuralConflict);
    assert_eq!(list.len().unwrap(), 4);
}
