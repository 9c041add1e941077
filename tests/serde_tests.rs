#![cfg(feature = "serde")]
//! Serde support for tuples and pair lists.

use pairlist::prelude::*;
use rstest::rstest;

#[rstest]
fn test_pair_serializes_as_array() {
    let json = serde_json::to_string(&Pair::new("a", 1)).unwrap();
    assert_eq!(json, r#"["a",1]"#);
}

#[rstest]
fn test_triple_round_trip() {
    let triple = Triple::new(1_u8, String::from("b"), true);
    let json = serde_json::to_string(&triple).unwrap();
    assert_eq!(json, r#"[1,"b",true]"#);
    let decoded: Triple<u8, String, bool> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, triple);
}

#[rstest]
fn test_list_serializes_as_nested_arrays() {
    let list: PairList<String, i32> = [("a".to_string(), 1), ("b".to_string(), 2)]
        .into_iter()
        .collect();
    assert_eq!(serde_json::to_string(&list).unwrap(), r#"[["a",1],["b",2]]"#);
}

#[rstest]
fn test_list_deserializes_with_fresh_version() {
    let list: PairList<String, i32> = serde_json::from_str(r#"[["x",7],["y",8]]"#).unwrap();
    assert_eq!(list.len().unwrap(), 2);
    assert_eq!(list.get(1).unwrap(), Pair::new("y".to_string(), 8));
    assert_eq!(list.version().unwrap(), Version::INITIAL);
}

#[rstest]
#[case::three_slots(r#"[["x",7,1]]"#)]
#[case::wrong_type(r#"[[7,"x"]]"#)]
#[case::not_a_sequence(r#"{"x":7}"#)]
fn test_list_rejects_malformed_input(#[case] json: &str) {
    assert!(serde_json::from_str::<PairList<String, i32>>(json).is_err());
}

#[rstest]
fn test_empty_list_round_trip() {
    let list = pairlist::of::<String, i32>();
    let json = serde_json::to_string(&list).unwrap();
    assert_eq!(json, "[]");
    let decoded: PairList<String, i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, list);
}
