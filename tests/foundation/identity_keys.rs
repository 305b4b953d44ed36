//! Integration tests for identity keys
//!
//! Tests that fingerprints agree with strict equality.

use proptest::prelude::*;
use std::collections::HashSet;
use typeguard_foundation::{
    Array, EncoderConfig, ErrorKind, IdentityKeyEncoder, Object, Resource, UnencodableReason,
    Value, encode,
};

fn key(value: impl Into<Value>) -> String {
    encode(&value.into()).unwrap()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn one_in_four_kinds_gives_four_keys() {
    let keys: HashSet<String> = [key(1), key("1"), key(1.0), key(true)].into_iter().collect();
    assert_eq!(keys.len(), 4);
}

#[test]
fn array_keys_are_stable_and_order_sensitive() {
    assert_eq!(key(Value::array([1, 2])), key(Value::array([1, 2])));
    assert_ne!(key(Value::array([1, 2])), key(Value::array([2, 1])));
}

#[test]
fn empty_values_differ() {
    let keys: HashSet<String> = [
        key(Value::Null),
        key(""),
        key(0),
        key(false),
        key(Value::array(Vec::<Value>::new())),
    ]
    .into_iter()
    .collect();
    assert_eq!(keys.len(), 5);
}

#[test]
fn string_and_int_keys_in_arrays_differ() {
    let int_keyed = Array::new();
    int_keyed.insert(1, "x");
    let str_keyed = Array::new();
    str_keyed.insert("1", "x");
    assert_ne!(key(int_keyed), key(str_keyed));
}

#[test]
fn mutating_an_array_changes_its_key() {
    let a = Array::from_values([1]);
    let before = key(a.clone());
    a.push(2);
    assert_ne!(before, key(a));
}

#[test]
fn distinct_instances_with_equal_fields_differ() {
    let a = Object::new("Money").unwrap().with_field("amount", 5);
    let b = Object::new("Money").unwrap().with_field("amount", 5);
    assert_ne!(key(a.clone()), key(b));
    assert_eq!(key(a.clone()), key(a));
}

#[test]
fn resources_embed_their_kind() {
    let r = Resource::new("stream").unwrap();
    let k = key(r.clone());
    assert!(k.starts_with("R6:stream"));
    assert!(k.ends_with(&r.id().get().to_string()));
}

#[test]
fn self_referential_array_is_rejected() {
    let a = Array::new();
    a.push(1);
    a.insert("self", a.clone());
    let err = encode(&Value::Array(a)).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::Unencodable(UnencodableReason::Cycle)
    ));
}

#[test]
fn deep_acyclic_arrays_encode_unless_limited() {
    let mut v = Value::Null;
    for _ in 0..301 {
        v = Value::array([v]);
    }
    let shallow = IdentityKeyEncoder::new(EncoderConfig::default().with_max_depth(300));
    let err = shallow.encode(&v).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::Unencodable(UnencodableReason::DepthExceeded { limit: 300 })
    ));
    assert!(IdentityKeyEncoder::default().encode(&v).is_ok());
}

// =============================================================================
// Properties
// =============================================================================

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<f64>().prop_map(Value::Float),
        "[a-z0-9:]{0,6}".prop_map(Value::from),
    ]
}

proptest! {
    #[test]
    fn keys_distinguish_what_strict_equality_distinguishes(
        a in prop::collection::vec(scalar(), 0..4),
        b in prop::collection::vec(scalar(), 0..4),
    ) {
        let (a, b) = (Value::array(a), Value::array(b));
        prop_assert_eq!(key(a.clone()) == key(b.clone()), a == b);
    }

    #[test]
    fn pairs_of_strings_never_collide(a in "[a-z:]{0,4}", b in "[a-z:]{0,4}", c in "[a-z:]{0,4}", d in "[a-z:]{0,4}") {
        let left = key(Value::array([a.as_str(), b.as_str()]));
        let right = key(Value::array([c.as_str(), d.as_str()]));
        prop_assert_eq!(left == right, a == c && b == d);
    }
}
