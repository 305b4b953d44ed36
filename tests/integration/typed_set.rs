//! Typed set integration tests
//!
//! Membership is decided by identity keys under a shared constraint set.

use std::collections::BTreeSet;

use typeguard::{
    EncoderConfig, IdentityKeyEncoder, Resource, TypeConstraintSet, TypeMatcher, Value,
};

fn members(values: &[Value]) -> BTreeSet<String> {
    let matcher = TypeMatcher::default();
    let constraints = TypeConstraintSet::new("scalar|array|resource").unwrap();
    let encoder = IdentityKeyEncoder::new(EncoderConfig::default());
    values
        .iter()
        .filter(|v| matcher.matches(&constraints, v))
        .map(|v| encoder.encode(v).unwrap())
        .collect()
}

#[test]
fn mixed_scalars_stay_distinct() {
    let set = members(&[
        Value::Int(0),
        Value::Bool(false),
        Value::from(""),
        Value::from("0"),
        Value::Float(0.0),
        Value::Null,
    ]);
    // null is filtered out by the constraints
    assert_eq!(set.len(), 5);
}

#[test]
fn duplicates_collapse() {
    let handle = Resource::new("stream").unwrap();
    let set = members(&[
        Value::array(["a", "b"]),
        Value::array(["a", "b"]),
        handle.clone().into(),
        handle.into(),
        Resource::new("stream").unwrap().into(),
    ]);
    assert_eq!(set.len(), 3);
}

#[test]
fn shallow_encoder_limits_nesting() {
    let encoder = IdentityKeyEncoder::new(EncoderConfig::default().with_max_depth(1));
    assert!(encoder.encode(&Value::array([1])).is_ok());
    assert!(encoder.encode(&Value::array([Value::array([1])])).is_err());
}
