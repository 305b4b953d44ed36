//! Integration tests for TypeConstraintSet

use proptest::prelude::*;
use typeguard_foundation::Value;
use typeguard_types::{TypeConstraintSet, TypeToken};

/// Type names that are valid on their own and after a `?` prefix.
const NAMES: &[&str] = &[
    "bool", "int", "float", "string", "array", "object", "resource", "scalar", "number", "uint",
    "iterable", "callable", "resource (stream)", "DateTime", "App\\Model",
];

#[test]
fn constructed_from_list_of_names() {
    let set = TypeConstraintSet::new(vec!["int", "string", "int"]).unwrap();
    assert_eq!(set.len(), 2);
    assert!(set.contains_only("string|int").unwrap());
}

#[test]
fn grow_only() {
    let mut set = TypeConstraintSet::new("int").unwrap();
    set.add("?string").unwrap();
    assert!(set.null_ok());
    assert_eq!(set.len(), 3);
}

#[test]
fn add_rejects_non_string_elements() {
    let mut set = TypeConstraintSet::any();
    assert!(set.add(vec![Value::from("int"), Value::Bool(true)]).is_err());
    assert!(set.is_empty());
}

#[test]
fn merging_two_owners() {
    let keys = TypeConstraintSet::new("int|string").unwrap();
    let mut merged = keys.clone();
    merged.add_set(&TypeConstraintSet::new("float").unwrap());
    assert!(merged.contains_all("int|string|float").unwrap());
    assert!(!keys.contains_any("float").unwrap());
}

#[test]
fn iteration_is_deterministic() {
    let a = TypeConstraintSet::new("string|int|Foo").unwrap();
    let b = TypeConstraintSet::new("Foo|int|string").unwrap();
    let left: Vec<&TypeToken> = a.iter().collect();
    let right: Vec<&TypeToken> = (&b).into_iter().collect();
    assert_eq!(left, right);
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn collects_from_tokens() {
    let set: TypeConstraintSet = [TypeToken::NULL, TypeToken::NULL].into_iter().collect();
    assert_eq!(set.len(), 1);
    assert!(set.null_ok());
    assert!(!set.any_ok());
}

proptest! {
    #[test]
    fn nullable_equals_union_with_null(name in prop::sample::select(NAMES)) {
        let nullable = TypeConstraintSet::new(format!("?{name}")).unwrap();
        let union = TypeConstraintSet::new(format!("{name}|null")).unwrap();
        prop_assert!(nullable.contains_only(&union.to_string()).unwrap());
        prop_assert!(union.contains_only(&nullable.to_string()).unwrap());
        prop_assert_eq!(nullable, union);
    }

    #[test]
    fn union_order_does_not_matter(names in prop::sample::subsequence(NAMES, 1..6)) {
        let mut names = names;
        let forward = TypeConstraintSet::new(names.join("|")).unwrap();
        names.reverse();
        let backward = TypeConstraintSet::new(names.join("|")).unwrap();
        prop_assert_eq!(forward, backward);
    }
}
