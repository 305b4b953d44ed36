//! Typed map integration tests
//!
//! A minimal map keyed by identity keys, guarded by key and value constraints.

use std::collections::HashMap;

use typeguard::{
    ClassDef, ClassRegistry, ErrorKind, Object, Result, TypeConstraintSet, TypeMatcher, Value,
    encode,
};

struct TypedMap {
    keys: TypeConstraintSet,
    values: TypeConstraintSet,
    matcher: TypeMatcher<ClassRegistry>,
    default: Option<Value>,
    entries: HashMap<String, (Value, Value)>,
}

impl TypedMap {
    fn new(keys: &str, values: &str, classes: ClassRegistry) -> Result<Self> {
        let keys = TypeConstraintSet::new(keys)?;
        let values = TypeConstraintSet::new(values)?;
        let default = values.try_infer_default();
        Ok(Self {
            keys,
            values,
            matcher: TypeMatcher::new(classes),
            default,
            entries: HashMap::new(),
        })
    }

    fn put(&mut self, key: Value, value: Value) -> Result<()> {
        self.matcher.check(&self.keys, &key, Some("key"))?;
        self.matcher.check(&self.values, &value, Some("value"))?;
        self.entries.insert(encode(&key)?, (key, value));
        Ok(())
    }

    fn get(&self, key: &Value) -> Result<Option<Value>> {
        let hash = encode(key)?;
        Ok(self
            .entries
            .get(&hash)
            .map(|(_, v)| v.clone())
            .or_else(|| self.default.clone()))
    }
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn default_inferred_from_value_constraints() {
    let map = TypedMap::new("int|string", "int|string", ClassRegistry::new()).unwrap();
    assert_eq!(map.get(&Value::Int(1)).unwrap(), Some(Value::Int(0)));

    let nullable = TypedMap::new("int", "?bool", ClassRegistry::new()).unwrap();
    assert_eq!(nullable.get(&Value::Int(1)).unwrap(), Some(Value::Null));

    let objects = TypedMap::new("int", "DateTime", ClassRegistry::new()).unwrap();
    assert_eq!(objects.get(&Value::Int(1)).unwrap(), None);
}

#[test]
fn invalid_constraints_fail_construction() {
    let err = TypedMap::new("int|", "mixed", ClassRegistry::new())
        .err()
        .unwrap();
    assert!(matches!(err.kind, ErrorKind::InvalidTypeSpec { .. }));
}

// =============================================================================
// Storage
// =============================================================================

#[test]
fn keys_are_compared_by_identity_key() {
    let mut map = TypedMap::new("mixed", "int", ClassRegistry::new()).unwrap();
    map.put(Value::Int(1), Value::Int(10)).unwrap();
    map.put(Value::from("1"), Value::Int(20)).unwrap();
    map.put(Value::Float(1.0), Value::Int(30)).unwrap();
    map.put(Value::Int(1), Value::Int(11)).unwrap();

    assert_eq!(map.entries.len(), 3);
    assert_eq!(map.get(&Value::Int(1)).unwrap(), Some(Value::Int(11)));
    assert_eq!(map.get(&Value::from("1")).unwrap(), Some(Value::Int(20)));
}

#[test]
fn array_keys_by_content() {
    let mut map = TypedMap::new("array", "string", ClassRegistry::new()).unwrap();
    map.put(Value::array([1, 2]), Value::from("pair")).unwrap();
    assert_eq!(
        map.get(&Value::array([1, 2])).unwrap(),
        Some(Value::from("pair"))
    );
    assert_eq!(map.get(&Value::array([2, 1])).unwrap(), Some(Value::from("")));
}

#[test]
fn object_keys_by_instance() {
    let classes = ClassRegistry::new().with(ClassDef::new("User").implements("Entity"));
    let mut map = TypedMap::new("Entity", "int", classes).unwrap();
    let alice = Object::new("User").unwrap().with_field("name", "alice");
    let twin = Object::new("User").unwrap().with_field("name", "alice");

    map.put(alice.clone().into(), Value::Int(1)).unwrap();
    assert_eq!(map.get(&alice.into()).unwrap(), Some(Value::Int(1)));
    assert_eq!(map.get(&twin.into()).unwrap(), Some(Value::Int(0)));
}

#[test]
fn rejected_entries_leave_map_unchanged() {
    let mut map = TypedMap::new("int", "string", ClassRegistry::new()).unwrap();
    let err = map.put(Value::from("k"), Value::from("v")).unwrap_err();
    match err.kind {
        ErrorKind::DisallowedType { label, actual, .. } => {
            assert_eq!(label.as_deref(), Some("key"));
            assert_eq!(actual, "string");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = map.put(Value::Int(1), Value::Null).unwrap_err();
    assert!(err.to_string().contains("value"));
    assert!(map.entries.is_empty());
}

#[test]
fn cyclic_keys_cannot_be_stored() {
    let mut map = TypedMap::new("array", "int", ClassRegistry::new()).unwrap();
    let cyclic = typeguard::Array::new();
    cyclic.push(cyclic.clone());
    let err = map.put(cyclic.into(), Value::Int(1)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Unencodable(_)));
    assert!(map.entries.is_empty());
}
