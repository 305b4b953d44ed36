//! Runtime value model for type-checked collections.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::identity::InstanceId;
use crate::names;

/// The closed set of basic value kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Kind {
    /// The null kind (only value: null).
    Null,
    /// Boolean kind.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// Byte string.
    String,
    /// Ordered key/value array.
    Array,
    /// Class instance.
    Object,
    /// Opaque resource handle.
    Resource,
}

impl Kind {
    /// Every kind, in declaration order.
    pub const ALL: [Kind; 8] = [
        Kind::Null,
        Kind::Bool,
        Kind::Int,
        Kind::Float,
        Kind::String,
        Kind::Array,
        Kind::Object,
        Kind::Resource,
    ];

    /// Returns the reserved type name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
            Self::Resource => "resource",
        }
    }

    /// Looks up a kind by its reserved type name (case-sensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Returns true for the kinds matched by the `scalar` pseudotype.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(self, Self::Bool | Self::Int | Self::Float | Self::String)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A runtime value stored in, or used as a key of, a typed collection.
///
/// Scalars are held inline. Arrays, objects and resources are shared
/// handles: cloning a `Value` never deep-copies them.
#[derive(Clone)]
pub enum Value {
    /// The null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(Arc<str>),
    /// Ordered key/value array.
    Array(Array),
    /// Class instance.
    Object(Object),
    /// Resource handle.
    Resource(Resource),
}

impl Value {
    /// Returns the basic kind of this value.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Null => Kind::Null,
            Self::Bool(_) => Kind::Bool,
            Self::Int(_) => Kind::Int,
            Self::Float(_) => Kind::Float,
            Self::String(_) => Kind::String,
            Self::Array(_) => Kind::Array,
            Self::Object(_) => Kind::Object,
            Self::Resource(_) => Kind::Resource,
        }
    }

    /// Creates a list-style array value from the given elements.
    #[must_use]
    pub fn array<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::Array(Array::from_values(values))
    }

    /// Returns true if this value is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Attempts to extract a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract an integer value.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a float value.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract an array handle.
    #[must_use]
    pub const fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Attempts to extract an object handle.
    #[must_use]
    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Attempts to extract a resource handle.
    #[must_use]
    pub const fn as_resource(&self) -> Option<&Resource> {
        match self {
            Self::Resource(r) => Some(r),
            _ => None,
        }
    }
}

/// Strict equality: same kind and same value.
///
/// Floats compare by bit pattern, arrays compare entry by entry in order,
/// objects and resources compare by instance identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        strict_eq(self, other, &mut Vec::new())
    }
}

/// Compares two values, assuming equality for array pairs already under
/// comparison so that cyclic arrays terminate.
fn strict_eq(a: &Value, b: &Value, assumed: &mut Vec<(usize, usize)>) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x.to_bits() == y.to_bits(),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Object(x), Value::Object(y)) => x.id() == y.id(),
        (Value::Resource(x), Value::Resource(y)) => x.id() == y.id(),
        (Value::Array(x), Value::Array(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            let pair = (x.addr(), y.addr());
            if assumed.contains(&pair) {
                return true;
            }
            let (left, right) = (x.entries(), y.entries());
            if left.len() != right.len() {
                return false;
            }
            assumed.push(pair);
            let equal = left
                .iter()
                .zip(right.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && strict_eq(va, vb, assumed));
            assumed.pop();
            equal
        }
        _ => false,
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n:?}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Array(a) => write!(f, "{a:?}"),
            Self::Object(o) => write!(f, "{o:?}"),
            Self::Resource(r) => write!(f, "{r:?}"),
        }
    }
}

// =============================================================================
// Arrays
// =============================================================================

/// Key of an array entry.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArrayKey {
    /// Integer key.
    Int(i64),
    /// String key.
    String(Arc<str>),
}

impl fmt::Display for ArrayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<i64> for ArrayKey {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for ArrayKey {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for ArrayKey {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}

/// Shared, ordered key/value array.
///
/// Clones share the same storage, so an array can be stored inside itself.
/// Entries keep insertion order; re-inserting an existing key replaces its
/// value in place.
#[derive(Clone, Default)]
pub struct Array(Rc<RefCell<ArrayData>>);

#[derive(Clone, Default)]
struct ArrayData {
    entries: im::Vector<(ArrayKey, Value)>,
    next_index: i64,
}

impl Array {
    /// Creates an empty array.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a list-style array keyed `0..n`.
    #[must_use]
    pub fn from_values<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let array = Self::new();
        for value in values {
            array.push(value);
        }
        array
    }

    /// Appends a value under the next free integer key.
    pub fn push(&self, value: impl Into<Value>) {
        let mut data = self.0.borrow_mut();
        let key = ArrayKey::Int(data.next_index);
        data.next_index = data.next_index.saturating_add(1);
        data.entries.push_back((key, value.into()));
    }

    /// Inserts a value, replacing the value of an existing key in place.
    pub fn insert(&self, key: impl Into<ArrayKey>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        let mut data = self.0.borrow_mut();
        if let ArrayKey::Int(n) = key {
            if n >= data.next_index {
                data.next_index = n.saturating_add(1);
            }
        }
        let existing = data.entries.iter().position(|(k, _)| *k == key);
        match existing {
            Some(index) => {
                data.entries.set(index, (key, value));
            }
            None => data.entries.push_back((key, value)),
        }
    }

    /// Gets the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &ArrayKey) -> Option<Value> {
        self.0
            .borrow()
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().entries.len()
    }

    /// Returns true if the array has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().entries.is_empty()
    }

    /// Returns a snapshot of the entries in insertion order.
    ///
    /// The snapshot shares structure with the array and is O(1) to take;
    /// later mutations of the array do not affect it.
    #[must_use]
    pub fn entries(&self) -> im::Vector<(ArrayKey, Value)> {
        self.0.borrow().entries.clone()
    }

    /// Returns true if both handles refer to the same storage.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the address of the shared storage, stable while the array lives.
    #[must_use]
    pub fn addr(&self) -> usize {
        Rc::as_ptr(&self.0).addr()
    }
}

/// Shows one level of entries; nested arrays are summarized by their length.
impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries();
        write!(f, "array({}) [", entries.len())?;
        for (i, (key, value)) in entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match value {
                Value::Array(inner) => write!(f, "{key} => array({})", inner.len())?,
                other => write!(f, "{key} => {other:?}")?,
            }
        }
        write!(f, "]")
    }
}

// =============================================================================
// Objects and resources
// =============================================================================

/// Shared handle to a class instance.
///
/// Equality and identity keys follow the instance, never its fields.
#[derive(Clone)]
pub struct Object(Rc<ObjectData>);

struct ObjectData {
    id: InstanceId,
    class: Arc<str>,
    fields: RefCell<im::OrdMap<Arc<str>, Value>>,
}

impl Object {
    /// Creates a new instance of `class` with no fields set.
    ///
    /// A leading namespace separator on the class name is dropped.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTypeSpec` if the class name is not a valid type name.
    pub fn new(class: &str) -> Result<Self> {
        let class = class.strip_prefix('\\').unwrap_or(class);
        if !names::is_class_name(class) {
            return Err(Error::invalid_type_spec(class, "invalid class name"));
        }
        Ok(Self(Rc::new(ObjectData {
            id: InstanceId::allocate(),
            class: class.into(),
            fields: RefCell::new(im::OrdMap::new()),
        })))
    }

    /// Returns the instance identity.
    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.0.id
    }

    /// Returns the runtime class name.
    #[must_use]
    pub fn class(&self) -> &str {
        &self.0.class
    }

    /// Sets a field value.
    pub fn set_field(&self, name: &str, value: impl Into<Value>) {
        self.0.fields.borrow_mut().insert(name.into(), value.into());
    }

    /// Builder method to set a field value.
    #[must_use]
    pub fn with_field(self, name: &str, value: impl Into<Value>) -> Self {
        self.set_field(name, value);
        self
    }

    /// Gets a field value.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<Value> {
        self.0.fields.borrow().get(name).cloned()
    }

    /// Returns true if both handles refer to the same instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({}{})", self.0.class, self.0.id)
    }
}

/// Shared handle to an opaque resource such as a stream.
#[derive(Clone)]
pub struct Resource(Rc<ResourceData>);

struct ResourceData {
    id: InstanceId,
    kind: Arc<str>,
}

impl Resource {
    /// Creates a new resource handle of the given sub-kind.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTypeSpec` if the sub-kind is empty or contains
    /// characters a `resource (kind)` token cannot spell.
    pub fn new(kind: &str) -> Result<Self> {
        if !names::is_resource_kind(kind) {
            return Err(Error::invalid_type_spec(kind, "invalid resource kind"));
        }
        Ok(Self(Rc::new(ResourceData {
            id: InstanceId::allocate(),
            kind: kind.into(),
        })))
    }

    /// Returns the handle identity.
    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.0.id
    }

    /// Returns the resource sub-kind name.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.0.kind
    }

    /// Returns true if both handles refer to the same resource.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resource({}{})", self.0.kind, self.0.id)
    }
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Self::String(s)
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Self::Array(a)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Self::Object(o)
    }
}

impl From<Resource> for Value {
    fn from(r: Resource) -> Self {
        Self::Resource(r)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::array(v)
    }
}
