//! Atomic type tokens and their grammar.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use typeguard_foundation::{Error, Kind, Result, Value, names};

/// Convenience type categories that match several basic kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Pseudo {
    /// Every value.
    Mixed,
    /// bool, int, float or string.
    Scalar,
    /// int or float.
    Number,
    /// Non-negative int.
    Uint,
    /// Arrays and iterable objects.
    Iterable,
    /// Invocable objects.
    Callable,
}

impl Pseudo {
    /// Every pseudotype, in declaration order.
    pub const ALL: [Pseudo; 6] = [
        Pseudo::Mixed,
        Pseudo::Scalar,
        Pseudo::Number,
        Pseudo::Uint,
        Pseudo::Iterable,
        Pseudo::Callable,
    ];

    /// Returns the reserved name of this pseudotype.
    #[must_use]
    pub const fn name(self) -> &'static str {
        names::PSEUDO_NAMES[self as usize]
    }

    /// Looks up a pseudotype by its reserved name (case-sensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pseudo| pseudo.name() == name)
    }
}

/// One normalized unit of a type specification.
///
/// Tokens compare by their normalized text: surrounding whitespace and a
/// leading namespace separator are gone by the time a token exists.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TypeToken {
    /// One of the eight basic kinds.
    Basic(Kind),
    /// A pseudotype.
    Pseudo(Pseudo),
    /// A specific resource sub-kind, written `resource (name)`.
    ResourceKind(Arc<str>),
    /// A class, interface or trait name.
    Named(Arc<str>),
}

const RESOURCE_OPEN: &str = "resource (";

impl TypeToken {
    /// The `null` token.
    pub const NULL: TypeToken = TypeToken::Basic(Kind::Null);

    /// Parses a single token.
    ///
    /// No union or nullable syntax is interpreted here: `int|string` and
    /// `?int` are rejected.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTypeSpec` if the text is empty or matches none of the
    /// token grammars.
    pub fn parse(text: &str) -> Result<Self> {
        classify(text).map_err(|reason| Error::invalid_type_spec(text, reason))
    }

    /// Returns the token naming the kind of `value`.
    ///
    /// Objects yield their class name and resources their sub-kind, so a set
    /// containing this token always matches the value.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(object) => Self::Named(object.class().into()),
            Value::Resource(resource) => Self::ResourceKind(resource.kind().into()),
            other => Self::Basic(other.kind()),
        }
    }

    /// Returns the class name if this is a named token.
    #[must_use]
    pub fn as_named(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic(kind) => f.write_str(kind.name()),
            Self::Pseudo(pseudo) => f.write_str(pseudo.name()),
            Self::ResourceKind(kind) => write!(f, "{RESOURCE_OPEN}{kind})"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl From<Kind> for TypeToken {
    fn from(kind: Kind) -> Self {
        Self::Basic(kind)
    }
}

impl From<Pseudo> for TypeToken {
    fn from(pseudo: Pseudo) -> Self {
        Self::Pseudo(pseudo)
    }
}

/// Normalizes and classifies one token, returning the failure reason.
pub(crate) fn classify(text: &str) -> std::result::Result<TypeToken, String> {
    let text = text.trim();
    let text = text.strip_prefix('\\').unwrap_or(text);
    if text.is_empty() {
        return Err("empty type name".to_owned());
    }

    if let Some(kind) = Kind::from_name(text) {
        return Ok(TypeToken::Basic(kind));
    }
    if let Some(pseudo) = Pseudo::from_name(text) {
        return Ok(TypeToken::Pseudo(pseudo));
    }
    if let Some(rest) = text.strip_prefix(RESOURCE_OPEN) {
        return match rest.strip_suffix(')') {
            Some(kind) if names::is_resource_kind(kind) => Ok(TypeToken::ResourceKind(kind.into())),
            _ => Err(format!("invalid resource kind {text:?}")),
        };
    }
    if names::is_class_name(text) {
        return Ok(TypeToken::Named(text.into()));
    }
    Err(format!("invalid type name {text:?}"))
}
