//! Type specifications and their parsing into tokens.
//!
//! A specification is either a string using the union syntax
//!
//! ```text
//! spec     := nullable | union
//! nullable := '?' spec
//! union    := token ('|' token)*
//! ```
//!
//! or a list of single type names. List elements are taken as they are:
//! `["int|string"]` is rejected, not split.

use tracing::debug;

use typeguard_foundation::{Error, Result, Value};

use crate::token::{TypeToken, classify};

/// The two accepted shapes of a type specification.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeSpec {
    /// A string using `|` and `?` syntax.
    Union(String),
    /// A list of single type names; non-string elements are rejected.
    Names(Vec<Value>),
}

impl TypeSpec {
    /// Builds a specification from a runtime value.
    ///
    /// Strings use the union syntax and arrays are lists of names.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTypeArgument` for any other kind of value.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(Self::Union(s.to_string())),
            Value::Array(array) => Ok(Self::Names(
                array.entries().iter().map(|(_, v)| v.clone()).collect(),
            )),
            other => Err(Error::invalid_type_argument(other.kind())),
        }
    }

    /// Parses this specification into tokens, in source order.
    ///
    /// Duplicates are kept; the constraint set removes them.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTypeSpec` for a token that fails the grammar and
    /// `InvalidTypeArgument` for a non-string list element.
    pub fn parse(&self) -> Result<Vec<TypeToken>> {
        let mut tokens = Vec::new();
        let parsed = match self {
            Self::Union(text) => parse_union(text, text, &mut tokens),
            Self::Names(names) => names.iter().try_for_each(|name| -> Result<()> {
                match name {
                    Value::String(s) => {
                        tokens.push(TypeToken::parse(s)?);
                        Ok(())
                    }
                    other => Err(Error::invalid_type_argument(other.kind())),
                }
            }),
        };
        if let Err(err) = &parsed {
            debug!(spec = ?self, error = %err, "rejected type spec");
        }
        parsed.map(|()| tokens)
    }
}

/// Parses a specification into tokens.
///
/// # Errors
///
/// See [`TypeSpec::parse`].
pub fn parse(spec: impl Into<TypeSpec>) -> Result<Vec<TypeToken>> {
    spec.into().parse()
}

fn parse_union(spec: &str, text: &str, tokens: &mut Vec<TypeToken>) -> Result<()> {
    let text = text.trim();
    if let Some(rest) = text.strip_prefix('?') {
        if !rest.is_empty() {
            tokens.push(TypeToken::NULL);
            return parse_union(spec, rest, tokens);
        }
    }
    for part in text.split('|') {
        let token = classify(part).map_err(|reason| Error::invalid_type_spec(spec, reason))?;
        tokens.push(token);
    }
    Ok(())
}

impl From<&str> for TypeSpec {
    fn from(s: &str) -> Self {
        Self::Union(s.to_owned())
    }
}

impl From<String> for TypeSpec {
    fn from(s: String) -> Self {
        Self::Union(s)
    }
}

impl From<&String> for TypeSpec {
    fn from(s: &String) -> Self {
        Self::Union(s.clone())
    }
}

impl From<&[&str]> for TypeSpec {
    fn from(names: &[&str]) -> Self {
        Self::Names(names.iter().map(|&name| Value::from(name)).collect())
    }
}

impl<const N: usize> From<[&str; N]> for TypeSpec {
    fn from(names: [&str; N]) -> Self {
        Self::from(&names[..])
    }
}

impl From<Vec<&str>> for TypeSpec {
    fn from(names: Vec<&str>) -> Self {
        Self::from(names.as_slice())
    }
}

impl From<Vec<String>> for TypeSpec {
    fn from(names: Vec<String>) -> Self {
        Self::Names(names.into_iter().map(Value::from).collect())
    }
}

impl From<Vec<Value>> for TypeSpec {
    fn from(names: Vec<Value>) -> Self {
        Self::Names(names)
    }
}

impl From<&TypeToken> for TypeSpec {
    fn from(token: &TypeToken) -> Self {
        Self::Union(token.to_string())
    }
}
