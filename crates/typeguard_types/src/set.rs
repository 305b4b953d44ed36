//! Grow-only sets of type tokens.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use typeguard_foundation::{Error, Kind, Result, Value};

use crate::default::try_infer_default;
use crate::spec::TypeSpec;
use crate::token::{Pseudo, TypeToken};

/// The deduplicated, order-insensitive set of tokens a collection enforces.
///
/// An empty set, or one containing `mixed`, accepts every value. Tokens can
/// be added but never removed, so a populated collection's contract can only
/// widen through an explicit [`add`](Self::add).
///
/// Cloning is O(1); clones share structure until one of them grows.
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeConstraintSet {
    tokens: im::OrdSet<TypeToken>,
}

impl TypeConstraintSet {
    /// Creates a set from a specification.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTypeSpec` or `InvalidTypeArgument` if the
    /// specification does not parse.
    pub fn new(spec: impl Into<TypeSpec>) -> Result<Self> {
        let mut set = Self::any();
        set.add(spec)?;
        Ok(set)
    }

    /// Creates an empty set, which accepts every value.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Adds every token of a specification.
    ///
    /// The set is unchanged if the specification fails to parse.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTypeSpec` or `InvalidTypeArgument` if the
    /// specification does not parse.
    pub fn add(&mut self, spec: impl Into<TypeSpec>) -> Result<()> {
        for token in spec.into().parse()? {
            self.insert(token);
        }
        Ok(())
    }

    /// Inserts a single token, returning true if it was not present.
    pub fn insert(&mut self, token: TypeToken) -> bool {
        self.tokens.insert(token).is_none()
    }

    /// Adds every token of another set.
    pub fn add_set(&mut self, other: &Self) {
        for token in &other.tokens {
            self.tokens.insert(token.clone());
        }
    }

    /// Returns true if the token is in the set.
    #[must_use]
    pub fn contains(&self, token: &TypeToken) -> bool {
        self.tokens.contains(token)
    }

    /// Returns true if every token of `spec` is in the set.
    ///
    /// # Errors
    ///
    /// Returns an error if `spec` does not parse.
    pub fn contains_all(&self, spec: impl Into<TypeSpec>) -> Result<bool> {
        Ok(spec.into().parse()?.iter().all(|token| self.contains(token)))
    }

    /// Returns true if at least one token of `spec` is in the set.
    ///
    /// # Errors
    ///
    /// Returns an error if `spec` does not parse.
    pub fn contains_any(&self, spec: impl Into<TypeSpec>) -> Result<bool> {
        Ok(spec.into().parse()?.iter().any(|token| self.contains(token)))
    }

    /// Returns true if the set holds exactly the tokens of `spec`.
    ///
    /// Order and repetition in `spec` do not matter.
    ///
    /// # Errors
    ///
    /// Returns an error if `spec` does not parse.
    pub fn contains_only(&self, spec: impl Into<TypeSpec>) -> Result<bool> {
        let other: im::OrdSet<TypeToken> = spec.into().parse()?.into_iter().collect();
        Ok(other == self.tokens)
    }

    /// Returns true if every value matches.
    #[must_use]
    pub fn any_ok(&self) -> bool {
        self.tokens.is_empty() || self.contains(&TypeToken::Pseudo(Pseudo::Mixed))
    }

    /// Returns true if null matches.
    #[must_use]
    pub fn null_ok(&self) -> bool {
        self.contains(&TypeToken::Basic(Kind::Null)) || self.any_ok()
    }

    /// Returns the number of distinct tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if no tokens were declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates over the tokens in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeToken> {
        self.tokens.iter()
    }

    /// Derives a zero value for this set, if one exists.
    #[must_use]
    pub fn try_infer_default(&self) -> Option<Value> {
        try_infer_default(self)
    }
}

impl fmt::Display for TypeConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tokens.is_empty() {
            return f.write_str(Pseudo::Mixed.name());
        }
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for TypeConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeConstraintSet({self})")
    }
}

impl FromStr for TypeConstraintSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl FromIterator<TypeToken> for TypeConstraintSet {
    fn from_iter<I: IntoIterator<Item = TypeToken>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TypeConstraintSet {
    type Item = &'a TypeToken;
    type IntoIter = im::ordset::Iter<'a, TypeToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
