//! Runtime matching of values against constraint sets.
//!
//! Rules are tried in a fixed order and the first hit wins:
//!
//! 1. the set accepts every value (`mixed` or empty)
//! 2. the value's own kind token is in the set
//! 3. `scalar`: bool, int, float or string
//! 4. `number`: int or float
//! 5. `uint`: non-negative int
//! 6. `iterable`: arrays and iterable objects
//! 7. `callable`: invocable objects
//! 8. `resource`: any resource
//! 9. `object`, or a named class, interface or trait of the object

use tracing::{debug, trace};

use typeguard_foundation::{Error, Kind, Result, Value};

use crate::hierarchy::{ClassHierarchy, ClassInfoProvider, ClassRegistry, Lineage};
use crate::set::TypeConstraintSet;
use crate::token::{Pseudo, TypeToken};

/// The rule that accepted a value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MatchRule {
    /// The set accepts every value.
    AnyType,
    /// The value's own kind token is in the set.
    ExactKind,
    /// Accepted by `scalar`.
    Scalar,
    /// Accepted by `number`.
    Number,
    /// Accepted by `uint`.
    Uint,
    /// Accepted by `iterable`.
    Iterable,
    /// Accepted by `callable`.
    Callable,
    /// Accepted by the unqualified `resource` token.
    AnyResource,
    /// Accepted by the `object` token.
    AnyObject,
    /// The object is, extends, or implements a named class or interface.
    ClassOrInterface,
    /// The object's class or an ancestor uses a named trait.
    Trait,
}

/// Matches values against constraint sets.
///
/// Named tokens are resolved through the provider's class hierarchy, whose
/// lineages are cached for the lifetime of the matcher.
#[derive(Debug)]
pub struct TypeMatcher<P> {
    hierarchy: ClassHierarchy<P>,
}

impl Default for TypeMatcher<ClassRegistry> {
    fn default() -> Self {
        Self::new(ClassRegistry::new())
    }
}

impl<P: ClassInfoProvider> TypeMatcher<P> {
    /// Creates a matcher resolving names through `provider`.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            hierarchy: ClassHierarchy::new(provider),
        }
    }

    /// Returns the class hierarchy used for named tokens.
    #[must_use]
    pub fn hierarchy(&self) -> &ClassHierarchy<P> {
        &self.hierarchy
    }

    /// Returns true if `value` satisfies `set`.
    #[must_use]
    pub fn matches(&self, set: &TypeConstraintSet, value: &Value) -> bool {
        self.matching_rule(set, value).is_some()
    }

    /// Returns the first rule under which `set` accepts `value`.
    #[must_use]
    pub fn matching_rule(&self, set: &TypeConstraintSet, value: &Value) -> Option<MatchRule> {
        if set.any_ok() {
            return Some(MatchRule::AnyType);
        }
        if set.contains(&TypeToken::of(value)) {
            return Some(MatchRule::ExactKind);
        }

        let has = |pseudo: Pseudo| set.contains(&TypeToken::Pseudo(pseudo));
        let lineage = || value.as_object().map(|o| self.hierarchy.lineage(o.class()));

        if has(Pseudo::Scalar) && value.kind().is_scalar() {
            return Some(MatchRule::Scalar);
        }
        if has(Pseudo::Number) && matches!(value, Value::Int(_) | Value::Float(_)) {
            return Some(MatchRule::Number);
        }
        if has(Pseudo::Uint) && matches!(value, Value::Int(n) if *n >= 0) {
            return Some(MatchRule::Uint);
        }
        if has(Pseudo::Iterable)
            && (matches!(value, Value::Array(_)) || lineage().is_some_and(|l| l.is_iterable()))
        {
            return Some(MatchRule::Iterable);
        }
        if has(Pseudo::Callable) && lineage().is_some_and(|l| l.is_invocable()) {
            return Some(MatchRule::Callable);
        }
        if matches!(value, Value::Resource(_)) && set.contains(&TypeToken::Basic(Kind::Resource)) {
            return Some(MatchRule::AnyResource);
        }

        let lineage = lineage()?;
        if set.contains(&TypeToken::Basic(Kind::Object)) {
            return Some(MatchRule::AnyObject);
        }
        named_rule(set, &lineage)
    }

    /// Checks that `value` satisfies `set`.
    ///
    /// `label` names the checked position (such as "key" or "value") in the
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `DisallowedType` carrying the value's kind token if it does
    /// not match.
    pub fn check(&self, set: &TypeConstraintSet, value: &Value, label: Option<&str>) -> Result<()> {
        if let Some(rule) = self.matching_rule(set, value) {
            trace!(?rule, expected = %set, "value accepted");
            return Ok(());
        }
        let actual = TypeToken::of(value);
        debug!(?label, %actual, expected = %set, "value rejected by type constraints");
        Err(Error::disallowed_type(actual.to_string(), set.to_string(), label))
    }
}

fn named_rule(set: &TypeConstraintSet, lineage: &Lineage) -> Option<MatchRule> {
    set.iter().filter_map(TypeToken::as_named).find_map(|name| {
        if lineage.is_a(name) {
            Some(MatchRule::ClassOrInterface)
        } else if lineage.uses_trait(name) {
            Some(MatchRule::Trait)
        } else {
            None
        }
    })
}
