//! Typeguard - Runtime type constraints for type-checked collections
//!
//! This crate re-exports all layers of the Typeguard system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: typeguard_types      - Type grammar, constraint sets, matching, defaults
//! Layer 0: typeguard_foundation - Values, instance identities, errors, identity keys
//! ```
//!
//! Collections call [`TypeMatcher::check`] before storing a value,
//! [`try_infer_default`] once at construction, and [`encode`] to compute
//! the hash keys behind set membership and map keys.

pub use typeguard_foundation as foundation;
pub use typeguard_types as types;

pub use typeguard_foundation::{
    Array, ArrayKey, EncoderConfig, Error, ErrorKind, IdentityKeyEncoder, InstanceId, Kind,
    Object, Resource, Result, UnencodableReason, Value, encode,
};
pub use typeguard_types::{
    ClassDef, ClassHierarchy, ClassInfoProvider, ClassRegistry, Lineage, MatchRule, Pseudo,
    TypeConstraintSet, TypeMatcher, TypeSpec, TypeToken, parse, try_infer_default,
};
