//! Type specification grammar, constraint sets, and runtime type matching.
//!
//! This crate provides:
//! - [`TypeToken`] and [`TypeSpec`] - Parsing of `int|string`, `?Foo` and
//!   list-of-names specifications into normalized tokens
//! - [`TypeConstraintSet`] - The grow-only token set a collection enforces
//! - [`ClassInfoProvider`] and [`ClassHierarchy`] - Inheritance and trait
//!   lookup for named types
//! - [`TypeMatcher`] - Ordered matching of values against a set
//! - [`try_infer_default`] - Zero values derived from a set

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod default;
pub mod hierarchy;
pub mod matcher;
pub mod set;
pub mod spec;
pub mod token;

pub use default::try_infer_default;
pub use hierarchy::{ClassDef, ClassHierarchy, ClassInfoProvider, ClassRegistry, Lineage};
pub use matcher::{MatchRule, TypeMatcher};
pub use set::TypeConstraintSet;
pub use spec::{TypeSpec, parse};
pub use token::{Pseudo, TypeToken};
