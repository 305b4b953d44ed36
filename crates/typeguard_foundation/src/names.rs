//! Grammar of class names and resource kinds.
//!
//! Objects and resources are only created with names that a type token can
//! spell, so the token naming a value always parses back to that value's
//! kind.

use crate::value::Kind;

/// Reserved pseudotype names, in declaration order.
pub const PSEUDO_NAMES: [&str; 6] = ["mixed", "scalar", "number", "uint", "iterable", "callable"];

/// Returns true if `name` is a basic kind or pseudotype name.
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    Kind::from_name(name).is_some() || PSEUDO_NAMES.contains(&name)
}

/// Returns true if `name` is a valid, normalized class, interface or trait
/// name: `\`-separated identifiers, no leading separator, not reserved.
#[must_use]
pub fn is_class_name(name: &str) -> bool {
    !is_reserved(name) && name.split('\\').all(is_identifier)
}

/// Returns true if `kind` is a valid resource sub-kind.
#[must_use]
pub fn is_resource_kind(kind: &str) -> bool {
    !kind.is_empty() && kind.chars().all(is_resource_char)
}

fn is_resource_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | ' ')
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
