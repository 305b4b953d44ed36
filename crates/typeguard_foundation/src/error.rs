//! Error types for the Typeguard system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::value::Kind;

/// Result type used throughout Typeguard.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Typeguard operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates an invalid type specification error.
    #[must_use]
    pub fn invalid_type_spec(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidTypeSpec {
            spec: spec.into(),
            reason: reason.into(),
        })
    }

    /// Creates an invalid type argument error for a spec element of the wrong kind.
    #[must_use]
    pub fn invalid_type_argument(found: Kind) -> Self {
        Self::new(ErrorKind::InvalidTypeArgument { found })
    }

    /// Creates a disallowed type error.
    #[must_use]
    pub fn disallowed_type(
        actual: impl Into<String>,
        expected: impl Into<String>,
        label: Option<&str>,
    ) -> Self {
        Self::new(ErrorKind::DisallowedType {
            actual: actual.into(),
            expected: expected.into(),
            label: label.map(str::to_owned),
        })
    }

    /// Creates an unencodable value error.
    #[must_use]
    pub fn unencodable(reason: UnencodableReason) -> Self {
        Self::new(ErrorKind::Unencodable(reason))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A type specification does not follow the grammar.
    #[error("invalid type spec {spec:?}: {reason}")]
    InvalidTypeSpec {
        /// The offending specification text.
        spec: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A type specification was supplied with the wrong shape.
    #[error("invalid type argument: expected a string type name, got {found}")]
    InvalidTypeArgument {
        /// The kind of the element that was supplied instead.
        found: Kind,
    },

    /// A value does not satisfy a constraint set.
    #[error("disallowed type{}: expected {expected}, got {actual}", label_suffix(.label))]
    DisallowedType {
        /// Kind token of the offending value.
        actual: String,
        /// The constraint set the value failed.
        expected: String,
        /// Caller-supplied label such as "key" or "value".
        label: Option<String>,
    },

    /// A value cannot be turned into an identity key.
    #[error("unencodable value: {0}")]
    Unencodable(UnencodableReason),
}

fn label_suffix(label: &Option<String>) -> String {
    label
        .as_deref()
        .map_or_else(String::new, |label| format!(" for {label}"))
}

/// Reasons a value cannot be encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnencodableReason {
    /// The array contains itself, directly or transitively.
    Cycle,
    /// Arrays nest deeper than the configured limit.
    DepthExceeded {
        /// The configured limit.
        limit: usize,
    },
}

impl fmt::Display for UnencodableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycle => write!(f, "array contains a reference to itself"),
            Self::DepthExceeded { limit } => {
                write!(f, "max nesting depth ({limit}) exceeded")
            }
        }
    }
}
