//! Runtime values, instance identities, errors, and identity keys for Typeguard.
//!
//! This crate provides:
//! - [`Value`] - The runtime value model checked and keyed by typed collections
//! - [`InstanceId`] - Process-unique identities for objects and resources
//! - [`Error`] - The error taxonomy shared by all layers
//! - [`IdentityKeyEncoder`] - Canonical fingerprints used as hash keys

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod identity;
pub mod names;
pub mod value;

pub use config::EncoderConfig;
pub use error::{Error, ErrorKind, Result, UnencodableReason};
pub use fingerprint::{IdentityKeyEncoder, encode};
pub use identity::InstanceId;
pub use value::{Array, ArrayKey, Kind, Object, Resource, Value};
