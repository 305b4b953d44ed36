//! Identity keys: canonical string fingerprints of runtime values.
//!
//! Two values receive the same key exactly when they are strictly equal:
//! same kind and same value for scalars and arrays, same instance for objects
//! and resources. Every kind starts with its own tag character and every
//! variable-length part is either length-prefixed or ends at the next tag, so
//! the concatenated array encoding stays unambiguous.
//!
//! | Kind     | Encoding                          | Example          |
//! |----------|-----------------------------------|------------------|
//! | null     | `N`                               | `N`              |
//! | bool     | `B` + `T`/`F`                     | `BT`             |
//! | int      | `I` + decimal                     | `I-42`           |
//! | float    | `D` + 16 hex digits of the bits   | `D3ff0000000000000` |
//! | string   | `S` + byte length + `:` + bytes   | `S2:hi`          |
//! | array    | `A` + count + `:` + key/value keys| `A1:I0I7`        |
//! | object   | `O` + instance id                 | `O12`            |
//! | resource | `R` + kind length + `:` + kind + id | `R6:stream13`  |

use std::collections::HashSet;
use std::fmt::{self, Write};

use tracing::debug;

use crate::config::EncoderConfig;
use crate::error::{Error, Result, UnencodableReason};
use crate::value::{Array, ArrayKey, Value};

/// Encodes values into identity keys.
#[derive(Clone, Debug, Default)]
pub struct IdentityKeyEncoder {
    config: EncoderConfig,
}

impl IdentityKeyEncoder {
    /// Creates an encoder with the given limits.
    #[must_use]
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encodes a value into its identity key.
    ///
    /// Arrays are walked with an explicit stack, so any acyclic value can be
    /// encoded however deeply it nests unless a depth limit is configured.
    ///
    /// # Errors
    ///
    /// Returns an `Unencodable` error if the value is an array that contains
    /// itself, or if arrays nest deeper than a configured limit.
    pub fn encode(&self, value: &Value) -> Result<String> {
        let mut state = EncodeState {
            out: String::new(),
            visiting: HashSet::new(),
            stack: Vec::new(),
            max_depth: self.config.max_depth,
        };
        match state.run(value) {
            Ok(()) => Ok(state.out),
            Err(reason) => {
                debug!(kind = %value.kind(), %reason, "refusing to encode value");
                Err(Error::unencodable(reason))
            }
        }
    }
}

/// Encodes a value with the default configuration.
///
/// # Errors
///
/// See [`IdentityKeyEncoder::encode`].
pub fn encode(value: &Value) -> Result<String> {
    IdentityKeyEncoder::default().encode(value)
}

/// An array whose entries are being encoded.
struct Frame {
    addr: usize,
    entries: im::Vector<(ArrayKey, Value)>,
    next: usize,
}

struct EncodeState {
    out: String,
    /// Addresses of the arrays on the current path.
    visiting: HashSet<usize>,
    stack: Vec<Frame>,
    max_depth: Option<usize>,
}

impl EncodeState {
    fn run(&mut self, value: &Value) -> std::result::Result<(), UnencodableReason> {
        self.value(value)?;
        while let Some(frame) = self.stack.last_mut() {
            let entry = frame.entries.get(frame.next).cloned();
            frame.next += 1;
            match entry {
                Some((key, value)) => {
                    match &key {
                        ArrayKey::Int(n) => self.tagged('I', n),
                        ArrayKey::String(s) => self.string(s),
                    }
                    self.value(&value)?;
                }
                None => {
                    let addr = frame.addr;
                    self.stack.pop();
                    self.visiting.remove(&addr);
                }
            }
        }
        Ok(())
    }

    /// Writes a scalar, or opens an array whose entries `run` writes next.
    fn value(&mut self, value: &Value) -> std::result::Result<(), UnencodableReason> {
        match value {
            Value::Null => self.out.push('N'),
            Value::Bool(b) => self.out.push_str(if *b { "BT" } else { "BF" }),
            Value::Int(n) => self.tagged('I', n),
            Value::Float(n) => self.tagged('D', format_args!("{:016x}", n.to_bits())),
            Value::String(s) => self.string(s),
            Value::Array(array) => self.open(array)?,
            Value::Object(object) => self.tagged('O', object.id().get()),
            Value::Resource(resource) => {
                self.string_with_tag('R', resource.kind());
                self.push(resource.id().get());
            }
        }
        Ok(())
    }

    fn open(&mut self, array: &Array) -> std::result::Result<(), UnencodableReason> {
        let addr = array.addr();
        if self.visiting.contains(&addr) {
            return Err(UnencodableReason::Cycle);
        }
        if let Some(limit) = self.max_depth {
            if self.stack.len() >= limit {
                return Err(UnencodableReason::DepthExceeded { limit });
            }
        }

        let entries = array.entries();
        self.tagged('A', entries.len());
        self.out.push(':');
        self.visiting.insert(addr);
        self.stack.push(Frame {
            addr,
            entries,
            next: 0,
        });
        Ok(())
    }

    fn string(&mut self, s: &str) {
        self.string_with_tag('S', s);
    }

    fn string_with_tag(&mut self, tag: char, s: &str) {
        self.tagged(tag, s.len());
        self.out.push(':');
        self.out.push_str(s);
    }

    fn tagged(&mut self, tag: char, body: impl fmt::Display) {
        self.out.push(tag);
        self.push(body);
    }

    fn push(&mut self, body: impl fmt::Display) {
        let _ = write!(self.out, "{body}");
    }
}
