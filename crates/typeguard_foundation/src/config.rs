//! Configuration for identity key encoding.

/// Limits applied while encoding identity keys.
///
/// The default has no limit: every acyclic value encodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Maximum array nesting depth before encoding is refused.
    pub max_depth: Option<usize>,
}

impl EncoderConfig {
    /// Creates a configuration with no depth limit.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Builder method to set the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}
