//! Process-unique identities for objects and resources.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Next identity to hand out. Zero is never allocated.
static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Identity number of a live object or resource instance.
///
/// Identities are allocated from a single monotonic counter, so two
/// instances alive in the same process never share one, and an identity is
/// never handed out twice. They carry no meaning across processes.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Allocates a fresh identity.
    #[must_use]
    pub fn allocate() -> Self {
        Self(NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw identity number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InstanceId({})", self.0)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
