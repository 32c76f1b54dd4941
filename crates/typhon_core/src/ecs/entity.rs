//! # Entity Identifiers
//!
//! Entities are opaque numeric ids minted by the registry. Ids are strictly
//! increasing from zero and are never recycled; the maximum representable
//! value is reserved to mean "no entity".

use std::fmt;

use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity.
///
/// The id carries no generation bits: a retired id is never handed out
/// again, so stale-handle detection is unnecessary. Hosts that need a
/// "no entity" placeholder in their own structures use [`EntityId::NULL`];
/// every lookup in this crate reports absence through `Option`/`Result`
/// instead of the sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable)]
#[repr(transparent)]
pub struct EntityId(u32);

impl EntityId {
    /// Null/invalid entity id, the reserved maximum value.
    pub const NULL: Self = Self(u32::MAX);

    /// Wraps a raw id value.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw id value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Checks if this id is the reserved null value.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "<null>")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
