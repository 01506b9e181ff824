//! Object, template and owner identifiers plus object id allocation

use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Unique identity of a single item instance
///
/// Assigned once by an [`IdAllocator`] and stable for the lifetime of the
/// instance. Two instances never share an object id.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(u32);

impl ObjectId {
    /// Wrap a raw object id
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw value
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Item type (template) identifier, shared by many instances
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(u32);

impl TemplateId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TemplateId({})", self.0)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owner of a container (a character, a pet, a clan)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(u32);

impl OwnerId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of fresh object ids
pub trait IdAllocator: Send + Sync {
    /// Hand out an id that has never been returned before
    fn next_id(&self) -> Result<ObjectId>;
}

/// Thread-safe monotonic object id allocator
pub struct AtomicIdAllocator {
    next: AtomicU32,
}

impl AtomicIdAllocator {
    /// First id handed out by [`AtomicIdAllocator::default`]
    pub const FIRST_ID: u32 = 0x1000_0000;

    /// Create an allocator starting at `first`
    pub const fn starting_at(first: u32) -> Self {
        Self {
            next: AtomicU32::new(first),
        }
    }

    /// Peek at the id the next call will return
    pub fn peek(&self) -> u32 {
        self.next.load(Ordering::Relaxed)
    }
}

impl IdAllocator for AtomicIdAllocator {
    fn next_id(&self) -> Result<ObjectId> {
        self.next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |id| id.checked_add(1))
            .map(ObjectId::new)
            .map_err(|last| Error::IdSpaceExhausted { last })
    }
}

impl Default for AtomicIdAllocator {
    fn default() -> Self {
        Self::starting_at(Self::FIRST_ID)
    }
}
