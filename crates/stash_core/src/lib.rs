//! # stash_core - Item Container Core
//!
//! Small primitives shared by every item container:
//! - **Identity**: `ObjectId`, `TemplateId` and `OwnerId` newtypes
//! - **Allocation**: the `IdAllocator` seam and a thread-safe implementation
//! - **Quantities**: clamping arithmetic bounded by `MAX_QUANTITY`

pub mod error;
pub mod id;
pub mod safe_math;

pub use error::*;
pub use id::*;
pub use safe_math::{add_and_limit, mul_and_limit, Quantity, MAX_QUANTITY};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::id::{AtomicIdAllocator, IdAllocator, ObjectId, OwnerId, TemplateId};
    pub use crate::safe_math::{add_and_limit, Quantity, MAX_QUANTITY};
}
