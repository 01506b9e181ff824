//! Error types for the core library

use thiserror::Error;

/// The core error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Every object id up to the allocator ceiling has been handed out
    #[error("Object id space exhausted after {last}")]
    IdSpaceExhausted { last: u32 },
}

/// Result type alias
pub type Result<T> = core::result::Result<T, Error>;
