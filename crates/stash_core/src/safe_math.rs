//! Clamping quantity arithmetic
//!
//! Item counts are persisted as signed 64-bit columns, so the largest
//! quantity a container may ever hold is `i64::MAX`. Sums and products clamp
//! to that ceiling instead of wrapping.

/// Item count
pub type Quantity = u64;

/// Largest representable item count
pub const MAX_QUANTITY: Quantity = i64::MAX as Quantity;

/// Add two quantities, clamping to [`MAX_QUANTITY`]
#[inline]
pub fn add_and_limit(a: Quantity, b: Quantity) -> Quantity {
    a.saturating_add(b).min(MAX_QUANTITY)
}

/// Multiply two quantities, clamping to [`MAX_QUANTITY`]
#[inline]
pub fn mul_and_limit(a: Quantity, b: Quantity) -> Quantity {
    a.saturating_mul(b).min(MAX_QUANTITY)
}
