//! Capacity growth policy.

/// Multiplier applied to the old capacity on growth.
pub const GROWTH_FACTOR: f64 = 1.618;

/// Slots added on every growth so that an empty array gets useful headroom.
pub const GROWTH_OFFSET: usize = 5;

/// Capacity to grow to once an array with `capacity` slots is full.
///
/// Computes `floor(capacity * 1.618 + 5)`, which yields
/// 0 → 5 → 13 → 26 → 47 → 81 → 136 …
pub fn next_capacity(capacity: usize) -> usize {
    (capacity as f64 * GROWTH_FACTOR + GROWTH_OFFSET as f64) as usize
}
