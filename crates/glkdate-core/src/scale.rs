//! Simple time scaling
//!
//! Simple time is an epoch-seconds count divided by a caller-chosen factor
//! (86400 for day granularity, 60 for minutes...). Division rounds toward
//! negative infinity so that units before the epoch line up with calendar
//! boundaries.

use std::num::NonZeroU32;

/// Seconds per day, the most common factor
pub const SECS_PER_DAY: u32 = 86_400;

/// Floor-divide a seconds count by `factor`
///
/// Negative inputs are computed on nonnegative operands so the result
/// never depends on truncating division. The quotient is truncated to
/// 32 bits, as simple time is.
pub fn simplify(secs: i64, factor: NonZeroU32) -> i32 {
    let factor = factor.get() as i64;
    let units = if secs >= 0 {
        secs / factor
    } else {
        -1 - ((-1 - secs) / factor)
    };
    units as i32
}

/// Expand simple time back to seconds
///
/// Lossy: the sub-factor remainder dropped by `simplify` is gone. A zero
/// factor expands everything to the epoch.
pub fn expand(simple: i32, factor: u32) -> i64 {
    simple as i64 * factor as i64
}
