//! Second/microsecond normalization for calendar construction
//!
//! Host construction facilities (timegm, mktime) absorb out-of-range
//! seconds, minutes, hours, days and months, but know nothing about
//! microseconds. Before delegating, the microsecond field is folded into
//! [0, 999999] and its overflow or underflow carried into the seconds.

use crate::MICROS_PER_SEC;

/// Fold `microsec` into range, carrying into `second`
///
/// Returns the adjusted `(second, microsec)`. The second may still be out
/// of range; that carry belongs to the host. Seconds wrap on i32 overflow.
pub fn normalize_microseconds(second: i32, microsec: i32) -> (i32, i32) {
    if microsec >= MICROS_PER_SEC {
        let carry = microsec / MICROS_PER_SEC;
        (second.wrapping_add(carry), microsec - carry * MICROS_PER_SEC)
    } else if microsec < 0 {
        // -1 - u is nonnegative for every negative u, including i32::MIN
        let borrow = -1 - microsec;
        (
            second.wrapping_sub(1 + borrow / MICROS_PER_SEC),
            (MICROS_PER_SEC - 1) - borrow % MICROS_PER_SEC,
        )
    } else {
        (second, microsec)
    }
}
