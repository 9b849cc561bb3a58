//! Bounding values to intervals.

use std::cmp::Ordering;

/// Clamps `value` to lie in the range [min, max].
///
/// Returns `max` if `value > max`, `min` if `value < min` and `value` itself
/// otherwise, so a derivative carried by an in-range value is passed through
/// untouched. At and beyond the bounds the result is flat in `value`.
///
/// The caller must ensure `min <= max`. This is only checked in debug builds;
/// in release builds the `value > max` test wins.
#[inline]
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    debug_assert!(
        min.partial_cmp(&max) != Some(Ordering::Greater),
        "clamp called with `min` greater than `max`"
    );
    if value > max {
        return max;
    }
    if value < min {
        return min;
    }
    value
}
