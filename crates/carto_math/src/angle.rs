//! Angle conversion, normalization and planar headings.

use crate::{consts::f64::PI, num::Scalar};
use nalgebra::Vector2;

/// Converts an angle in degrees to radians, e.g. `60°` to `π/3`.
#[inline]
pub const fn deg_to_rad(deg: f64) -> f64 {
    PI * deg / 180.0
}

/// Converts an angle in radians to degrees, e.g. `π/3` to `60°`.
#[inline]
pub const fn rad_to_deg(rad: f64) -> f64 {
    180.0 * rad / PI
}

/// Brings the difference between two angles into [-π, π].
///
/// Whole turns are added or subtracted until the result is in range. A
/// difference of exactly ±π is returned as is, and `3π` maps to `π` while
/// `-3π` maps to `-π`. The loop takes a number of iterations proportional to
/// the magnitude of the input, so this is meant for differences of already
/// normalized angles. Only constants are added, so any derivative carried by
/// `difference` is unchanged.
#[inline]
pub fn normalize_angle_difference<T: Scalar>(mut difference: T) -> T {
    let pi = T::from_real(PI);
    let two_pi = pi + pi;
    while difference > pi {
        difference -= two_pi;
    }
    while difference < -pi {
        difference += two_pi;
    }
    difference
}

/// Computes the angle of the given planar vector relative to the positive
/// x-axis, counter-clockwise positive, in [-π, π].
///
/// This is the two-argument arctangent of `(y, x)`, so the quadrant is
/// preserved and a vanishing `x` is handled. For floats the zero vector gives
/// zero; for dual numbers the gradient is not finite there.
#[inline]
pub fn planar_arctangent<T: Scalar>(vector: &Vector2<T>) -> T {
    vector.y.atan2(vector.x)
}
