//! Quaternions stored as `[w, x, y, z]` arrays.
//!
//! Rotation parameter blocks in an optimization problem are plain arrays with
//! the real part first. A fixed rotation uses `f64` components while a
//! rotation being optimized uses a generic [`Scalar`].

use crate::num::Scalar;
use nalgebra::Quaternion;

/// Computes the Hamilton product `z ⊗ w` of a fixed quaternion `z` and a
/// generic quaternion `w`.
///
/// The product composes the rotations so that `w` is applied first. It is not
/// commutative, and the result is not normalized even if both inputs are unit
/// quaternions up to rounding. Each component of `z` multiplies `w` through
/// [`Scalar::scale`], so `z` keeps its `f64` precision for lower precision
/// scalars.
#[inline]
pub fn quaternion_product<T: Scalar>(z: &[f64; 4], w: &[T; 4]) -> [T; 4] {
    let [z0, z1, z2, z3] = *z;
    let [w0, w1, w2, w3] = *w;
    [
        w0.scale(z0) - w1.scale(z1) - w2.scale(z2) - w3.scale(z3),
        w1.scale(z0) + w0.scale(z1) + w3.scale(z2) - w2.scale(z3),
        w2.scale(z0) - w3.scale(z1) + w0.scale(z2) + w1.scale(z3),
        w3.scale(z0) + w2.scale(z1) - w1.scale(z2) + w0.scale(z3),
    ]
}

/// Extracts the `[w, x, y, z]` components of the given `nalgebra` quaternion.
#[inline]
pub fn wxyz_from_quaternion(quaternion: &Quaternion<f64>) -> [f64; 4] {
    [quaternion.w, quaternion.i, quaternion.j, quaternion.k]
}

/// Creates an `nalgebra` quaternion from `[w, x, y, z]` components.
#[inline]
pub fn quaternion_from_wxyz<T: Scalar>(wxyz: &[T; 4]) -> Quaternion<T> {
    let [w, x, y, z] = *wxyz;
    Quaternion::new(w, x, y, z)
}
