//! Numbers and numerics.

use nalgebra as na;
use num_traits as nt;
use std::ops::{AddAssign, Neg, Sub, SubAssign};

/// The scalar type flowing through residual computations.
///
/// This may be a plain float or a value carrying derivatives with respect to
/// the optimization variables, such as [`Dual`](crate::dual::Dual). Code
/// generic over `Scalar` must only branch on comparisons and never assume it
/// is working with a bare `f32` or `f64`.
pub trait Scalar:
    na::Scalar
    + Copy
    + PartialOrd
    + nt::Zero
    + nt::One
    + Sub<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
{
    /// Lifts a fixed-precision constant into the scalar type. Any derivative
    /// part of the result is zero.
    fn from_real(value: f64) -> Self;

    /// Four-quadrant arctangent of `self / x`, with `self` as the `y`
    /// coordinate. The result lies in `[-π, π]`.
    fn atan2(self, x: Self) -> Self;

    /// Multiplies by a fixed-precision factor. The product is formed in
    /// `f64` before rounding to the scalar's precision, and any derivative
    /// part is scaled by the same factor.
    fn scale(self, factor: f64) -> Self;
}

/// A plain floating point type that can serve as the component type of a
/// [`Dual`](crate::dual::Dual).
pub trait Float: Scalar + na::RealField {
    const ZERO: Self;
    const ONE: Self;
    const NEG_ONE: Self;
}

macro_rules! impl_float {
    ($f:ident) => {
        impl Scalar for $f {
            #[inline]
            #[allow(clippy::cast_possible_truncation)]
            fn from_real(value: f64) -> Self {
                value as $f
            }

            #[inline]
            fn atan2(self, x: Self) -> Self {
                $f::atan2(self, x)
            }

            #[inline]
            #[allow(clippy::cast_possible_truncation, clippy::useless_conversion)]
            fn scale(self, factor: f64) -> Self {
                (f64::from(self) * factor) as $f
            }
        }

        impl Float for $f {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const NEG_ONE: Self = -1.0;
        }
    };
}

impl_float!(f32);
impl_float!(f64);
