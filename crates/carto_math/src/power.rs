//! Integer powers.
//!
//! The generic functions multiply the base by itself, so a derivative carried
//! by the base propagates exactly instead of going through `exp`/`ln`.

use crate::num::Scalar;

/// Computes `base` raised to `exponent` by repeated multiplication.
///
/// `power(base, 0)` is one for every base, including zero.
#[inline]
pub fn power<T: Scalar>(base: T, exponent: u32) -> T {
    if exponent != 0 {
        base * power(base, exponent - 1)
    } else {
        T::one()
    }
}

/// Computes `a * a`.
#[inline]
pub fn square<T: Scalar>(a: T) -> T {
    power(a, 2)
}

macro_rules! impl_const_power {
    ($f:ident, $power:ident, $square:ident) => {
        /// Same as [`power`], but usable in constant expressions.
        pub const fn $power(base: $f, exponent: u32) -> $f {
            if exponent != 0 {
                base * $power(base, exponent - 1)
            } else {
                1.0
            }
        }

        /// Same as [`square`], but usable in constant expressions.
        pub const fn $square(a: $f) -> $f {
            $power(a, 2)
        }
    };
}

impl_const_power!(f32, power_f32, square_f32);
impl_const_power!(f64, power_f64, square_f64);
