//! Dual numbers for forward-mode automatic differentiation.

use crate::num::{Float, Scalar};
use approx::{AbsDiffEq, RelativeEq};
use nalgebra::SVector;
use std::{
    cmp::Ordering,
    ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// A value paired with its gradient with respect to `N` independent
/// variables.
///
/// Arithmetic propagates the gradient exactly using the sum, product and
/// quotient rules. Comparisons (`==`, `<`, `>`) only look at the value, so
/// branching on a `Dual` behaves the same as branching on the underlying
/// float.
///
/// The `approx` traits ([`AbsDiffEq`], [`RelativeEq`]) compare the gradient as
/// well. Two duals with equal values but different gradients are therefore
/// `==` while failing `abs_diff_eq`; use the `approx` comparisons when the
/// derivatives matter.
#[derive(Clone, Copy, Debug)]
pub struct Dual<F, const N: usize> {
    value: F,
    gradient: SVector<F, N>,
}

impl<F: Float, const N: usize> Dual<F, N> {
    /// Creates a dual number with the given value and gradient.
    #[inline]
    pub fn new(value: F, gradient: SVector<F, N>) -> Self {
        Self { value, gradient }
    }

    /// Creates a dual number with a zero gradient.
    #[inline]
    pub fn constant(value: F) -> Self {
        Self::new(value, SVector::zeros())
    }

    /// Creates the independent variable with the given index, whose gradient
    /// is the unit vector along that index.
    ///
    /// # Panics
    /// If `index` is not smaller than `N`.
    #[inline]
    pub fn variable(value: F, index: usize) -> Self {
        let mut gradient = SVector::zeros();
        gradient[index] = F::ONE;
        Self::new(value, gradient)
    }

    #[inline]
    pub fn value(&self) -> F {
        self.value
    }

    #[inline]
    pub fn gradient(&self) -> &SVector<F, N> {
        &self.gradient
    }

    /// The partial derivative with respect to the variable with the given
    /// index.
    ///
    /// # Panics
    /// If `index` is not smaller than `N`.
    #[inline]
    pub fn partial(&self, index: usize) -> F {
        self.gradient[index]
    }
}

impl<F: Float, const N: usize> Add for Dual<F, N> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.value + rhs.value, self.gradient + rhs.gradient)
    }
}

impl<F: Float, const N: usize> Sub for Dual<F, N> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.value - rhs.value, self.gradient - rhs.gradient)
    }
}

impl<F: Float, const N: usize> Mul for Dual<F, N> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.value * rhs.value,
            self.gradient * rhs.value + rhs.gradient * self.value,
        )
    }
}

impl<F: Float, const N: usize> Div for Dual<F, N> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        let value = self.value / rhs.value;
        Self::new(value, (self.gradient - rhs.gradient * value) / rhs.value)
    }
}

impl<F: Float, const N: usize> Neg for Dual<F, N> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.value, -self.gradient)
    }
}

macro_rules! impl_assign_op {
    ($op:ident, $method:ident, $binop:tt) => {
        impl<F: Float, const N: usize> $op for Dual<F, N> {
            #[inline]
            fn $method(&mut self, rhs: Self) {
                *self = *self $binop rhs;
            }
        }
    };
}

impl_assign_op!(AddAssign, add_assign, +);
impl_assign_op!(SubAssign, sub_assign, -);
impl_assign_op!(MulAssign, mul_assign, *);

impl<F: Float, const N: usize> PartialEq for Dual<F, N> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<F: Float, const N: usize> PartialOrd for Dual<F, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<F: Float, const N: usize> num_traits::Zero for Dual<F, N> {
    #[inline]
    fn zero() -> Self {
        Self::constant(F::ZERO)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.value == F::ZERO
    }
}

impl<F: Float, const N: usize> num_traits::One for Dual<F, N> {
    #[inline]
    fn one() -> Self {
        Self::constant(F::ONE)
    }
}

impl<F: Float, const N: usize> Scalar for Dual<F, N> {
    #[inline]
    fn from_real(value: f64) -> Self {
        Self::constant(<F as Scalar>::from_real(value))
    }

    #[inline]
    fn atan2(self, x: Self) -> Self {
        let y = self;
        let squared_norm = x.value * x.value + y.value * y.value;
        Self::new(
            Scalar::atan2(y.value, x.value),
            (y.gradient * x.value - x.gradient * y.value) / squared_norm,
        )
    }

    #[inline]
    fn scale(self, factor: f64) -> Self {
        Self::new(
            Scalar::scale(self.value, factor),
            self.gradient.map(|partial| Scalar::scale(partial, factor)),
        )
    }
}

impl<F: Float, const N: usize> AbsDiffEq for Dual<F, N> {
    type Epsilon = F;

    fn default_epsilon() -> F {
        F::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: F) -> bool {
        self.value.abs_diff_eq(&other.value, epsilon)
            && self.gradient.abs_diff_eq(&other.gradient, epsilon)
    }
}

impl<F: Float, const N: usize> RelativeEq for Dual<F, N> {
    fn default_max_relative() -> F {
        F::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: F, max_relative: F) -> bool {
        self.value.relative_eq(&other.value, epsilon, max_relative)
            && self
                .gradient
                .relative_eq(&other.gradient, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::vector;
    use proptest::prelude::*;

    type Dual2 = Dual<f64, 2>;

    #[test]
    fn constant_has_zero_gradient() {
        let c = Dual2::constant(4.5);
        assert_eq!(c.value(), 4.5);
        assert_eq!(c.gradient(), &vector![0.0, 0.0]);
    }

    #[test]
    fn variable_has_unit_gradient_along_its_index() {
        let x = Dual2::variable(1.5, 1);
        assert_eq!(x.value(), 1.5);
        assert_eq!(x.partial(0), 0.0);
        assert_eq!(x.partial(1), 1.0);
    }

    #[test]
    #[should_panic]
    fn variable_with_out_of_range_index_panics() {
        Dual2::variable(1.0, 2);
    }

    #[test]
    fn sum_and_difference_add_gradients() {
        let x = Dual2::variable(2.0, 0);
        let y = Dual2::variable(5.0, 1);

        let sum = x + y;
        assert_eq!(sum.value(), 7.0);
        assert_eq!(sum.gradient(), &vector![1.0, 1.0]);

        let difference = x - y;
        assert_eq!(difference.value(), -3.0);
        assert_eq!(difference.gradient(), &vector![1.0, -1.0]);
    }

    #[test]
    fn product_follows_product_rule() {
        let x = Dual2::variable(2.0, 0);
        let y = Dual2::variable(5.0, 1);

        let product = x * y;
        assert_eq!(product.value(), 10.0);
        assert_eq!(product.gradient(), &vector![5.0, 2.0]);
    }

    #[test]
    fn quotient_follows_quotient_rule() {
        let x = Dual2::variable(2.0, 0);
        let y = Dual2::variable(4.0, 1);

        let quotient = x / y;
        assert_abs_diff_eq!(quotient.value(), 0.5);
        assert_abs_diff_eq!(quotient.gradient(), &vector![0.25, -0.125]);
    }

    #[test]
    fn negation_flips_value_and_gradient() {
        let x = -Dual2::variable(3.0, 0);
        assert_eq!(x.value(), -3.0);
        assert_eq!(x.gradient(), &vector![-1.0, 0.0]);
    }

    #[test]
    fn assign_ops_match_binary_ops() {
        let x = Dual2::variable(2.0, 0);
        let y = Dual2::variable(3.0, 1);

        let mut a = x;
        a += y;
        assert_abs_diff_eq!(a, x + y);

        let mut s = x;
        s -= y;
        assert_abs_diff_eq!(s, x - y);

        let mut m = x;
        m *= y;
        assert_abs_diff_eq!(m, x * y);
    }

    #[test]
    fn comparisons_ignore_gradient() {
        let x = Dual2::variable(1.0, 0);
        let c = Dual2::constant(1.0);
        assert_eq!(x, c);
        assert!(Dual2::constant(0.5) < x);
        assert!(Dual2::variable(2.0, 1) > c);
    }

    #[test]
    fn approximate_equality_also_compares_gradient() {
        let x = Dual2::variable(1.0, 0);
        let c = Dual2::constant(1.0);
        assert_eq!(x, c);
        assert!(!approx::abs_diff_eq!(x, c));
        assert!(!approx::relative_eq!(x, c));
        assert!(approx::abs_diff_eq!(x, Dual2::new(1.0, vector![1.0, 0.0])));
    }

    #[test]
    fn scaling_scales_value_and_gradient() {
        let x = Dual2::variable(2.0, 0) * Dual2::variable(3.0, 1);
        let scaled = x.scale(-0.5);
        assert_eq!(scaled.value(), -3.0);
        assert_eq!(scaled.gradient(), &vector![-1.5, -1.0]);
    }

    #[test]
    fn scaling_f32_dual_keeps_factor_precision() {
        let x = Dual::<f32, 1>::variable(3.0, 0);
        let scaled = x.scale(0.3);
        assert_eq!(scaled.value(), 0.9_f32);
        assert_eq!(scaled.partial(0), 0.3_f32);
    }

    #[test]
    fn from_real_lifts_to_constant() {
        let c = Dual2::from_real(-2.5);
        assert_eq!(c.value(), -2.5);
        assert_eq!(c.gradient(), &vector![0.0, 0.0]);
    }

    #[test]
    fn atan2_gradient_is_analytic() {
        let y = Dual2::variable(1.0, 0);
        let x = Dual2::variable(2.0, 1);

        let angle = y.atan2(x);
        assert_abs_diff_eq!(angle.value(), 1.0_f64.atan2(2.0));
        // d/dy = x / r², d/dx = -y / r²
        assert_abs_diff_eq!(angle.gradient(), &vector![0.4, -0.2], epsilon = 1e-15);
    }

    proptest! {
        #[test]
        fn product_gradient_matches_finite_difference(
            a in -10.0..10.0_f64,
            b in -10.0..10.0_f64,
        ) {
            let h = 1e-6;
            let product = Dual2::variable(a, 0) * Dual2::variable(b, 1);
            let numerical_da = ((a + h) * b - (a - h) * b) / (2.0 * h);
            let numerical_db = (a * (b + h) - a * (b - h)) / (2.0 * h);
            prop_assert!(approx::abs_diff_eq!(product.partial(0), numerical_da, epsilon = 1e-6));
            prop_assert!(approx::abs_diff_eq!(product.partial(1), numerical_db, epsilon = 1e-6));
        }
    }
}
