//! Per-call cost of the math primitives for each kind of scalar.
//!
//! The primitives are generic over [`Scalar`], so the same code runs on plain
//! floats and on dual numbers. Timing one operation on [`f64`] next to
//! [`Dual`] numbers of increasing gradient width shows how much of the cost
//! of a residual evaluation comes from carrying derivatives.

use crate::{
    angle::{normalize_angle_difference, planar_arctangent},
    bounds::clamp,
    dual::Dual,
    num::Scalar,
    power::{power, square},
    quaternion::quaternion_product,
};
use nalgebra::{Vector2, vector};
use std::{
    hint::black_box,
    time::{Duration, Instant},
};

/// A primitive whose per-call cost can be measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Operation {
    Clamp,
    Power,
    Square,
    NormalizeAngleDifference,
    PlanarArctangent,
    QuaternionProduct,
}

/// The scalar type an [`Operation`] is evaluated on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ScalarKind {
    F32,
    F64,
    /// `Dual<f64, 3>`, sized like a planar pose.
    Dual3,
    /// `Dual<f64, 4>`, sized like a rotation quaternion.
    Dual4,
}

/// Wall-clock time spent on a number of calls to one operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    pub operation: Operation,
    pub scalar: ScalarKind,
    pub calls: usize,
    pub elapsed: Duration,
}

/// A [`Scalar`] that can be seeded with a value for measurement. Dual numbers
/// are seeded as variables so their gradients are populated.
pub trait BenchScalar: Scalar {
    /// Creates a scalar with the given value. `index` selects which partial
    /// derivative is one for dual numbers and is ignored by plain floats.
    fn seeded(value: f64, index: usize) -> Self;
}

/// Exponent used when measuring [`Operation::Power`].
const EXPONENT: u32 = 9;

/// Unit quaternion for a rotation of 45 degrees about the z-axis, used as the
/// fixed factor when measuring [`Operation::QuaternionProduct`].
const FIXED_ROTATION: [f64; 4] = [0.923_879_532_511_286_7, 0.0, 0.0, 0.382_683_432_365_089_8];

/// Seed values the measured calls cycle through, spread over both sides of
/// the clamping bounds and over several turns of angle.
const SEEDS: [f64; 8] = [-2.7, -1.3, -0.4, 0.1, 0.6, 1.2, 2.5, 3.9];

#[derive(Clone, Debug)]
struct Sample<T: Scalar> {
    value: T,
    min: T,
    max: T,
    angle: T,
    direction: Vector2<T>,
    rotation: [T; 4],
}

impl Operation {
    pub const ALL: [Self; 6] = [
        Self::Clamp,
        Self::Power,
        Self::Square,
        Self::NormalizeAngleDifference,
        Self::PlanarArctangent,
        Self::QuaternionProduct,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Clamp => "clamp",
            Self::Power => "power",
            Self::Square => "square",
            Self::NormalizeAngleDifference => "normalize_angle_difference",
            Self::PlanarArctangent => "planar_arctangent",
            Self::QuaternionProduct => "quaternion_product",
        }
    }
}

impl ScalarKind {
    pub const ALL: [Self; 4] = [Self::F32, Self::F64, Self::Dual3, Self::Dual4];

    pub fn name(self) -> &'static str {
        match self {
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Dual3 => "dual3",
            Self::Dual4 => "dual4",
        }
    }

    /// Number of partial derivatives carried along with each value.
    pub fn gradient_width(self) -> usize {
        match self {
            Self::F32 | Self::F64 => 0,
            Self::Dual3 => 3,
            Self::Dual4 => 4,
        }
    }
}

impl Measurement {
    pub fn nanos_per_call(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1e9 / self.calls as f64
    }
}

impl BenchScalar for f32 {
    fn seeded(value: f64, _index: usize) -> Self {
        <f32 as Scalar>::from_real(value)
    }
}

impl BenchScalar for f64 {
    fn seeded(value: f64, _index: usize) -> Self {
        value
    }
}

impl<const N: usize> BenchScalar for Dual<f64, N> {
    fn seeded(value: f64, index: usize) -> Self {
        Self::variable(value, index % N)
    }
}

impl<T: BenchScalar> Sample<T> {
    fn new(seed: f64) -> Self {
        let half_angle = 0.5 * seed;
        Self {
            value: T::seeded(seed, 0),
            min: T::from_real(-1.0),
            max: T::from_real(1.0),
            angle: T::seeded(3.0 * seed, 1),
            direction: vector![T::seeded(seed - 0.5, 0), T::seeded(1.0 - seed, 1)],
            rotation: [
                T::seeded(half_angle.cos(), 0),
                T::seeded(0.0, 1),
                T::seeded(0.0, 2),
                T::seeded(half_angle.sin(), 3),
            ],
        }
    }
}

fn evaluate<T: Scalar>(operation: Operation, sample: &Sample<T>) -> T {
    match operation {
        Operation::Clamp => clamp(sample.value, sample.min, sample.max),
        Operation::Power => power(sample.value, EXPONENT),
        Operation::Square => square(sample.value),
        Operation::NormalizeAngleDifference => normalize_angle_difference(sample.angle),
        Operation::PlanarArctangent => planar_arctangent(&sample.direction),
        Operation::QuaternionProduct => {
            let [w, x, y, z] = quaternion_product(&FIXED_ROTATION, &sample.rotation);
            w + x + y + z
        }
    }
}

/// Times `calls` evaluations of `operation` on scalars of type `T`, cycling
/// through a fixed set of inputs. Input construction is not included in the
/// returned duration.
pub fn measure<T: BenchScalar>(operation: Operation, calls: usize) -> Duration {
    let samples = SEEDS.map(Sample::<T>::new);
    let start = Instant::now();
    for sample in samples.iter().cycle().take(calls) {
        black_box(evaluate(operation, black_box(sample)));
    }
    start.elapsed()
}

/// Measures `operation` on the scalar type named by `scalar`. The operation
/// is always called at least once.
pub fn measure_kind(operation: Operation, scalar: ScalarKind, calls: usize) -> Measurement {
    let calls = calls.max(1);
    let elapsed = match scalar {
        ScalarKind::F32 => measure::<f32>(operation, calls),
        ScalarKind::F64 => measure::<f64>(operation, calls),
        ScalarKind::Dual3 => measure::<Dual<f64, 3>>(operation, calls),
        ScalarKind::Dual4 => measure::<Dual<f64, 4>>(operation, calls),
    };
    let measurement = Measurement {
        operation,
        scalar,
        calls,
        elapsed,
    };
    log::debug!(
        "{} on {}: {:.2} ns per call over {} calls",
        operation.name(),
        scalar.name(),
        measurement.nanos_per_call(),
        calls
    );
    measurement
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn measurement_counts_requested_calls() {
        let measurement = measure_kind(Operation::Square, ScalarKind::F64, 100);
        assert_eq!(measurement.calls, 100);
        assert_eq!(measurement.operation, Operation::Square);
        assert_eq!(measurement.scalar, ScalarKind::F64);
        assert!(measurement.nanos_per_call().is_finite());
        assert!(measurement.nanos_per_call() >= 0.0);
    }

    #[test]
    fn measuring_zero_calls_makes_one_call() {
        let measurement = measure_kind(Operation::Clamp, ScalarKind::Dual3, 0);
        assert_eq!(measurement.calls, 1);
        assert!(measurement.nanos_per_call().is_finite());
    }

    #[test]
    fn every_operation_can_be_measured_on_every_scalar_kind() {
        for operation in Operation::ALL {
            for scalar in ScalarKind::ALL {
                let measurement = measure_kind(operation, scalar, SEEDS.len() + 1);
                assert_eq!(measurement.calls, SEEDS.len() + 1);
            }
        }
    }

    #[test]
    fn gradient_widths_match_dual_sizes() {
        assert_eq!(ScalarKind::F32.gradient_width(), 0);
        assert_eq!(ScalarKind::F64.gradient_width(), 0);
        assert_eq!(ScalarKind::Dual3.gradient_width(), 3);
        assert_eq!(ScalarKind::Dual4.gradient_width(), 4);
    }

    #[test]
    fn evaluation_matches_direct_calls_on_f64() {
        let sample = Sample::<f64>::new(0.6);
        assert_eq!(evaluate(Operation::Clamp, &sample), 0.6);
        assert_eq!(evaluate(Operation::Square, &sample), square(0.6));
        assert_eq!(evaluate(Operation::Power, &sample), power(0.6, EXPONENT));
        assert_eq!(
            evaluate(Operation::NormalizeAngleDifference, &sample),
            normalize_angle_difference(3.0 * 0.6)
        );
        assert_eq!(
            evaluate(Operation::PlanarArctangent, &sample),
            planar_arctangent(&vector![0.6 - 0.5, 1.0 - 0.6])
        );
    }

    #[test]
    fn seeds_outside_bounds_are_clamped() {
        assert_eq!(evaluate(Operation::Clamp, &Sample::<f64>::new(3.9)), 1.0);
        assert_eq!(evaluate(Operation::Clamp, &Sample::<f64>::new(-2.7)), -1.0);
    }

    #[test]
    fn sample_rotations_are_unit_quaternions() {
        for seed in SEEDS {
            let rotation = Sample::<f64>::new(seed).rotation;
            let squared_norm: f64 = rotation.iter().map(|component| component * component).sum();
            assert_abs_diff_eq!(squared_norm, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn dual_samples_carry_gradients() {
        let result = evaluate(Operation::Power, &Sample::<Dual<f64, 3>>::new(1.2));
        assert_abs_diff_eq!(result.partial(0), 9.0 * power(1.2, 8), epsilon = 1e-9);
        assert_eq!(result.partial(1), 0.0);
        assert_eq!(result.partial(2), 0.0);
    }
}
