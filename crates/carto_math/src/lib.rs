//! Generic math primitives for pose estimation and nonlinear least squares.
//!
//! Every function that touches an optimization variable is generic over
//! [`Scalar`], which is implemented both for plain floats and for the
//! forward-mode autodiff number [`Dual`](dual::Dual). Branching is done on
//! value comparisons only, so gradients computed through these functions stay
//! correct.
//!
//! None of the functions validate their inputs. Violated preconditions (such
//! as `min > max` in [`clamp`](bounds::clamp) or a non-unit rotation
//! quaternion) silently produce unspecified numbers rather than errors.

#[cfg(feature = "benchmark")]
pub mod benchmark;

pub mod angle;
pub mod bounds;
pub mod consts;
pub mod dual;
pub mod num;
pub mod power;
pub mod quaternion;

pub use num::{Float, Scalar};
