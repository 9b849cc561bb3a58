//! Numeric `f32` constants.

pub use std::f32::consts::*;

pub const TWO_PI: f32 = TAU;
