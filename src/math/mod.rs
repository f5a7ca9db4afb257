//! Mathematical utilities

pub mod curve;

pub use curve::{cubic_s_curve, lerp, quintic_s_curve};
