//! Combinator nodes that wrap one or more samplers behind [`Sampler2D`].
//!
//! Every combinator is generic over its upstream samplers, so it can hold a
//! concrete source, a reference, or a [`SharedSampler`] out of a built graph.
//!
//! [`Sampler2D`]: crate::source::Sampler2D
//! [`SharedSampler`]: crate::source::SharedSampler

pub mod fractal;
pub mod scale;
pub mod select;

pub use fractal::FractalSum;
pub use scale::Scale;
pub use select::Select;
