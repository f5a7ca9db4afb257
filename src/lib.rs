//! Noisegraph - coherent 2D noise and declarative generator graphs
//!
//! ```
//! use noisegraph::graph::{FractalParams, GeneratorSpec, NoiseConfig, NoiseGraph, SourceType};
//! use noisegraph::source::Sampler2D;
//!
//! let config = NoiseConfig::new()
//!     .with_seed("Default", 1)
//!     .with_source("perlin", SourceType::Perlin, "Default")
//!     .with_generator(GeneratorSpec::fractal_sum("basic", "perlin", FractalParams::default()));
//!
//! let graph = NoiseGraph::build(config, None)?;
//! let basic = graph.generator("basic").expect("built above");
//! let v = basic.sample_2d(0.25, 0.75);
//! assert!((-1.0..=1.0).contains(&v));
//! # Ok::<(), noisegraph::core::ConfigError>(())
//! ```

pub mod core;
pub mod graph;
pub mod math;
pub mod modifier;
pub mod raster;
pub mod source;

pub use crate::core::{ConfigError, Result};
pub use crate::graph::{NoiseConfig, NoiseGraph};
pub use crate::source::{RandomSource, Sampler2D, SharedSampler};
