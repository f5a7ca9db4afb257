//! Declarative noise graphs: configuration model and the builder that wires
//! named sources and generators into ready-to-sample handles.

pub mod builder;
pub mod config;

pub use builder::NoiseGraph;
pub use config::{
    FractalParams, GeneratorKind, GeneratorSpec, NoiseConfig, ScaleParams, SelectParams, SourceSpec,
    SourceType,
};
