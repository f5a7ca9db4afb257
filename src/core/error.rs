//! Error types for graph configuration and building

use std::fmt;

use thiserror::Error;

/// Which namespace a generator reference points into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefKind {
    Source,
    Generator,
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefKind::Source => f.write_str("source"),
            RefKind::Generator => f.write_str("generator"),
        }
    }
}

/// Main error type for configuring and building a noise graph
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("source \"{source_name}\" references seed \"{seed}\" which wasn't found")]
    UnknownSeed { source_name: String, seed: String },

    #[error("undefined source type \"{source_type}\" for source \"{source_name}\"")]
    UnknownSourceType {
        source_name: String,
        source_type: String,
    },

    #[error("undefined generator type \"{generator_type}\" for generator \"{generator}\"")]
    UnknownGeneratorType {
        generator: String,
        generator_type: String,
    },

    #[error("generator \"{generator}\" references {kind} \"{reference}\" which wasn't found")]
    ReferenceNotFound {
        generator: String,
        reference: String,
        kind: RefKind,
    },

    #[error("generator \"{generator}\" needs {required} {kind} reference(s) but has {found}")]
    MissingReferences {
        generator: String,
        kind: RefKind,
        required: usize,
        found: usize,
    },

    #[error("generator \"{generator}\" is defined more than once")]
    DuplicateGenerator { generator: String },

    #[error("generator \"{generator}\" has invalid parameters: {reason}")]
    InvalidParameter {
        generator: String,
        #[source]
        reason: ParamError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rejected numeric parameters on a combinator constructor.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParamError {
    #[error("min ({min}) is greater than max ({max})")]
    InvertedClamp { min: f64, max: f64 },

    #[error("lower bound ({lower}) is greater than upper bound ({upper})")]
    InvertedBounds { lower: f64, upper: f64 },

    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
