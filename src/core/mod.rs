//! Core crate types and utilities

pub mod error;
pub mod logging;

pub use error::{ConfigError, ParamError, RefKind, Result};
