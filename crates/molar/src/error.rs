//! Error types for Molar operations.
//!
//! This module provides the main error type [`MolarError`] which wraps
//! the error conditions that can occur while parsing a compound.

use thiserror::Error;

use molar_parser::error::{ErrorKind, ParseError};

/// The main error type for Molar operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the formula text next to the diagnostics, so
/// their spans can be rendered against the source.
#[derive(Debug, Error)]
pub enum MolarError {
    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl MolarError {
    /// Create a new `Parse` error with the associated formula text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// Kind of the parse failure, or `None` for configuration errors.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Parse { err, .. } => Some(err.kind()),
            Self::Config(_) => None,
        }
    }
}
