//! Error and diagnostic system for the Molar formula parser.
//!
//! This module provides an error handling system with:
//! - Error codes grouped by phase, each mapped to an [`ErrorKind`]
//! - Multiple labeled spans pointing into the formula
//! - Severity levels
//! - Diagnostic collector for accumulating multiple tokenizer errors
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning message with optional error code, multiple source
//! locations, and help text. Multiple diagnostics are wrapped in [`ParseError`]
//! for returning from [`parse`](crate::parse).
//!
//! # Example
//!
//! ```
//! # use molar_parser::error::{Diagnostic, ErrorCode, ErrorKind};
//! # use molar_parser::Span;
//!
//! let close = Span::new(6..7);
//! let open = Span::new(2..3);
//!
//! let diag = Diagnostic::error("unclosed bracket")
//!     .with_code(ErrorCode::E101)
//!     .with_label(open, "this bracket is never closed")
//!     .with_secondary_label(close, "group content ends here")
//!     .with_help("add a closing `)`");
//!
//! assert_eq!(diag.code().map(|code| code.kind()), Some(ErrorKind::UnbalancedBrackets));
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;
pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::{ErrorCode, ErrorKind};
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
