//! # Molar Parser
//!
//! Parser for chemical formulas such as `H2O`, `Na(OH)2` or `K4(ON(SO3)2)2`.
//! This crate provides the pipeline from formula text to per-element atom
//! counts.
//!
//! ## Usage
//!
//! ```
//! # use molar_parser::{parse, ParseConfig, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let composition = parse("Mg(OH)2", ParseConfig::default())?;
//!
//!     assert_eq!(composition.get("Mg"), Some(1));
//!     assert_eq!(composition.get("O"), Some(2));
//!     assert_eq!(composition.get("H"), Some(2));
//!     Ok(())
//! }
//! ```

pub mod error;
mod evaluate;
mod lexer;
mod span;
pub mod tokens;

pub use evaluate::{ParseConfig, evaluate};
pub use lexer::tokenize;
pub use span::Span;

pub use molar_core::composition::Composition;

use log::{debug, trace};

use error::ParseError;

/// Parse a formula into its atom counts.
///
/// This is the main entry point for parsing formula text. It runs the
/// complete pipeline:
///
/// 1. **Tokenize** - Convert formula text to normalized tokens
/// 2. **Evaluate** - Resolve bracket groups and accumulate counts
///
/// # Arguments
///
/// * `formula` - The formula text, e.g. `"Fe2(SO4)3"`
/// * `config` - Limits applied during evaluation
///
/// # Returns
///
/// Returns the [`Composition`] on success, or a [`ParseError`] carrying
/// every diagnostic on failure. A failed parse never yields partial counts.
///
/// # Example
///
/// ```
/// # use molar_parser::{parse, ParseConfig, error::ErrorKind};
/// let err = parse("Na(OH", ParseConfig::default()).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::UnbalancedBrackets);
/// ```
pub fn parse(formula: &str, config: ParseConfig) -> Result<Composition, ParseError> {
    debug!(formula; "Parsing formula");

    // Step 1: Tokenize
    let tokens = lexer::tokenize(formula)?;
    trace!(tokens = tokens.len(); "Tokenized formula");

    // Step 2: Evaluate
    let composition = evaluate::evaluate(&tokens, config)?;
    debug!(formula, symbols = composition.len(); "Evaluated formula");

    Ok(composition)
}
