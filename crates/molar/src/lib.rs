//! Molar - Parse chemical formulas into element atom counts
//!
//! This library turns formula text such as `K4(ON(SO3)2)2` into the total
//! number of atoms of each element, resolving nested bracket groups and
//! their multipliers.

pub mod config;

mod error;

pub use molar_core::composition;
pub use molar_parser::error::{ErrorKind, ParseError};

pub use error::MolarError;

use log::{debug, info, trace};

use composition::Composition;
use config::AppConfig;

/// Reusable parser for chemical formulas.
///
/// Carries the configuration applied to every formula it parses.
///
/// # Examples
///
/// ```rust
/// use molar::{CompoundParser, config::AppConfig};
///
/// // With custom config
/// let config: AppConfig = "[parser]\nmax_depth = 4".parse()
///     .expect("Invalid configuration");
/// let parser = CompoundParser::new(config);
///
/// let composition = parser.parse("Fe2(SO4)3")
///     .expect("Failed to parse");
/// assert_eq!(composition.get("O"), Some(12));
///
/// // Or use default config
/// let parser = CompoundParser::default();
/// ```
#[derive(Debug, Clone, Default)]
pub struct CompoundParser {
    config: AppConfig,
}

impl CompoundParser {
    /// Create a new compound parser with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including parser limits
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Get the configuration used by this parser.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a formula into its atom counts.
    ///
    /// # Arguments
    ///
    /// * `formula` - Formula text, e.g. `"Na(OH)2"`
    ///
    /// # Errors
    ///
    /// Returns [`MolarError::Parse`] for malformed formulas, unbalanced
    /// brackets, count overflow, or exceeded limits. No partial counts are
    /// returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use molar::{CompoundParser, ErrorKind};
    ///
    /// let parser = CompoundParser::default();
    ///
    /// let composition = parser.parse("Na(OH)2").expect("Failed to parse");
    /// assert_eq!(composition.get("H"), Some(2));
    ///
    /// let err = parser.parse("Na(OH").unwrap_err();
    /// assert_eq!(err.kind(), Some(ErrorKind::UnbalancedBrackets));
    /// ```
    pub fn parse(&self, formula: &str) -> Result<Composition, MolarError> {
        info!(formula; "Parsing compound");

        let composition = molar_parser::parse(formula, self.config.parser.parse_config())
            .map_err(|err| {
                debug!(formula, error = err.to_string(); "Compound rejected");
                MolarError::new_parse_error(err, formula)
            })?;

        debug!(symbols = composition.len(); "Compound parsed successfully");
        trace!(composition:?; "Composition");
        Ok(composition)
    }
}

/// Parse a formula with the default configuration.
///
/// # Examples
///
/// ```rust
/// let composition = molar::parse_compound("K3(Al(OH)6)").unwrap();
///
/// let counts: Vec<_> = composition.iter().collect();
/// assert_eq!(counts, vec![("K", 3), ("Al", 1), ("O", 6), ("H", 6)]);
/// ```
pub fn parse_compound(formula: &str) -> Result<Composition, MolarError> {
    CompoundParser::default().parse(formula)
}
