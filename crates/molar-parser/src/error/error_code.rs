//! Error codes for the Molar diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Tokenizer errors
//! - `E1xx` - Bracket matching errors
//! - `E2xx` - Evaluation errors

use std::fmt;

/// Broad category of a parse failure.
///
/// Every [`ErrorCode`] belongs to exactly one kind. Callers that only need to
/// know *why* a formula was rejected can match on the kind instead of the
/// individual code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The text does not follow the formula grammar.
    MalformedFormula,
    /// A `)` has no matching `(`, or a `(` is never closed.
    UnbalancedBrackets,
    /// An atom count does not fit in 64 bits.
    CountOverflow,
    /// A configured evaluation limit was exceeded.
    LimitExceeded,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MalformedFormula => write!(f, "malformed formula"),
            ErrorKind::UnbalancedBrackets => write!(f, "unbalanced brackets"),
            ErrorKind::CountOverflow => write!(f, "count overflow"),
            ErrorKind::LimitExceeded => write!(f, "limit exceeded"),
        }
    }
}

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Tokenizer Errors (E0xx)
    // =========================================================================
    /// Unexpected character.
    ///
    /// Only ASCII letters, digits, `(` and `)` may appear in a formula.
    E001,

    /// Lowercase element symbol.
    ///
    /// Element symbols start with an uppercase letter, e.g. `Na`, not `na`.
    E002,

    /// Count out of range.
    ///
    /// A digit run is too large to be represented as a 64-bit count.
    E003,

    /// Count without an element or group.
    ///
    /// A number must directly follow an element symbol or a closing bracket.
    E004,

    /// Empty formula.
    ///
    /// A formula needs at least one element or group.
    E005,

    /// Empty group.
    ///
    /// A bracketed group `()` must contain at least one element or group.
    E006,

    // =========================================================================
    // Bracket Errors (E1xx)
    // =========================================================================
    /// Unmatched closing bracket.
    ///
    /// A `)` was found with no `(` left open before it.
    E100,

    /// Unclosed bracket.
    ///
    /// The formula ended while a `(` was still open.
    E101,

    /// Multiplier without closing bracket.
    ///
    /// A group multiplier was found that does not follow a `)`.
    E102,

    /// Closing bracket without multiplier.
    ///
    /// A `)` was not followed by the multiplier that resolves its group.
    E103,

    // =========================================================================
    // Evaluation Errors (E2xx)
    // =========================================================================
    /// Atom count overflow.
    ///
    /// Scaling or summing counts exceeded the 64-bit range.
    E200,

    /// Nesting too deep.
    ///
    /// Groups are nested deeper than the configured maximum depth.
    E201,

    /// Zero count not allowed.
    ///
    /// A count or multiplier of `0` was used while zero counts are disabled.
    E202,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Tokenizer errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E005 => "E005",
            ErrorCode::E006 => "E006",
            // Bracket errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            // Evaluation errors
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Tokenizer errors
            ErrorCode::E001 => "unexpected character",
            ErrorCode::E002 => "lowercase element symbol",
            ErrorCode::E003 => "count out of range",
            ErrorCode::E004 => "count without element",
            ErrorCode::E005 => "empty formula",
            ErrorCode::E006 => "empty group",
            // Bracket errors
            ErrorCode::E100 => "unmatched closing bracket",
            ErrorCode::E101 => "unclosed bracket",
            ErrorCode::E102 => "multiplier without closing bracket",
            ErrorCode::E103 => "closing bracket without multiplier",
            // Evaluation errors
            ErrorCode::E200 => "atom count overflow",
            ErrorCode::E201 => "nesting too deep",
            ErrorCode::E202 => "zero count not allowed",
        }
    }

    /// Returns the [`ErrorKind`] this code belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::E001
            | ErrorCode::E002
            | ErrorCode::E003
            | ErrorCode::E004
            | ErrorCode::E005
            | ErrorCode::E006
            | ErrorCode::E202 => ErrorKind::MalformedFormula,
            ErrorCode::E100 | ErrorCode::E101 | ErrorCode::E102 | ErrorCode::E103 => {
                ErrorKind::UnbalancedBrackets
            }
            ErrorCode::E200 => ErrorKind::CountOverflow,
            ErrorCode::E201 => ErrorKind::LimitExceeded,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
