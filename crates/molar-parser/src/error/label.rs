//! Labeled formula spans for diagnostic messages.

use crate::span::Span;

/// A labeled span in the formula text.
///
/// - **Primary labels** mark the main location of an error, such as the
///   offending character or the bracket that was never closed.
/// - **Secondary labels** add context, such as "group opened here".
///
/// # Example
///
/// ```text
/// error[E101]: unclosed bracket
///  |
///  | Na(OH
///  |   ^ this bracket is never closed
/// ```
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    /// Get the span this label applies to.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this is a primary label.
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    /// Check if this is a secondary label.
    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}
