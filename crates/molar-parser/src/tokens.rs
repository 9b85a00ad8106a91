//! Token types produced by the formula tokenizer.
//!
//! Scanning produces [`Lexeme`]s, which mirror the raw text. Normalization turns
//! them into [`Token`]s: every element carries a count, and every `)` is
//! followed by exactly one [`Token::Multiplier`].

use std::fmt;

use crate::span::Span;

/// Raw lexical unit as it appears in the formula text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lexeme<'src> {
    /// `UpperLower*` with its trailing digits, if any
    Element {
        symbol: &'src str,
        count: Option<u64>,
    },
    Open,
    Close,
    /// A digit run not attached to an element
    Number(u64),
}

/// Normalized formula token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'src> {
    /// Element symbol with its explicit or implicit count
    Element { symbol: &'src str, count: u64 },
    /// `(`
    Open,
    /// `)`
    Close,
    /// Scale applied to the group closed by the preceding `)`
    Multiplier(u64),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Element { symbol, count } => write!(f, "{symbol}{count}"),
            Token::Open => write!(f, "("),
            Token::Close => write!(f, ")"),
            Token::Multiplier(value) => write!(f, "{value}"),
        }
    }
}

/// A token with the span it was read from.
///
/// Synthetic multipliers carry an empty span placed right after their `)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionedToken<'src> {
    pub token: Token<'src>,
    pub span: Span,
}

impl<'src> PositionedToken<'src> {
    pub fn new(token: Token<'src>, span: Span) -> Self {
        Self { token, span }
    }

    /// Returns `true` if the token was inserted by normalization.
    pub fn is_synthetic(&self) -> bool {
        self.span.is_empty()
    }
}

impl<'src> std::ops::Deref for PositionedToken<'src> {
    type Target = Token<'src>;

    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

/// A lexeme with the span it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PositionedLexeme<'src> {
    pub lexeme: Lexeme<'src>,
    pub span: Span,
}

impl<'src> PositionedLexeme<'src> {
    pub fn new(lexeme: Lexeme<'src>, span: Span) -> Self {
        Self { lexeme, span }
    }
}
