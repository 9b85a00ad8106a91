//! Bracket-scaling evaluator for formula tokens.
//!
//! The evaluator consumes the token stream from the [`lexer`](super::lexer)
//! left to right. Elements outside any group are added to the result
//! directly. Everything inside a group is deferred on a pending stack until
//! the group's multiplier arrives, at which point the group is resolved:
//!
//! - a top-level group adds `count × scale` for each of its elements;
//! - a nested group pushes its elements back with `count × scale`, so the
//!   enclosing group compounds the scale when it resolves in turn.
//!
//! Resolution is innermost-first because the tokenizer emits each multiplier
//! right after its `)` and the stack is LIFO.
//!
//! The public entry point is [`evaluate`].

use log::trace;

use molar_core::composition::Composition;

use crate::{
    error::{Diagnostic, ErrorCode, ParseError, Result},
    span::Span,
    tokens::{PositionedToken, Token},
};

/// Configuration for the evaluation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
    /// Deepest allowed group nesting
    pub max_depth: usize,
    /// Whether a count or multiplier of `0` is accepted
    pub allow_zero_counts: bool,
}

impl ParseConfig {
    /// Default value for [`ParseConfig::max_depth`].
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    /// Create a new ParseConfig with the given limits
    pub fn new(max_depth: usize, allow_zero_counts: bool) -> Self {
        Self {
            max_depth,
            allow_zero_counts,
        }
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DEPTH, true)
    }
}

/// Entry on the pending stack.
#[derive(Debug, Clone, Copy)]
enum Pending<'src> {
    Open(Span),
    Close(Span),
    Element {
        symbol: &'src str,
        count: u64,
        span: Span,
    },
}

/// An element collected while unwinding a group.
#[derive(Debug, Clone, Copy)]
struct Member<'src> {
    symbol: &'src str,
    count: u64,
    span: Span,
}

struct Evaluator<'src> {
    config: ParseConfig,
    stack: Vec<Pending<'src>>,
    composition: Composition,
    depth: usize,
}

impl<'src> Evaluator<'src> {
    fn new(config: ParseConfig) -> Self {
        Self {
            config,
            stack: Vec::new(),
            composition: Composition::new(),
            depth: 0,
        }
    }

    fn process(&mut self, token: &PositionedToken<'src>) -> Result<()> {
        let span = token.span;

        match token.token {
            Token::Element { symbol, count } => {
                self.check_count(count, span)?;
                if self.stack.is_empty() {
                    self.accumulate(Member { symbol, count, span }, 1, span)
                } else {
                    self.stack.push(Pending::Element { symbol, count, span });
                    Ok(())
                }
            }
            Token::Open => {
                self.depth += 1;
                if self.depth > self.config.max_depth {
                    return Err(Diagnostic::error(format!(
                        "groups nested deeper than {} levels",
                        self.config.max_depth
                    ))
                    .with_code(ErrorCode::E201)
                    .with_label(span, ErrorCode::E201.description())
                    .with_help(
                        "flatten the formula or raise `max_depth` in the parser configuration",
                    ));
                }
                self.stack.push(Pending::Open(span));
                Ok(())
            }
            Token::Close => {
                self.stack.push(Pending::Close(span));
                Ok(())
            }
            Token::Multiplier(scale) => {
                self.check_count(scale, span)?;
                self.resolve_group(scale, span)
            }
        }
    }

    /// Resolve the group closed by the `)` on top of the stack.
    fn resolve_group(&mut self, scale: u64, multiplier_span: Span) -> Result<()> {
        let Some(Pending::Close(close_span)) = self.stack.pop() else {
            return Err(Diagnostic::error("group multiplier does not follow a closing bracket")
                .with_code(ErrorCode::E102)
                .with_label(multiplier_span, ErrorCode::E102.description()));
        };

        let mut members = Vec::new();
        loop {
            match self.stack.pop() {
                Some(Pending::Open(_)) => break,
                Some(Pending::Element { symbol, count, span }) => {
                    members.push(Member { symbol, count, span });
                }
                Some(Pending::Close(span)) => {
                    // Each `)` is resolved by the multiplier right after it, so
                    // none can remain below the one being resolved.
                    return Err(Self::close_without_multiplier(span));
                }
                None => {
                    return Err(Diagnostic::error("unmatched closing bracket")
                        .with_code(ErrorCode::E100)
                        .with_label(close_span, "no `(` is open here")
                        .with_help("remove the `)` or add a matching `(` before it"));
                }
            }
        }
        self.depth = self.depth.saturating_sub(1);

        // Popping reversed the group content.
        members.reverse();

        trace!(
            scale,
            members = members.len(),
            depth = self.depth,
            top_level = self.stack.is_empty();
            "Resolved group"
        );

        if self.stack.is_empty() {
            for member in members {
                self.accumulate(member, scale, multiplier_span)?;
            }
        } else {
            for member in members {
                let count = Self::scale_count(member, scale, multiplier_span)?;
                self.stack.push(Pending::Element {
                    symbol: member.symbol,
                    count,
                    span: member.span,
                });
            }
        }

        Ok(())
    }

    /// Add `member.count × scale` atoms to the result.
    fn accumulate(&mut self, member: Member<'src>, scale: u64, scale_span: Span) -> Result<()> {
        let count = Self::scale_count(member, scale, scale_span)?;

        self.composition
            .add(member.symbol, count)
            .map_err(|err| {
                Diagnostic::error(err.to_string())
                    .with_code(ErrorCode::E200)
                    .with_label(member.span, ErrorCode::E200.description())
            })
    }

    fn scale_count(member: Member<'src>, scale: u64, scale_span: Span) -> Result<u64> {
        member.count.checked_mul(scale).ok_or_else(|| {
            Diagnostic::error(format!(
                "atom count for `{}` overflows when scaled ({} x {})",
                member.symbol, member.count, scale
            ))
            .with_code(ErrorCode::E200)
            .with_label(member.span, ErrorCode::E200.description())
            .with_secondary_label(scale_span, "scaled by this multiplier")
        })
    }

    fn check_count(&self, count: u64, span: Span) -> Result<()> {
        if count == 0 && !self.config.allow_zero_counts {
            return Err(Diagnostic::error("zero count")
                .with_code(ErrorCode::E202)
                .with_label(span, ErrorCode::E202.description())
                .with_help("remove the term, or enable `allow_zero_counts`"));
        }
        Ok(())
    }

    fn close_without_multiplier(span: Span) -> Diagnostic {
        Diagnostic::error("closing bracket without a multiplier")
            .with_code(ErrorCode::E103)
            .with_label(span, ErrorCode::E103.description())
    }

    /// Finish evaluation, reporting every group left open.
    fn finish(self) -> std::result::Result<Composition, ParseError> {
        let diagnostics: Vec<_> = self
            .stack
            .iter()
            .filter_map(|pending| match pending {
                Pending::Open(span) => Some(
                    Diagnostic::error("unclosed bracket")
                        .with_code(ErrorCode::E101)
                        .with_label(*span, "this bracket is never closed")
                        .with_help("add a matching `)`"),
                ),
                Pending::Close(span) => Some(Self::close_without_multiplier(*span)),
                Pending::Element { .. } => None,
            })
            .collect();

        if diagnostics.is_empty() {
            Ok(self.composition)
        } else {
            Err(ParseError::new(diagnostics))
        }
    }
}

/// Evaluate a token sequence into a composition.
///
/// Tokens are normally produced by [`tokenize`](crate::tokenize). Evaluation
/// stops at the first error except for unclosed brackets, which are all
/// reported together once the input is exhausted.
///
/// # Errors
///
/// - [`ErrorKind::UnbalancedBrackets`](crate::error::ErrorKind::UnbalancedBrackets)
///   for a `)` without `(`, a `(` without `)`, or a misplaced multiplier
/// - [`ErrorKind::CountOverflow`](crate::error::ErrorKind::CountOverflow)
///   when a scaled or summed count exceeds `u64`
/// - [`ErrorKind::LimitExceeded`](crate::error::ErrorKind::LimitExceeded)
///   when groups nest deeper than [`ParseConfig::max_depth`]
/// - [`ErrorKind::MalformedFormula`](crate::error::ErrorKind::MalformedFormula)
///   for a zero count when [`ParseConfig::allow_zero_counts`] is `false`
pub fn evaluate(
    tokens: &[PositionedToken<'_>],
    config: ParseConfig,
) -> std::result::Result<Composition, ParseError> {
    let mut evaluator = Evaluator::new(config);

    for token in tokens {
        evaluator.process(token)?;
    }

    evaluator.finish()
}
