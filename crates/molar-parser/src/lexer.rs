//! Tokenizer for chemical formula text.
//!
//! Tokenization runs in two steps:
//!
//! 1. **Scan** the text into [`Lexeme`]s with span information. Scanning is
//!    error-recovering: a bad character is reported and skipped, and scanning
//!    continues so every lexical problem ends up in one [`ParseError`].
//! 2. **Normalize** the lexemes into [`Token`]s. Elements without digits get
//!    an implicit count of `1`, and every `)` is followed by exactly one
//!    [`Token::Multiplier`], synthesized as `1` when the formula has none.
//!
//! The public entry point is [`tokenize`].

use std::iter::Peekable;

use winnow::{
    Parser as _,
    ascii::digit1,
    combinator::{alt, opt},
    error::{AddContext, ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{one_of, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
    tokens::{Lexeme, PositionedLexeme, PositionedToken, Token},
};

/// Rich diagnostic information for scan errors.
///
/// Attached to winnow errors to provide detailed error messages with codes,
/// help text, and precise span information.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LexerDiagnostic {
    pub code: ErrorCode,
    pub message: &'static str,
    pub help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    pub start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<LexerDiagnostic>>;

/// Build a committed error carrying `diagnostic` at the current position.
fn cut_with(
    input: &Input<'_>,
    diagnostic: LexerDiagnostic,
) -> ErrMode<ContextError<LexerDiagnostic>> {
    ErrMode::Cut(ContextError::new().add_context(input, &input.checkpoint(), diagnostic))
}

/// Parse a run of ASCII digits
fn digits<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    digit1.parse_next(input)
}

/// Parse a digit run as a 64-bit count.
///
/// Commits once digits are seen: a run that does not fit in `u64` is an
/// error, never a reason to try another alternative.
fn count(input: &mut Input<'_>) -> IResult<u64> {
    let start = input.current_token_start();
    let digits = digits(input)?;

    digits.parse::<u64>().map_err(|_| {
        cut_with(
            input,
            LexerDiagnostic {
                code: ErrorCode::E003,
                message: "count is too large",
                help: Some("counts must fit in 64 bits"),
                start,
            },
        )
    })
}

/// Parse an element symbol: one uppercase letter followed by lowercase letters
fn symbol<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    (
        one_of(|c: char| c.is_ascii_uppercase()),
        take_while(0.., |c: char| c.is_ascii_lowercase()),
    )
        .take()
        .parse_next(input)
}

/// Parse an element symbol with its optional count, e.g. `Na`, `H2`, `C12`
fn element<'a>(input: &mut Input<'a>) -> IResult<Lexeme<'a>> {
    (symbol, opt(count))
        .map(|(symbol, count)| Lexeme::Element { symbol, count })
        .parse_next(input)
}

/// Parse a digit run that is not attached to an element
fn number<'a>(input: &mut Input<'a>) -> IResult<Lexeme<'a>> {
    count.map(Lexeme::Number).parse_next(input)
}

/// Parse a single bracket
fn bracket<'a>(input: &mut Input<'a>) -> IResult<Lexeme<'a>> {
    alt(('('.value(Lexeme::Open), ')'.value(Lexeme::Close))).parse_next(input)
}

/// Reject a symbol that starts with a lowercase letter.
///
/// Consumes the whole run (letters and trailing digits) so it is reported
/// once instead of once per character.
fn lowercase_symbol<'a>(input: &mut Input<'a>) -> IResult<Lexeme<'a>> {
    let start = input.current_token_start();

    (take_while(1.., |c: char| c.is_ascii_lowercase()), opt(digits))
        .void()
        .parse_next(input)?;

    Err(cut_with(
        input,
        LexerDiagnostic {
            code: ErrorCode::E002,
            message: "element symbol must start with an uppercase letter",
            help: Some("capitalize the first letter, e.g. `Na` instead of `na`"),
            start,
        },
    ))
}

/// Parse a single lexeme with position tracking
fn positioned_lexeme<'a>(input: &mut Input<'a>) -> IResult<PositionedLexeme<'a>> {
    let start_pos = input.current_token_start();

    let lexeme = alt((
        element,          // Must come before number, owns trailing digits
        number,           // Multiplier after `)`, or a stray count
        bracket,          // `(` and `)`
        lowercase_symbol, // Error production, must come last
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();

    Ok(PositionedLexeme::new(lexeme, Span::new(start_pos..end_pos)))
}

/// Lexer that accumulates lexemes and diagnostics during tokenization.
struct Lexer<'a> {
    lexemes: Vec<PositionedLexeme<'a>>,
    diagnostics: DiagnosticCollector,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer.
    fn new() -> Self {
        Self {
            lexemes: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Scan the input, collecting lexemes and errors.
    fn scan(&mut self, mut input: Input<'a>) {
        while !input.is_empty() {
            let checkpoint = input.checkpoint();
            let start = input.current_token_start();

            match positioned_lexeme(&mut input) {
                Ok(lexeme) => self.lexemes.push(lexeme),
                Err(ErrMode::Cut(context_error)) => {
                    let error_pos = input.current_token_start();
                    self.diagnostics
                        .emit(Self::committed_diagnostic(&context_error, start, error_pos));

                    // Every iteration must consume input.
                    if error_pos == start {
                        input.next_token();
                    }
                }
                Err(_) => {
                    input.reset(&checkpoint);
                    let unexpected = input.next_token();
                    let end = input.current_token_start();
                    self.diagnostics
                        .emit(Self::unexpected_character(unexpected, Span::new(start..end)));
                }
            }
        }
    }

    /// Convert a committed winnow error into a [`Diagnostic`].
    ///
    /// Uses the first [`LexerDiagnostic`] context for code, message and help.
    /// Falls back to E001 (unexpected character) if no context is present.
    fn committed_diagnostic(
        context_error: &ContextError<LexerDiagnostic>,
        start: usize,
        error_pos: usize,
    ) -> Diagnostic {
        if let Some(LexerDiagnostic {
            code,
            message,
            help,
            start,
        }) = context_error.context().next()
        {
            let span = Span::new(*start..error_pos);

            let mut diag = Diagnostic::error(*message)
                .with_code(*code)
                .with_label(span, code.description());
            if let Some(h) = help {
                diag = diag.with_help(*h);
            }
            return diag;
        }

        Diagnostic::error("unexpected character")
            .with_code(ErrorCode::E001)
            .with_label(
                Span::new(start..error_pos.max(start + 1)),
                ErrorCode::E001.description(),
            )
    }

    /// Diagnostic for a character no lexeme can start with.
    fn unexpected_character(unexpected: Option<char>, span: Span) -> Diagnostic {
        let message = match unexpected {
            Some(ch) => format!("unexpected character `{}`", ch.escape_default()),
            None => "unexpected end of input".to_string(),
        };

        Diagnostic::error(message)
            .with_code(ErrorCode::E001)
            .with_label(span, ErrorCode::E001.description())
            .with_help("formulas contain only element symbols, digits, `(` and `)`")
    }

    /// Normalize scanned lexemes into tokens.
    ///
    /// Emits E004 for counts that follow neither an element nor `)`, and E006
    /// for empty groups. Bracket balance is left to the evaluator.
    fn normalize(&mut self) -> Vec<PositionedToken<'a>> {
        let mut tokens = Vec::with_capacity(self.lexemes.len() + 1);
        let mut lexemes = self.lexemes.iter().copied().peekable();

        while let Some(PositionedLexeme { lexeme, span }) = lexemes.next() {
            match lexeme {
                Lexeme::Element { symbol, count } => {
                    let count = count.unwrap_or(1);
                    tokens.push(PositionedToken::new(Token::Element { symbol, count }, span));
                }
                Lexeme::Open => {
                    if let Some(close) = Self::next_if_close(&mut lexemes) {
                        self.diagnostics.emit(
                            Diagnostic::error("empty group")
                                .with_code(ErrorCode::E006)
                                .with_label(span.union(close.span), ErrorCode::E006.description())
                                .with_help("a group must contain at least one element"),
                        );
                        // Keep the pair so a multiplier after it is not reported as stray.
                        tokens.push(PositionedToken::new(Token::Open, span));
                        Self::push_close(&mut tokens, close.span, &mut lexemes);
                        continue;
                    }
                    tokens.push(PositionedToken::new(Token::Open, span));
                }
                Lexeme::Close => Self::push_close(&mut tokens, span, &mut lexemes),
                Lexeme::Number(_) => {
                    self.diagnostics.emit(
                        Diagnostic::error("count without element")
                            .with_code(ErrorCode::E004)
                            .with_label(span, "this count does not follow an element or `)`")
                            .with_help(
                                "place counts directly after an element symbol or a closing bracket",
                            ),
                    );
                }
            }
        }

        tokens
    }

    /// Push a `)` and the multiplier that belongs to it.
    ///
    /// Consumes the following number lexeme if there is one; otherwise the
    /// multiplier is a synthetic `1` with an empty span right after the `)`.
    fn push_close<I>(
        tokens: &mut Vec<PositionedToken<'a>>,
        span: Span,
        lexemes: &mut Peekable<I>,
    ) where
        I: Iterator<Item = PositionedLexeme<'a>>,
    {
        tokens.push(PositionedToken::new(Token::Close, span));

        let multiplier = match lexemes.peek() {
            Some(&PositionedLexeme {
                lexeme: Lexeme::Number(value),
                span: number_span,
            }) => {
                lexemes.next();
                PositionedToken::new(Token::Multiplier(value), number_span)
            }
            _ => PositionedToken::new(Token::Multiplier(1), Span::empty(span.end())),
        };
        tokens.push(multiplier);
    }

    fn next_if_close<I>(lexemes: &mut Peekable<I>) -> Option<PositionedLexeme<'a>>
    where
        I: Iterator<Item = PositionedLexeme<'a>>,
    {
        lexemes.next_if(|next| matches!(next.lexeme, Lexeme::Close))
    }

    /// Finish tokenizing and return tokens or collected errors.
    fn finish(mut self) -> Result<Vec<PositionedToken<'a>>, ParseError> {
        // Normalizing after scan errors would only echo them.
        let tokens = if self.diagnostics.has_errors() {
            Vec::new()
        } else {
            self.normalize()
        };

        self.diagnostics.finish().map(|()| tokens)
    }
}

/// Tokenize a formula, collecting multiple errors.
///
/// Attempts to recover from errors and continue scanning, collecting all
/// errors encountered.
///
/// # Returns
///
/// - `Ok(tokens)` - The normalized token sequence
/// - `Err(ParseError)` - One or more errors occurred; contains all diagnostics
///
/// # Example
///
/// ```
/// # use molar_parser::{tokenize, tokens::Token};
/// let tokens = tokenize("H2O").unwrap();
/// let tokens: Vec<Token> = tokens.into_iter().map(|t| t.token).collect();
///
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Element { symbol: "H", count: 2 },
///         Token::Element { symbol: "O", count: 1 },
///     ]
/// );
/// ```
pub fn tokenize(input: &str) -> Result<Vec<PositionedToken<'_>>, ParseError> {
    let mut lexer = Lexer::new();

    if input.is_empty() {
        lexer.diagnostics.emit(
            Diagnostic::error("empty formula")
                .with_code(ErrorCode::E005)
                .with_label(Span::empty(0), ErrorCode::E005.description())
                .with_help("a formula needs at least one element, e.g. `H2O`"),
        );
    } else {
        lexer.scan(LocatingSlice::new(input));
    }

    lexer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_single_lexeme(input: &str, expected: Lexeme<'_>) {
        let mut located_input = LocatingSlice::new(input);
        let result = positioned_lexeme(&mut located_input);
        assert!(result.is_ok(), "Failed to scan: {}", input);
        let positioned = result.unwrap();
        assert_eq!(positioned.lexeme, expected);
        assert_eq!(positioned.span, Span::new(0..input.len()));
    }

    fn token_kinds(input: &str) -> Vec<Token<'_>> {
        tokenize(input)
            .unwrap_or_else(|err| panic!("Failed to tokenize `{input}`: {err}"))
            .into_iter()
            .map(|positioned| positioned.token)
            .collect()
    }

    fn element(symbol: &str, count: u64) -> Token<'_> {
        Token::Element { symbol, count }
    }

    #[test]
    fn test_elements() {
        test_single_lexeme(
            "H",
            Lexeme::Element {
                symbol: "H",
                count: None,
            },
        );
        test_single_lexeme(
            "Na",
            Lexeme::Element {
                symbol: "Na",
                count: None,
            },
        );
        test_single_lexeme(
            "C12",
            Lexeme::Element {
                symbol: "C",
                count: Some(12),
            },
        );
        test_single_lexeme(
            "Uuo118",
            Lexeme::Element {
                symbol: "Uuo",
                count: Some(118),
            },
        );
    }

    #[test]
    fn test_brackets_and_numbers() {
        test_single_lexeme("(", Lexeme::Open);
        test_single_lexeme(")", Lexeme::Close);
        test_single_lexeme("25", Lexeme::Number(25));
        test_single_lexeme("007", Lexeme::Number(7));
    }

    #[test]
    fn test_tokenize_implicit_counts() {
        assert_eq!(token_kinds("H2O"), vec![element("H", 2), element("O", 1)]);
        assert_eq!(token_kinds("NaCl"), vec![element("Na", 1), element("Cl", 1)]);
    }

    #[test]
    fn test_tokenize_explicit_multiplier() {
        assert_eq!(
            token_kinds("Fe(OH)3"),
            vec![
                element("Fe", 1),
                Token::Open,
                element("O", 1),
                element("H", 1),
                Token::Close,
                Token::Multiplier(3),
            ]
        );
    }

    #[test]
    fn test_tokenize_synthetic_multipliers_for_nested_close() {
        assert_eq!(
            token_kinds("K3(Al(OH)6)"),
            vec![
                element("K", 3),
                Token::Open,
                element("Al", 1),
                Token::Open,
                element("O", 1),
                element("H", 1),
                Token::Close,
                Token::Multiplier(6),
                Token::Close,
                Token::Multiplier(1),
            ]
        );
    }

    #[test]
    fn test_tokenize_back_to_back_close() {
        assert_eq!(
            token_kinds("H2((O2))"),
            vec![
                element("H", 2),
                Token::Open,
                Token::Open,
                element("O", 2),
                Token::Close,
                Token::Multiplier(1),
                Token::Close,
                Token::Multiplier(1),
            ]
        );
    }

    #[test]
    fn test_tokenize_multi_digit_counts() {
        assert_eq!(
            token_kinds("H22((O2)4)25"),
            vec![
                element("H", 22),
                Token::Open,
                Token::Open,
                element("O", 2),
                Token::Close,
                Token::Multiplier(4),
                Token::Close,
                Token::Multiplier(25),
            ]
        );
    }

    #[test]
    fn test_tokenize_spans() {
        let tokens = tokenize("Na(OH)2").unwrap();
        let spans: Vec<_> = tokens.iter().map(|t| t.span.range()).collect();
        assert_eq!(spans, vec![0..2, 2..3, 3..4, 4..5, 5..6, 6..7]);
        assert!(tokens.iter().all(|t| !t.is_synthetic()));
    }

    #[test]
    fn test_synthetic_multiplier_span() {
        let tokens = tokenize("H2(O2)").unwrap();
        let last = tokens.last().unwrap();

        assert_eq!(last.token, Token::Multiplier(1));
        assert!(last.is_synthetic());
        assert_eq!(last.span, Span::empty(6));
    }

    #[test]
    fn test_unbalanced_brackets_are_left_to_evaluator() {
        // Tokenization is purely lexical; balance is checked during evaluation.
        assert!(tokenize("Na(OH").is_ok());
        assert!(tokenize("NaOH)2").is_ok());
    }

    /// Helper to verify error codes in diagnostics match exactly in order.
    fn assert_error_codes(input: &str, expected_codes: &[ErrorCode]) {
        let result = tokenize(input);
        assert!(
            result.is_err(),
            "Expected tokenizer to fail on input: '{input}'"
        );
        let parse_error = result.unwrap_err();
        let diagnostics = parse_error.diagnostics();
        assert_eq!(
            diagnostics.len(),
            expected_codes.len(),
            "Expected {} errors for input '{input}', got {:?}",
            expected_codes.len(),
            diagnostics
        );
        for (i, (diag, expected)) in diagnostics.iter().zip(expected_codes).enumerate() {
            assert_eq!(
                diag.code(),
                Some(*expected),
                "Error {i}: expected {expected:?} for input '{input}', got {:?}",
                diag.code()
            );
        }
    }

    /// Helper to verify the primary span of the first diagnostic.
    fn assert_first_error_span(input: &str, expected: std::ops::Range<usize>) {
        let err = tokenize(input).unwrap_err();
        let span = err.diagnostics()[0]
            .primary_span()
            .expect("Expected a primary label");
        assert_eq!(span.range(), expected, "Wrong span for input '{input}'");
    }

    #[test]
    fn test_error_code_e001_unexpected_character() {
        assert_error_codes("H2O+", &[ErrorCode::E001]);
        assert_error_codes("H2 O", &[ErrorCode::E001]);
        assert_error_codes("[Fe]", &[ErrorCode::E001, ErrorCode::E001]);
        assert_first_error_span("H2O+", 3..4);
    }

    #[test]
    fn test_unexpected_multibyte_character_span() {
        // `·` is two bytes in UTF-8
        assert_error_codes("CuSO4·5H2O", &[ErrorCode::E001]);
        assert_first_error_span("CuSO4·5H2O", 5..7);
    }

    #[test]
    fn test_error_code_e002_lowercase_symbol() {
        assert_error_codes("h2O", &[ErrorCode::E002]);
        assert_error_codes("H2o", &[ErrorCode::E002]);
        assert_first_error_span("h2O", 0..2);
        assert_first_error_span("NaCl(oh)2", 5..7);
    }

    #[test]
    fn test_error_code_e003_count_out_of_range() {
        assert_error_codes("H99999999999999999999", &[ErrorCode::E003]);
        assert_error_codes("(H)99999999999999999999", &[ErrorCode::E003]);
        assert_first_error_span("OH99999999999999999999", 2..22);
    }

    #[test]
    fn test_max_count_is_accepted() {
        let tokens = token_kinds("H18446744073709551615");
        assert_eq!(tokens, vec![element("H", u64::MAX)]);
    }

    #[test]
    fn test_error_code_e004_stray_count() {
        assert_error_codes("2H2O", &[ErrorCode::E004]);
        assert_error_codes("(2H)", &[ErrorCode::E004]);
        assert_first_error_span("2H2O", 0..1);
    }

    #[test]
    fn test_error_code_e005_empty_formula() {
        assert_error_codes("", &[ErrorCode::E005]);
    }

    #[test]
    fn test_error_code_e006_empty_group() {
        assert_error_codes("H2()", &[ErrorCode::E006]);
        // The multiplier belongs to the empty group, it is not a stray count.
        assert_error_codes("H2()3", &[ErrorCode::E006]);
        assert_first_error_span("H2()3", 2..4);
    }

    #[test]
    fn test_errors_with_valid_tokens_between() {
        assert_error_codes(
            "H2 + o2 -> H2O",
            &[
                ErrorCode::E001,
                ErrorCode::E001,
                ErrorCode::E001,
                ErrorCode::E002,
                ErrorCode::E001,
                ErrorCode::E001,
                ErrorCode::E001,
                ErrorCode::E001,
            ],
        );
    }

    #[test]
    fn test_scan_errors_suppress_normalization_errors() {
        // `2` follows a bad character, not an element; only the scan error is reported.
        assert_error_codes("H+2", &[ErrorCode::E001]);
    }

    #[test]
    fn test_error_help_text() {
        let err = tokenize("h2O").unwrap_err();
        assert_eq!(
            err.diagnostics()[0].help(),
            Some("capitalize the first letter, e.g. `Na` instead of `na`")
        );
    }
}
