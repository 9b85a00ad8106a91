//! Integration tests for the CompoundParser API
//!
//! These tests verify that the public API works and is usable.

use molar::{CompoundParser, ErrorKind, MolarError, config::AppConfig, parse_compound};

fn sorted_counts(formula: &str) -> Vec<(String, u64)> {
    let composition = parse_compound(formula).expect("Failed to parse");
    let mut counts: Vec<_> = composition
        .iter()
        .map(|(symbol, count)| (symbol.to_string(), count))
        .collect();
    counts.sort();
    counts
}

fn expected(entries: &[(&str, u64)]) -> Vec<(String, u64)> {
    let mut counts: Vec<_> = entries
        .iter()
        .map(|(symbol, count)| (symbol.to_string(), *count))
        .collect();
    counts.sort();
    counts
}

#[test]
fn test_parse_compound_examples() {
    let cases: &[(&str, &[(&str, u64)])] = &[
        ("NaCl", &[("Na", 1), ("Cl", 1)]),
        ("Fe2OH3", &[("Fe", 2), ("O", 1), ("H", 3)]),
        ("AlC3H8C3H8OAl", &[("Al", 2), ("O", 1), ("C", 6), ("H", 16)]),
        ("Na(OH)2", &[("Na", 1), ("O", 2), ("H", 2)]),
        ("Na(OH2)2", &[("Na", 1), ("O", 2), ("H", 4)]),
        ("H2(O2)", &[("H", 2), ("O", 2)]),
        ("H22(O2)", &[("H", 22), ("O", 2)]),
        ("H22((O2)4)25", &[("H", 22), ("O", 200)]),
        ("H2((O2)2(Ca2)2)2", &[("H", 2), ("O", 8), ("Ca", 8)]),
        ("H(O)(O)2", &[("H", 1), ("O", 3)]),
        ("H2((O2))", &[("H", 2), ("O", 2)]),
        ("H2(H2(O2)2)2", &[("H", 6), ("O", 8)]),
        ("K3(Al(OH)6)", &[("K", 3), ("Al", 1), ("O", 6), ("H", 6)]),
    ];

    for (formula, counts) in cases {
        assert_eq!(
            sorted_counts(formula),
            expected(counts),
            "Wrong counts for `{formula}`"
        );
    }
}

#[test]
fn test_lowercase_symbol_is_malformed() {
    let err = parse_compound("h2O").unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::MalformedFormula));
}

#[test]
fn test_unclosed_bracket_is_unbalanced() {
    let err = parse_compound("Na(OH").unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::UnbalancedBrackets));

    match err {
        MolarError::Parse { err, src } => {
            assert_eq!(src, "Na(OH");
            let span = err.diagnostics()[0].primary_span().expect("Expected a span");
            assert_eq!(&src[span.range()], "(");
        }
        MolarError::Config(_) => panic!("Expected Parse error"),
    }
}

#[test]
fn test_builder_with_default_config() {
    let parser = CompoundParser::new(AppConfig::default());
    let result = parser.parse("Ca3(PO4)2");
    assert!(result.is_ok(), "Should parse valid formula: {:?}", result.err());
}

#[test]
fn test_builder_with_config_limits() {
    let config: AppConfig = r#"
        [parser]
        max_depth = 1
        allow_zero_counts = false
    "#
    .parse()
    .expect("Invalid configuration");
    let parser = CompoundParser::new(config);

    assert_eq!(parser.config().parser.max_depth, 1);
    assert!(parser.parse("Ca(OH)2").is_ok());

    let err = parser.parse("K3(Al(OH)6)").unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::LimitExceeded));

    let err = parser.parse("H0").unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::MalformedFormula));
}

#[test]
fn test_parser_is_reusable() {
    let parser = CompoundParser::default();
    assert!(parser.parse("H2O").is_ok());
    assert!(parser.parse("H2O)").is_err());
    assert!(parser.parse("CO2").is_ok());
}

#[test]
fn test_count_overflow() {
    let err = parse_compound("(H2)9223372036854775808").unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::CountOverflow));
}
