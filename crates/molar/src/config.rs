use std::str::FromStr;

use serde::Deserialize;

use molar_parser::ParseConfig;

use crate::MolarError;

/// Application configuration loaded from TOML text
///
/// # Example
///
/// ```
/// use molar::config::AppConfig;
///
/// let config: AppConfig = "[parser]\nmax_depth = 8".parse().unwrap();
/// assert_eq!(config.parser.max_depth, 8);
/// assert!(config.parser.allow_zero_counts);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Parser configuration section
    #[serde(default)]
    pub parser: ParserConfig,
}

/// Parser configuration section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParserConfig {
    /// Deepest allowed group nesting
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Accept `0` as a count or group multiplier
    #[serde(default = "default_allow_zero_counts")]
    pub allow_zero_counts: bool,
}

fn default_max_depth() -> usize {
    ParseConfig::DEFAULT_MAX_DEPTH
}

fn default_allow_zero_counts() -> bool {
    true
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            allow_zero_counts: default_allow_zero_counts(),
        }
    }
}

impl ParserConfig {
    /// Get the evaluation limits for the parser
    pub fn parse_config(&self) -> ParseConfig {
        ParseConfig::new(self.max_depth, self.allow_zero_counts)
    }
}

impl FromStr for AppConfig {
    type Err = MolarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s).map_err(|err| MolarError::Config(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.parser.max_depth, ParseConfig::DEFAULT_MAX_DEPTH);
        assert!(config.parser.allow_zero_counts);
        assert_eq!(config.parser.parse_config(), ParseConfig::default());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = "".parse().unwrap();
        assert_eq!(config.parser, ParserConfig::default());
    }

    #[test]
    fn test_partial_parser_section() {
        let config: AppConfig = "[parser]\nallow_zero_counts = false\n".parse().unwrap();
        assert_eq!(config.parser.max_depth, ParseConfig::DEFAULT_MAX_DEPTH);
        assert!(!config.parser.allow_zero_counts);
    }

    #[test]
    fn test_full_parser_section() {
        let source = r#"
            [parser]
            max_depth = 3
            allow_zero_counts = false
        "#;
        let config: AppConfig = source.parse().unwrap();
        assert_eq!(config.parser.parse_config(), ParseConfig::new(3, false));
    }

    #[test]
    fn test_invalid_toml() {
        let err = "[parser\nmax_depth = 3".parse::<AppConfig>().unwrap_err();
        assert!(matches!(err, MolarError::Config(_)));
    }

    #[test]
    fn test_wrong_value_type() {
        let err = "[parser]\nmax_depth = \"deep\"".parse::<AppConfig>().unwrap_err();
        assert!(matches!(err, MolarError::Config(_)));
        assert!(err.kind().is_none());
    }
}
