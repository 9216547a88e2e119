pub use error::{Result, SyntaxError};
pub use token_streams::{stream_from_component_values, tokenize_to_stream, TokenStream};
pub use types::{
    AtRule, ComponentValue, Declaration, DeclarationOrAtRule, Function, QualifiedRule, Rule,
    SimpleBlock, StyleSheet, UnicodeRange,
};
pub use unicode_range::parse_urange;

use css_tokenizer::Token;

pub mod error;
pub mod parser_algorithms;
pub mod parser_entry_points;
pub mod token_streams;
pub mod types;
pub mod unicode_range;

macro_rules! log_parse_error {
    ($($arg:tt)+) => {{
        tracing::debug!(target: "css_parser", $($arg)+)
    }};
}

pub(crate) use log_parse_error;

/// Limits on what a [`Parser`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// How deep blocks and functions may nest before parsing fails with
    /// [`SyntaxError::NestingTooDeep`].
    pub max_nesting_depth: usize,
}

impl ParserConfig {
    pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

    pub fn with_max_nesting_depth(mut self, max_nesting_depth: usize) -> Self {
        self.max_nesting_depth = max_nesting_depth;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: Self::DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// A CSS parser over one input.
///
/// Each entry point consumes the parser's input, so a parser is meant to be
/// used for a single entry point call.
pub struct Parser {
    input: TokenStream,
    config: ParserConfig,
    depth: usize,
}

impl Parser {
    pub fn new(input: &str) -> Self {
        Self::with_config(input, ParserConfig::default())
    }

    pub fn with_config(input: &str, config: ParserConfig) -> Self {
        Self::from_stream(tokenize_to_stream(input), config)
    }

    pub fn from_tokens(tokens: Vec<Token>, config: ParserConfig) -> Self {
        Self::from_component_values(tokens.into_iter().map(ComponentValue::from).collect(), config)
    }

    pub fn from_component_values(values: Vec<ComponentValue>, config: ParserConfig) -> Self {
        Self::from_stream(stream_from_component_values(values), config)
    }

    fn from_stream(input: TokenStream, config: ParserConfig) -> Self {
        Self {
            input,
            config,
            depth: 0,
        }
    }
}

pub fn parse_stylesheet(input: &str) -> Result<StyleSheet> {
    Parser::new(input).parse_a_stylesheet()
}

pub fn parse_rule(input: &str) -> Result<Rule> {
    Parser::new(input).parse_a_rule()
}

pub fn parse_list_of_rules(input: &str) -> Result<Vec<Rule>> {
    Parser::new(input).parse_a_list_of_rules()
}

pub fn parse_declaration(input: &str) -> Result<Declaration> {
    Parser::new(input).parse_a_declaration()
}

pub fn parse_list_of_declarations(input: &str) -> Result<Vec<DeclarationOrAtRule>> {
    Parser::new(input).parse_a_list_of_declarations()
}

pub fn parse_component_value(input: &str) -> Result<ComponentValue> {
    Parser::new(input).parse_a_component_value()
}

pub fn parse_list_of_component_values(input: &str) -> Result<Vec<ComponentValue>> {
    Parser::new(input).parse_a_list_of_component_values()
}

pub fn parse_comma_separated_list_of_component_values(
    input: &str,
) -> Result<Vec<Vec<ComponentValue>>> {
    Parser::new(input).parse_a_comma_separated_list_of_component_values()
}
