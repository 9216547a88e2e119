/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, SyntaxError>;

/// Why a parse failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("expected a value but the input is empty")]
    EmptyInput,

    #[error("expected an identifier")]
    ExpectedIdent,

    #[error("the rule is incomplete")]
    MissingRule,

    #[error("expected ':' after the declaration name")]
    MissingDeclaration,

    #[error("unexpected input after the parsed value")]
    TrailingInput,

    #[error("unicode range U+{start:X}-{end:X} exceeds U+10FFFF")]
    UnicodeRangeOutOfBounds { start: u32, end: u32 },

    #[error("unicode range U+{start:X}-{end:X} ends before it starts")]
    InvertedUnicodeRange { start: u32, end: u32 },

    #[error("blocks and functions are nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}
