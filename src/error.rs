use std::io;

/// What went wrong while decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// A character that cannot start any token
    #[error("illegal character `{0}`")]
    IllegalCharacter(char),
    /// Malformed `null`, `true` or `false`
    #[error("invalid literal")]
    InvalidLiteral,
    /// Unknown escape character or a broken `\uXXXX` sequence
    #[error("invalid escape sequence")]
    InvalidEscape,
    /// Raw control character inside a string
    #[error("illegal control character in string")]
    IllegalStringContent,
    #[error("malformed number")]
    MalformedNumber,
    #[error("unexpected token")]
    UnexpectedToken,
    #[error("expected an object key")]
    ExpectedKey,
    #[error("expected `:`")]
    ExpectedColon,
    #[error("expected `,` or a closing bracket")]
    ExpectedCommaOrEnd,
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// The scanner ran dry while a character was still required
    #[error("ran out of input")]
    OutOfInput,
    /// Containers nested deeper than the configured limit
    #[error("nesting deeper than {0} levels")]
    NestingTooDeep(usize),
}

/// A decode failure and the character offset where it happened.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at position {position}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub position: usize,
}

impl ParseError {
    pub fn new(kind: ErrorKind, position: usize) -> Self {
        Self { kind, position }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The value has no JSON representation
    #[error("unsupported value: {0}")]
    UnsupportedType(String),
}

/// Umbrella error for the reader/writer adapters.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}
