use log::{debug, trace};

use crate::error::{ErrorKind, ParseError};
use crate::scanner::Scanner;
use crate::token_list::TokenList;
use crate::tokenize::{Token, TokenSource, Tokenizer};
use crate::value::{Map, Value};

/// Default limit on nested arrays and objects.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Knobs for the decode path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Deepest container nesting accepted before failing with
    /// [`ErrorKind::NestingTooDeep`].
    pub max_depth: usize,
}

impl DecodeOptions {
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Decode a complete JSON document with default options.
pub fn decode(input: &str) -> Result<Value, ParseError> {
    decode_with(input, &DecodeOptions::default())
}

pub fn decode_with(input: &str, options: &DecodeOptions) -> Result<Value, ParseError> {
    debug!("decoding {} bytes", input.len());
    let tokenizer = Tokenizer::new(Scanner::new(input));
    let result = Parser::new(tokenizer, options).parse_document();
    match &result {
        Ok(value) => debug!("decoded {}", value.type_name()),
        Err(err) => debug!("decode failed: {err}"),
    }
    result
}

/// Decode an already lexed document.
pub fn parse_tokens(tokens: TokenList, options: &DecodeOptions) -> Result<Value, ParseError> {
    Parser::new(tokens, options).parse_document()
}

type ParseResult = Result<Value, ParseError>;

/// Recursive-descent parser; one call frame per open container.
///
/// [`Parser::parse`] consumes the opening `{` or `[` itself before handing
/// over to [`Parser::parse_object`] or [`Parser::parse_array`], so those two
/// expect to start right after the opening token.
pub struct Parser<S> {
    tokens: S,
    max_depth: usize,
    depth: usize,
}

impl<S: TokenSource> Parser<S> {
    pub fn new(tokens: S, options: &DecodeOptions) -> Self {
        Self {
            tokens,
            max_depth: options.max_depth,
            depth: 0,
        }
    }

    /// Parse one value and require that nothing but whitespace follows it.
    pub fn parse_document(mut self) -> ParseResult {
        let value = self.parse()?;
        match self.tokens.next()? {
            Token::EndOfInput => Ok(value),
            _ => Err(self.error(ErrorKind::UnexpectedToken)),
        }
    }

    pub fn parse(&mut self) -> ParseResult {
        match self.tokens.next()? {
            Token::BeginObject => self.parse_object(),
            Token::BeginArray => self.parse_array(),
            Token::String(string) => Ok(Value::String(string)),
            Token::Number(number) => Ok(Value::Number(number)),
            Token::Bool(b) => Ok(Value::Bool(b)),
            Token::Null => Ok(Value::Null),
            Token::EndOfInput => Err(self.error(ErrorKind::UnexpectedEndOfInput)),
            _ => Err(self.error(ErrorKind::UnexpectedToken)),
        }
    }

    pub fn parse_object(&mut self) -> ParseResult {
        self.enter()?;
        let mut map = Map::new();

        if *self.tokens.peek()? == Token::EndObject {
            self.tokens.next()?;
            self.depth -= 1;
            return Ok(Value::Object(map));
        }

        loop {
            let key = match self.tokens.next()? {
                Token::String(key) => key,
                Token::EndOfInput => return Err(self.error(ErrorKind::UnexpectedEndOfInput)),
                // `{"a":1,}`
                Token::EndObject => return Err(self.error(ErrorKind::UnexpectedToken)),
                _ => return Err(self.error(ErrorKind::ExpectedKey)),
            };

            match self.tokens.next()? {
                Token::Colon => {}
                Token::EndOfInput => return Err(self.error(ErrorKind::UnexpectedEndOfInput)),
                _ => return Err(self.error(ErrorKind::ExpectedColon)),
            }

            let value = self.parse()?;
            // last duplicate wins, position of the first is kept
            map.insert(key, value);

            match self.tokens.next()? {
                Token::Comma => {}
                Token::EndObject => break,
                Token::EndOfInput => return Err(self.error(ErrorKind::UnexpectedEndOfInput)),
                _ => return Err(self.error(ErrorKind::ExpectedCommaOrEnd)),
            }
        }

        self.depth -= 1;
        Ok(Value::Object(map))
    }

    pub fn parse_array(&mut self) -> ParseResult {
        self.enter()?;
        let mut array = Vec::new();

        if *self.tokens.peek()? == Token::EndArray {
            self.tokens.next()?;
            self.depth -= 1;
            return Ok(Value::Array(array));
        }

        loop {
            // a `]` right after a comma is rejected by `parse`
            array.push(self.parse()?);

            match self.tokens.next()? {
                Token::Comma => {}
                Token::EndArray => break,
                Token::EndOfInput => return Err(self.error(ErrorKind::UnexpectedEndOfInput)),
                _ => return Err(self.error(ErrorKind::ExpectedCommaOrEnd)),
            }
        }

        self.depth -= 1;
        Ok(Value::Array(array))
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        trace!("entering container at depth {}", self.depth);
        if self.depth > self.max_depth {
            return Err(self.error(ErrorKind::NestingTooDeep(self.max_depth)));
        }
        Ok(())
    }

    fn error(&self, kind: ErrorKind) -> ParseError {
        ParseError::new(kind, self.tokens.position())
    }
}
