use log::trace;

use crate::error::{ErrorKind, ParseError};
use crate::scanner::Scanner;
use crate::token_list::TokenList;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `{`
    BeginObject,
    /// `}`
    EndObject,
    /// `[`
    BeginArray,
    /// `]`
    EndArray,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `null`
    Null,
    /// `true` or `false`
    Bool(bool),
    /// Any number literal
    Number(f64),
    /// Key of the key/value pair or a string value, already unescaped
    String(String),
    /// No characters left besides whitespace
    EndOfInput,
}

/// Anything the parser can pull tokens from.
pub trait TokenSource {
    /// Look at the next token without consuming it.
    fn peek(&mut self) -> Result<&Token, ParseError>;

    /// Consume the next token.
    fn next(&mut self) -> Result<Token, ParseError>;

    /// Start offset of the token most recently handed out by `peek` or `next`.
    fn position(&self) -> usize;
}

/// Lazily lexes a [`Scanner`] with one token of lookahead.
#[derive(Debug)]
pub struct Tokenizer {
    scanner: Scanner,
    lookahead: Option<Token>,
    token_start: usize,
}

impl Tokenizer {
    pub fn new(scanner: Scanner) -> Self {
        Self {
            scanner,
            lookahead: None,
            token_start: 0,
        }
    }

    /// False once [`Token::EndOfInput`] has been lexed.
    pub fn has_next(&self) -> bool {
        match &self.lookahead {
            Some(token) => *token != Token::EndOfInput,
            None => self.scanner.has_next(),
        }
    }

    pub fn peek(&mut self) -> Result<&Token, ParseError> {
        let token = match self.lookahead.take() {
            Some(token) => token,
            None => self.next_token()?,
        };
        Ok(self.lookahead.insert(token))
    }

    pub fn next(&mut self) -> Result<Token, ParseError> {
        match self.lookahead.take() {
            Some(token) => Ok(token),
            None => self.next_token(),
        }
    }

    pub fn position(&self) -> usize {
        self.token_start
    }

    /// Lex the whole input, up to and including [`Token::EndOfInput`].
    pub fn tokenize(mut self) -> Result<TokenList, ParseError> {
        let mut tokens = TokenList::new();
        loop {
            let token = self.next()?;
            let done = token == Token::EndOfInput;
            tokens.push(token, self.token_start);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_whitespace();
        self.token_start = self.scanner.position();

        if !self.scanner.has_next() {
            trace!("end of input at {}", self.token_start);
            return Ok(Token::EndOfInput);
        }

        let ch = self.scanner.next()?;
        let token = match ch {
            '{' => Token::BeginObject,
            '}' => Token::EndObject,
            '[' => Token::BeginArray,
            ']' => Token::EndArray,
            ':' => Token::Colon,
            ',' => Token::Comma,
            'n' => self.read_literal("null", Token::Null)?,
            't' => self.read_literal("true", Token::Bool(true))?,
            'f' => self.read_literal("false", Token::Bool(false))?,
            '"' => self.read_string()?,
            '-' | '0'..='9' => {
                self.scanner.back();
                self.read_number()?
            }
            _ => {
                return Err(ParseError::new(
                    ErrorKind::IllegalCharacter(ch),
                    self.token_start,
                ))
            }
        };

        trace!("lexed {:?} at {}", token, self.token_start);
        Ok(token)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek_char(), Some(' ' | '\t' | '\n' | '\r')) {
            self.scanner.next().ok();
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.scanner.peek().ok()
    }

    /// Match the rest of `word`; its first character is already consumed.
    fn read_literal(&mut self, word: &str, token: Token) -> Result<Token, ParseError> {
        for expected in word.chars().skip(1) {
            if self.peek_char() != Some(expected) {
                return Err(self.scanner.error(ErrorKind::InvalidLiteral));
            }
            self.scanner.next()?;
        }
        Ok(token)
    }

    fn read_string(&mut self) -> Result<Token, ParseError> {
        let mut string = String::new();

        loop {
            match self.scanner.next()? {
                '"' => return Ok(Token::String(string)),
                '\\' => string.push(self.read_escape()?),
                ch if ch < '\u{20}' => {
                    return Err(ParseError::new(
                        ErrorKind::IllegalStringContent,
                        self.scanner.position() - 1,
                    ))
                }
                ch => string.push(ch),
            }
        }
    }

    fn read_escape(&mut self) -> Result<char, ParseError> {
        let unescaped = match self.scanner.next()? {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            // `\b` (backspace) and `\f` (formfeed) have no Rust escape
            'b' => '\u{8}',
            'f' => '\u{c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => return self.read_unicode_escape(),
            _ => return Err(self.scanner.error(ErrorKind::InvalidEscape)),
        };
        Ok(unescaped)
    }

    /// Decode the `XXXX` of `\uXXXX`, pairing surrogates.
    fn read_unicode_escape(&mut self) -> Result<char, ParseError> {
        let unit = self.read_hex4()?;

        let code_point = match unit {
            0xD800..=0xDBFF => {
                if self.scanner.next()? != '\\' || self.scanner.next()? != 'u' {
                    return Err(self.scanner.error(ErrorKind::InvalidEscape));
                }
                let low = self.read_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(self.scanner.error(ErrorKind::InvalidEscape));
                }
                0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)
            }
            // lone low surrogate
            0xDC00..=0xDFFF => return Err(self.scanner.error(ErrorKind::InvalidEscape)),
            _ => unit,
        };

        char::from_u32(code_point).ok_or_else(|| self.scanner.error(ErrorKind::InvalidEscape))
    }

    fn read_hex4(&mut self) -> Result<u32, ParseError> {
        let mut sum = 0;
        for _ in 0..4 {
            let digit = self
                .scanner
                .next()?
                .to_digit(16)
                .ok_or_else(|| self.scanner.error(ErrorKind::InvalidEscape))?;
            sum = sum * 16 + digit;
        }
        Ok(sum)
    }

    /// `-? (0 | [1-9][0-9]*) (.[0-9]+)? ([eE][+-]?[0-9]+)?`
    fn read_number(&mut self) -> Result<Token, ParseError> {
        let mut mantissa = String::new();
        let mut exponent = String::new();

        if self.peek_char() == Some('-') {
            mantissa.push(self.scanner.next()?);
        }

        match self.peek_char() {
            Some('0') => {
                mantissa.push(self.scanner.next()?);
                if self.peek_char().is_some_and(|ch| ch.is_ascii_digit()) {
                    return Err(self.scanner.error(ErrorKind::MalformedNumber));
                }
            }
            Some('1'..='9') => {
                self.read_digits(&mut mantissa)?;
            }
            _ => return Err(self.scanner.error(ErrorKind::MalformedNumber)),
        }

        if self.peek_char() == Some('.') {
            mantissa.push(self.scanner.next()?);
            if self.read_digits(&mut mantissa)? == 0 {
                return Err(self.scanner.error(ErrorKind::MalformedNumber));
            }
        }

        if matches!(self.peek_char(), Some('e' | 'E')) {
            self.scanner.next()?;
            if let Some(sign @ ('+' | '-')) = self.peek_char() {
                exponent.push(sign);
                self.scanner.next()?;
            }
            if self.read_digits(&mut exponent)? == 0 {
                return Err(self.scanner.error(ErrorKind::MalformedNumber));
            }
        } else {
            exponent.push('0');
        }

        // mantissa × 10^exponent, rounded once by the float parser
        let number: f64 = format!("{mantissa}e{exponent}")
            .parse()
            .map_err(|_| self.scanner.error(ErrorKind::MalformedNumber))?;
        if !number.is_finite() {
            return Err(self.scanner.error(ErrorKind::MalformedNumber));
        }

        Ok(Token::Number(number))
    }

    /// Append a run of ASCII digits to `buf`, returning how many were read.
    fn read_digits(&mut self, buf: &mut String) -> Result<usize, ParseError> {
        let mut count = 0;
        while let Some(digit) = self.peek_char().filter(char::is_ascii_digit) {
            buf.push(digit);
            self.scanner.next()?;
            count += 1;
        }
        Ok(count)
    }
}

impl TokenSource for Tokenizer {
    fn peek(&mut self) -> Result<&Token, ParseError> {
        Tokenizer::peek(self)
    }

    fn next(&mut self) -> Result<Token, ParseError> {
        Tokenizer::next(self)
    }

    fn position(&self) -> usize {
        Tokenizer::position(self)
    }
}

/// Lex `input` into a complete token list.
pub fn tokenize(input: &str) -> Result<TokenList, ParseError> {
    Tokenizer::new(Scanner::new(input)).tokenize()
}
