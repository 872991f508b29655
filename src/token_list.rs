use crate::error::{ErrorKind, ParseError};
use crate::tokenize::{Token, TokenSource};

/// A fully lexed document, each token paired with its start offset.
///
/// Produced by [`Tokenizer::tokenize`](crate::tokenize::Tokenizer::tokenize);
/// always ends with [`Token::EndOfInput`] when built that way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenList {
    tokens: Vec<(Token, usize)>,
    index: usize,
    // start of the token last returned by `peek` or `next`
    current: usize,
}

impl TokenList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: Token, position: usize) {
        self.tokens.push((token, position));
    }

    pub fn has_next(&self) -> bool {
        self.index < self.tokens.len()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens.into_iter().map(|(token, _)| token).collect()
    }

    /// Offset of the final token, reported when reading beyond the end.
    fn end_position(&self) -> usize {
        self.tokens.last().map_or(0, |(_, position)| *position)
    }
}

impl TokenSource for TokenList {
    fn peek(&mut self) -> Result<&Token, ParseError> {
        let end = self.end_position();
        match self.tokens.get(self.index) {
            Some((token, position)) => {
                self.current = *position;
                Ok(token)
            }
            None => Err(ParseError::new(ErrorKind::OutOfInput, end)),
        }
    }

    fn next(&mut self) -> Result<Token, ParseError> {
        let token = self.peek()?.clone();
        self.index += 1;
        Ok(token)
    }

    fn position(&self) -> usize {
        self.current
    }
}

impl FromIterator<Token> for TokenList {
    /// Build a list with positions equal to token indices.
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().enumerate().map(|(i, t)| (t, i)).collect(),
            index: 0,
            current: 0,
        }
    }
}
