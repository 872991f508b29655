use crate::error::{ErrorKind, ParseError};

/// Character cursor over a complete input text.
#[derive(Debug, Clone)]
pub struct Scanner {
    chars: Vec<char>,
    index: usize,
}

impl Scanner {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            index: 0,
        }
    }

    pub fn has_next(&self) -> bool {
        self.index < self.chars.len()
    }

    pub fn peek(&self) -> Result<char, ParseError> {
        self.chars
            .get(self.index)
            .copied()
            .ok_or_else(|| self.error(ErrorKind::OutOfInput))
    }

    pub fn next(&mut self) -> Result<char, ParseError> {
        let ch = self.peek()?;
        self.index += 1;
        Ok(ch)
    }

    /// Step back one character. Does nothing at the start of input.
    pub fn back(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Offset of the cursor in characters (not bytes).
    pub fn position(&self) -> usize {
        self.index
    }

    pub(crate) fn error(&self, kind: ErrorKind) -> ParseError {
        ParseError::new(kind, self.index)
    }
}
