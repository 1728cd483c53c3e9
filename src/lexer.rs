//! Whitespace splitting of a command line into argument tokens.
//!
//! Tokens are borrowed spans of the line; nothing is copied. Only the bytes in
//! the delimiter set separate tokens, so there is no quoting or escaping.

use crate::buffer::INITIAL_CAPACITY;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Bytes that separate tokens on a command line.
pub const DELIMITERS: &[u8] = b" ";

/// Largest number of tokens accepted from a single line.
pub const MAX_TOKENS: usize = INITIAL_CAPACITY / 2 - 1;

/// Errors that can occur while splitting a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    /// The line holds more tokens than the list may contain.
    TooManyTokens { limit: usize },
}

impl Error for TokenizeError {}

impl Display for TokenizeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenizeError::TooManyTokens { limit } => {
                write!(f, "too many arguments (at most {limit} allowed)")
            }
        }
    }
}

/// Iterator over the tokens of a line.
///
/// The scan position is the only state; it only moves forward.
pub struct Tokens<'a, 'd> {
    text: &'a [u8],
    delimiters: &'d [u8],
    pos: usize,
}

impl<'a, 'd> Tokens<'a, 'd> {
    pub fn new(text: &'a [u8], delimiters: &'d [u8]) -> Self {
        Tokens {
            text,
            delimiters,
            pos: 0,
        }
    }

    fn is_delimiter(&self, byte: u8) -> bool {
        self.delimiters.contains(&byte)
    }
}

impl<'a> Iterator for Tokens<'a, '_> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.text.len() && self.is_delimiter(self.text[self.pos]) {
            self.pos += 1;
        }
        if self.pos == self.text.len() {
            return None;
        }
        let start = self.pos;
        while self.pos < self.text.len() && !self.is_delimiter(self.text[self.pos]) {
            self.pos += 1;
        }
        Some(&self.text[start..self.pos])
    }
}

/// Ordered tokens of one line, valid while the line itself is borrowed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TokenList<'a> {
    tokens: Vec<&'a [u8]>,
}

impl<'a> TokenList<'a> {
    /// The command to run, i.e. the first token.
    pub fn program(&self) -> Option<&'a [u8]> {
        self.tokens.first().copied()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn as_slice(&self) -> &[&'a [u8]] {
        &self.tokens
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        self.tokens.iter().copied()
    }
}

/// Split `text` on `delimiters`, accepting at most [`MAX_TOKENS`] tokens.
pub fn tokenize<'a>(text: &'a [u8], delimiters: &[u8]) -> Result<TokenList<'a>, TokenizeError> {
    tokenize_with_limit(text, delimiters, MAX_TOKENS)
}

/// Like [`tokenize`], with an explicit token limit.
pub fn tokenize_with_limit<'a>(
    text: &'a [u8],
    delimiters: &[u8],
    limit: usize,
) -> Result<TokenList<'a>, TokenizeError> {
    let mut tokens = Vec::new();
    for token in Tokens::new(text, delimiters) {
        if tokens.len() == limit {
            return Err(TokenizeError::TooManyTokens { limit });
        }
        tokens.push(token);
    }
    tracing::trace!(count = tokens.len(), "line tokenized");
    Ok(TokenList { tokens })
}
