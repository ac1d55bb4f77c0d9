//! Lexer implementation using logos

use super::token::{Token, TokenKind};
use crate::common::{LexError, LineIndex, Span};
use logos::Logos;

/// Lexer for minic source code
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    index: LineIndex<'a>,
    at_eof: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            index: LineIndex::new(source),
            at_eof: false,
        }
    }

    /// Get the next token.
    ///
    /// Once the source is exhausted every call returns the same
    /// `EndOfInput` token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        if self.at_eof {
            return Ok(self.end_of_input());
        }

        match self.inner.next() {
            Some(Ok(kind)) => {
                let span = Span::from(self.inner.span());
                Ok(Token::new(kind, self.inner.slice(), span, self.index.location(span.start)))
            }
            Some(Err(())) => {
                let start = self.inner.span().start;
                let character = self.source()[start..].chars().next().unwrap_or('\0');
                Err(LexError::new(
                    character,
                    self.index.location(start),
                    Span::new(start, start + character.len_utf8()),
                ))
            }
            None => {
                self.at_eof = true;
                Ok(self.end_of_input())
            }
        }
    }

    fn end_of_input(&self) -> Token {
        let len = self.source().len();
        Token::new(TokenKind::EndOfInput, "", Span::new(len, len), self.index.location(len))
    }

    /// Tokenize the entire source and return all tokens
    pub fn tokenize_all(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.kind == TokenKind::EndOfInput;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        log::trace!("lexed {} tokens", tokens.len());
        Ok(tokens)
    }

    /// Get the source being lexed
    pub fn source(&self) -> &'a str {
        self.inner.source()
    }
}
