//! Token stream wrapper for the hand-written parser.

use crate::error::ParseError;
use mensura_fdl_ast::{LineIndex, Span};
use mensura_fdl_lexer::Token;
use std::ops::Range;

/// Token stream with lookahead and position tracking.
///
/// Each token is paired with its byte span from the source, enabling
/// accurate error message locations. Error construction lives here
/// because the stream owns the source text and line index needed to
/// render token slices and line/column pairs.
pub struct TokenStream<'src> {
    source: &'src str,
    tokens: &'src [(Token, Range<usize>)],
    index: &'src LineIndex,
    pos: usize,
}

impl<'src> TokenStream<'src> {
    /// Create a new token stream over lexed tokens and their spans.
    pub fn new(
        source: &'src str,
        tokens: &'src [(Token, Range<usize>)],
        index: &'src LineIndex,
    ) -> Self {
        Self {
            source,
            tokens,
            index,
            pos: 0,
        }
    }

    /// Peek at the current token without consuming it.
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(tok, _)| tok)
    }

    /// Advance to the next token and return the consumed one.
    pub fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos).map(|(tok, _)| tok);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Expect a specific token and advance past it.
    ///
    /// On mismatch returns the catalog error for the current position.
    pub fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        match self.peek() {
            Some(tok) if std::mem::discriminant(tok) == std::mem::discriminant(&expected) => {
                self.advance();
                Ok(())
            }
            _ => Err(self.syntax_error_here()),
        }
    }

    /// Check if the stream is exhausted.
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Current position in the token stream.
    pub fn current_pos(&self) -> usize {
        self.pos
    }

    /// Span covering the tokens from `start` up to the last consumed one.
    pub fn span_from(&self, start: usize) -> Span {
        let start_byte = self
            .tokens
            .get(start)
            .map(|(_, span)| span.start as u32)
            .unwrap_or(self.source.len() as u32);

        let end_byte = if self.pos > 0 {
            self.tokens
                .get(self.pos - 1)
                .map(|(_, span)| span.end as u32)
                .unwrap_or(start_byte)
        } else {
            start_byte
        };

        Span::new(start_byte, end_byte)
    }

    /// Span of the current token, or a zero-length span at end of input.
    pub fn current_span(&self) -> Span {
        match self.tokens.get(self.pos) {
            Some((_, span)) => Span::new(span.start as u32, span.end as u32),
            None => {
                let end = self.source.len() as u32;
                Span::new(end, end)
            }
        }
    }

    /// Catalog error for the current position: `Syntax error near '<tok>'`
    /// when a token is present, `Unexpected end of formula` at EOF.
    pub fn syntax_error_here(&self) -> ParseError {
        match self.tokens.get(self.pos) {
            Some((_, span)) => ParseError::syntax_near(
                &self.source[span.clone()],
                Span::new(span.start as u32, span.end as u32),
                self.index,
            ),
            None => ParseError::unexpected_eof(self.source.len() as u32, self.index),
        }
    }

    /// Catalog error for input remaining after a complete expression.
    pub fn trailing_token(&self) -> ParseError {
        match self.tokens.get(self.pos) {
            Some((_, span)) => ParseError::trailing_token(
                &self.source[span.clone()],
                Span::new(span.start as u32, span.end as u32),
                self.index,
            ),
            None => ParseError::unexpected_eof(self.source.len() as u32, self.index),
        }
    }

    /// Depth-cap error anchored at the current position.
    pub fn too_deep(&self) -> ParseError {
        ParseError::too_deep(self.current_span())
    }
}
