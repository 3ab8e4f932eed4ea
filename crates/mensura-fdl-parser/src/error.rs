//! Parse error types.
//!
//! Exact message text matters: the hosting UI string-matches some of
//! these, so the catalog strings are produced here and nowhere else.

use mensura_fdl_ast::{LineIndex, Span};
use mensura_fdl_lexer::LexError;
use std::fmt;

/// Parse error with source location and the user-facing message.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// Kind of parse error
    pub kind: ParseErrorKind,
    /// Source location where the error occurred
    pub span: Span,
    /// Catalog message, fully rendered with line/column
    message: String,
}

/// Category of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A character the token table does not cover.
    UnknownCharacter,
    /// A token was found where the grammar required something else.
    UnexpectedToken,
    /// Input ended while a construct was incomplete.
    UnexpectedEof,
    /// A complete expression was parsed but input remained.
    TrailingToken,
    /// Expression nesting exceeded the depth cap.
    TooDeep,
}

impl ParseError {
    /// Render an unknown-character lex failure.
    pub fn unknown_character(err: &LexError, index: &LineIndex) -> Self {
        let (line, col) = index.location(err.span.start as u32);
        Self {
            kind: ParseErrorKind::UnknownCharacter,
            span: Span::new(err.span.start as u32, err.span.end as u32),
            message: format!(
                "Syntax error near '{}' at [line {}, col {}]",
                err.text, line, col
            ),
        }
    }

    /// A token was present where the grammar required something else.
    pub fn syntax_near(text: &str, span: Span, index: &LineIndex) -> Self {
        let (line, col) = index.location(span.start);
        Self {
            kind: ParseErrorKind::UnexpectedToken,
            span,
            message: format!("Syntax error near '{}' at [line {}, col {}]", text, line, col),
        }
    }

    /// Input ended while a construct was incomplete.
    pub fn unexpected_eof(offset: u32, index: &LineIndex) -> Self {
        let (line, col) = index.location(offset);
        Self {
            kind: ParseErrorKind::UnexpectedEof,
            span: Span::new(offset, offset),
            message: format!("Unexpected end of formula at [line {}, col {}]", line, col),
        }
    }

    /// A complete expression was parsed but input remained.
    pub fn trailing_token(text: &str, span: Span, index: &LineIndex) -> Self {
        let (line, col) = index.location(span.start);
        Self {
            kind: ParseErrorKind::TrailingToken,
            span,
            message: format!(
                "Unexpected token: '{}' at [line {}, col {}]",
                text, line, col
            ),
        }
    }

    /// Expression nesting exceeded the depth cap.
    pub fn too_deep(span: Span) -> Self {
        Self {
            kind: ParseErrorKind::TooDeep,
            span,
            message: "Formula too deep".to_string(),
        }
    }

    /// The rendered catalog message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ParseError {}
