// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Lexical analysis for the mensura formula language.
//!
//! Tokenization of FDL source using logos.
//!
//! # Design
//!
//! - `Token`: all FDL token types (numbers, identifiers, operators)
//! - Whitespace (space, tab, CR, LF) is skipped
//! - `lex()` pairs every token with its byte span so the parser can
//!   report accurate 1-based line/column locations
//!
//! Only ASCII is semantically significant; anything the token table does
//! not cover surfaces as a [`LexError`] naming the offending character.

use logos::Logos;
use std::fmt;
use std::ops::Range;

/// FDL token.
///
/// Comparison operators rely on logos longest-match behavior, so `>=`
/// wins over `>` without explicit priorities.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    /// Number literal (e.g. `42`, `3.14`, `5.67e-8`)
    ///
    /// Digits are required on both sides of the decimal point, so `2.`
    /// lexes as a number followed by `.`. Out-of-range exponents saturate
    /// to infinity during `f64` parsing and are caught by the final
    /// result policy, never here.
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    /// Identifier (e.g. `sin`, `temperature`, `km`)
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_owned())]
    Ident(String),

    // === Operators ===
    /// Operator `+`
    #[token("+")]
    Plus,
    /// Operator `-`
    #[token("-")]
    Minus,
    /// Operator `*`
    #[token("*")]
    Star,
    /// Operator `/`
    #[token("/")]
    Slash,
    /// Operator `%`
    #[token("%")]
    Percent,
    /// Operator `^`
    #[token("^")]
    Caret,

    // Comparison
    /// Operator `>=`
    #[token(">=")]
    GtEq,
    /// Operator `<=`
    #[token("<=")]
    LtEq,
    /// Operator `==`
    #[token("==")]
    EqEq,
    /// Operator `!=`
    #[token("!=")]
    BangEq,
    /// Operator `>`
    #[token(">")]
    Gt,
    /// Operator `<`
    #[token("<")]
    Lt,

    // === Sigils & punctuation ===
    /// Measured-value sigil `$`
    #[token("$")]
    Dollar,
    /// Constant sigil `#`
    #[token("#")]
    Hash,
    /// Unit-suffix separator `.`
    #[token(".")]
    Dot,
    /// Argument separator `,`
    #[token(",")]
    Comma,

    // === Delimiters ===
    /// Delimiter `(`
    #[token("(")]
    LParen,
    /// Delimiter `)`
    #[token(")")]
    RParen,
    /// Delimiter `[`
    #[token("[")]
    LBracket,
    /// Delimiter `]`
    #[token("]")]
    RBracket,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(x) => write!(f, "{}", x),
            Token::Ident(id) => write!(f, "{}", id),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Percent => write!(f, "%"),
            Token::Caret => write!(f, "^"),
            Token::GtEq => write!(f, ">="),
            Token::LtEq => write!(f, "<="),
            Token::EqEq => write!(f, "=="),
            Token::BangEq => write!(f, "!="),
            Token::Gt => write!(f, ">"),
            Token::Lt => write!(f, "<"),
            Token::Dollar => write!(f, "$"),
            Token::Hash => write!(f, "#"),
            Token::Dot => write!(f, "."),
            Token::Comma => write!(f, ","),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
        }
    }
}

/// Lexing failure: a character the token table does not cover.
///
/// Carries the raw byte span and the offending text; the parser crate
/// renders it into the user-facing syntax error with line/column.
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    /// Byte span of the unrecognized input
    pub span: Range<usize>,
    /// The offending character
    pub text: String,
}

/// Tokenize a formula, pairing every token with its byte span.
///
/// Stops at the first unrecognized character; subsequent errors are
/// suppressed, matching the one-error-per-request contract.
pub fn lex(source: &str) -> Result<Vec<(Token, Range<usize>)>, LexError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                let span = lexer.span();
                let text = source[span.clone()]
                    .chars()
                    .next()
                    .map(String::from)
                    .unwrap_or_default();
                return Err(LexError { span, text });
            }
        }
    }
    Ok(tokens)
}
