// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Hand-written recursive descent parser for the mensura formula language.
//!
//! # Architecture
//!
//! - `stream`: TokenStream wrapper with lookahead and span tracking
//! - `error`: ParseError carrying the user-facing message catalog
//! - `expr`: expression parser using Pratt precedence climbing
//!
//! # Grammar
//!
//! ```text
//! formula  := expr EOF
//! expr     := cmp
//! cmp      := add ( (>= | <= | == | != | > | <) add )*      -- left
//! add      := mul ( (+ | -) mul )*                          -- left
//! mul      := pow ( (* | / | %) pow )*                      -- left
//! pow      := unary ( ^ unary )*                            -- left, see below
//! unary    := + unary | - unary | primary
//! primary  := NUMBER | '$' IDENT suffix* | '#' IDENT
//!           | IDENT '(' (expr (',' expr)*)? ')' | '(' expr ')'
//! suffix   := '.' IDENT | '[' expr ']'
//! ```
//!
//! Power is **left-associative**: `2^3^2` is `(2^3)^2` = 64. This matches
//! the system the language is compatible with and is deliberate;
//! [`ParseOptions::right_assoc_pow`] opts into the conventional right
//! associativity. Note the grammar places `unary` inside `pow`, so
//! `-2^2` is `(-2)^2` = 4.
//!
//! On the first unrecoverable syntax error parsing stops and no partial
//! tree is returned.

mod error;
mod expr;
mod stream;

pub use error::{ParseError, ParseErrorKind};

use mensura_fdl_ast::{Expr, LineIndex};
use stream::TokenStream;

/// Parser behavior switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Evaluate `^` right-associatively (`2^3^2` = 512) instead of the
    /// default left-associative reading (`2^3^2` = 64).
    pub right_assoc_pow: bool,
}

/// Parse a formula into an expression tree with default options.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    parse_with(source, ParseOptions::default())
}

/// Parse a formula into an expression tree.
///
/// # Returns
/// - `Ok(Expr)` if the whole input forms exactly one expression
/// - `Err(ParseError)` on the first lexical or syntactic error
pub fn parse_with(source: &str, options: ParseOptions) -> Result<Expr, ParseError> {
    let index = LineIndex::new(source);
    let tokens =
        mensura_fdl_lexer::lex(source).map_err(|err| ParseError::unknown_character(&err, &index))?;

    let mut stream = TokenStream::new(source, &tokens, &index);
    let parsed = expr::parse_expr(&mut stream, 0, options)?;
    if !stream.at_end() {
        return Err(stream.trailing_token());
    }
    Ok(parsed)
}
