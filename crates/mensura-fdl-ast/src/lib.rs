// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! AST types for the mensura formula language (FDL).
//!
//! This crate contains the expression node definitions shared by the
//! parser, the symbol analyzer, and the evaluator, together with the
//! source-location types used for error reporting.

pub mod expr;
pub mod span;

pub use expr::{BinaryOp, Expr, ExprKind, Suffix, UnaryOp};
pub use span::{LineIndex, Span};
