//! Expression tree node definitions.
//!
//! The tree is built by the parser, inspected read-only by the symbol
//! analyzer, walked by the evaluator, and dropped when the request
//! completes. Identifier nodes keep the casing the user typed; lookups
//! fold case at the symbol-table boundary, not here.

use crate::span::Span;

/// An expression node with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    /// Create a new expression node.
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Expression node variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Number literal, e.g. `2`, `3.5`, `1e-3`.
    Number(f64),

    /// Variable reference `$name` with its trailing suffixes in source
    /// order, e.g. `$d.km` or `$temps[1]`.
    Variable { name: String, suffixes: Vec<Suffix> },

    /// Constant reference `#name`.
    Constant { name: String },

    /// Function call `name(arg, ...)`.
    Call { name: String, args: Vec<Expr> },

    /// Unary plus or minus.
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Binary operator application.
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

/// A trailing suffix on a variable reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Suffix {
    /// Unit tag: `.km`
    Unit(String),
    /// Index: `[expr]`
    Index(Expr),
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `+x`, the identity
    Plus,
    /// `-x`, IEEE negation
    Neg,
}

/// Binary operators, one variant per surface operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl BinaryOp {
    /// Whether this operator is one of the comparison family.
    ///
    /// Comparisons reduce to 1.0/0.0 and chain left-associatively, so the
    /// evaluator treats them uniformly.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge | BinaryOp::Eq | BinaryOp::Ne
        )
    }
}
