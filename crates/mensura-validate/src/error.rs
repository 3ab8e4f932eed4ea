//! Validation pipeline errors.
//!
//! One enum covering every failure the orchestrator can surface. Parse
//! and evaluation errors pass through transparently so their catalog
//! messages reach the caller unchanged; the definitional and
//! final-result variants render their own catalog strings here.

use mensura_eval::EvalError;
use mensura_fdl_parser::ParseError;
use thiserror::Error;

/// Any failure of the validation pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Formula cannot be empty")]
    EmptyFormula,

    #[error("Formula too large")]
    FormulaTooLarge,

    #[error("Duplicate variable: ${0}")]
    DuplicateVariable(String),

    #[error("Duplicate constant: #{0}")]
    DuplicateConstant(String),

    #[error("Variable identifier cannot be empty")]
    EmptyVariableId,

    #[error("Constant identifier cannot be empty")]
    EmptyConstantId,

    #[error("Variable '${0}' must define exactly one of 'value' or 'values'.")]
    AmbiguousValueShape(String),

    #[error("Variable '${0}' has a non-finite value.")]
    NonFiniteValue(String),

    #[error("Constant '#{0}' has a non-finite value.")]
    NonFiniteConstant(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("Result is not a real number (NaN)")]
    NanResult,

    #[error("Result is infinity - division by zero or overflow")]
    InfiniteResult,

    /// Catch-all for implementer-side bugs; must not fire under correct
    /// operation.
    #[error("Validation error: {0}")]
    Internal(String),
}
