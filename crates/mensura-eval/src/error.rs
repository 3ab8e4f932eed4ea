//! Evaluation errors.
//!
//! Exact message text matters: the hosting UI string-matches these, so
//! every variant renders its catalog string and nothing else. The same
//! variants also back the pre-evaluation semantic checks, which emit
//! identical messages for failures detectable from the symbol usage
//! record alone.

use crate::functions::Arity;
use thiserror::Error;

/// Evaluation error catalog.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("Undefined variable: ${0}")]
    UndefinedVariable(String),

    #[error("Undefined constant: #{0}")]
    UndefinedConstant(String),

    #[error("Variable '{0}' is scalar but is used with an index.")]
    IndexedScalar(String),

    #[error("Variable '{name}' is non-scalar. Use an index like '${name}[i]'.")]
    VectorWithoutIndex { name: String },

    #[error("Variable '{0}' is used both with and without an index.")]
    MixedIndexUse(String),

    #[error("Variable '{0}' has no unit defined but is used with a unit suffix.")]
    MissingUnit(String),

    #[error("Variable '{0}' is used with multiple indices/units")]
    MultipleSuffixes(String),

    #[error("Index {index} is out of range for variable '{name}'.")]
    IndexOutOfRange { name: String, index: f64 },

    #[error("Index for variable '{0}' must be an integer.")]
    IndexNotInteger(String),

    #[error("Index for variable '{0}' must be non-negative.")]
    IndexNegative(String),

    #[error("Index for variable '{0}' must evaluate to a finite number.")]
    IndexNotFinite(String),

    #[error("Cannot convert variable '{name}' from '{from}' to '{to}'.")]
    UnitConversion {
        name: String,
        from: String,
        to: String,
    },

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Function expects {0} argument(s).")]
    ArityMismatch(Arity),

    /// Domain failure inside a function implementation (e.g. factorial
    /// of a negative number). Carries its own full message.
    #[error("{0}")]
    Domain(String),
}
