// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Numeric evaluation for mensura formulas.
//!
//! # Design
//!
//! - `functions`: the immutable built-in function registry with arity
//!   contracts
//! - `value`: the tagged scalar/vector measured-value representation
//! - `evaluator`: the tree walk producing a double
//! - `error`: the evaluation error catalog (exact user-facing text)
//!
//! The registry and unit catalog are passed into the evaluator by
//! reference rather than reached through globals, so the evaluator is
//! testable in isolation and trivially shareable across worker threads.

pub mod error;
pub mod evaluator;
pub mod functions;
pub mod value;

pub use error::EvalError;
pub use evaluator::Evaluator;
pub use functions::{Arity, Function, FunctionRegistry};
pub use value::{Measured, MeasuredKind};
