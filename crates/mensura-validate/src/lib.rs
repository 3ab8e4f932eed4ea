// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Validation orchestration for the mensura formula service.
//!
//! Strings the pipeline together per request: input normalization,
//! lexing and parsing, symbol analysis, semantic checks, evaluation,
//! and the final result policy. Every stage returns a value or an
//! error; the orchestrator serializes the first failure into the
//! response envelope and never retries.
//!
//! The function registry, unit catalog, and predefined constants are
//! built once when the [`Validator`] is constructed and shared
//! read-only across requests.

pub mod envelope;
pub mod error;
pub mod validator;

pub use envelope::{
    ConstantInput, MeasuredValueInput, ValidationRequest, ValidationResponse, SOURCE_BACKEND,
};
pub use error::ValidationError;
pub use validator::{default_constants, Validator, MAX_FORMULA_LEN};
