//! The validation orchestrator.
//!
//! Pipeline per request: trim and limit checks, measured-value
//! normalization, parse, symbol analysis, semantic checks in a fixed
//! order, constant merge, evaluation, final result policy. The first
//! failure wins and is serialized into the response envelope.

use crate::envelope::{ConstantInput, MeasuredValueInput, ValidationRequest, ValidationResponse};
use crate::error::ValidationError;
use indexmap::IndexMap;
use mensura_eval::{EvalError, Evaluator, FunctionRegistry, Measured, MeasuredKind};
use mensura_fdl_analyze::analyze;
use mensura_fdl_parser::parse;
use mensura_units::UnitCatalog;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Input length cap, checked before lexing.
pub const MAX_FORMULA_LEN: usize = 10_000;

/// Shared, read-only validation state: function registry, unit catalog,
/// and the predefined constants.
///
/// Built once at startup; `validate` holds no mutable state, so a
/// single instance serves concurrent requests.
#[derive(Debug, Clone)]
pub struct Validator {
    functions: FunctionRegistry,
    units: UnitCatalog,
    /// Predefined constants keyed by normalized id, original record kept
    /// for the catalog endpoint.
    predefined: IndexMap<String, ConstantInput>,
}

/// The built-in predefined constants used when no configuration file is
/// supplied.
pub fn default_constants() -> Vec<ConstantInput> {
    let constant = |id: &str, name: &str, value: f64| ConstantInput {
        id: id.to_string(),
        name: Some(name.to_string()),
        value,
    };
    vec![
        constant("pi", "Pi", std::f64::consts::PI),
        constant("e", "Euler's number", std::f64::consts::E),
        constant("tau", "Tau", std::f64::consts::TAU),
    ]
}

impl Validator {
    /// Build a validator over a predefined-constants list.
    ///
    /// Invalid entries (empty id, non-finite value) are skipped with a
    /// warning; later entries override earlier ones on id collision.
    pub fn new(predefined: Vec<ConstantInput>) -> Self {
        let mut table = IndexMap::new();
        for constant in predefined {
            let id = strip_sigil(&constant.id, '#');
            if id.is_empty() {
                warn!("skipping predefined constant with empty id");
                continue;
            }
            if !constant.value.is_finite() {
                warn!(id, "skipping predefined constant with non-finite value");
                continue;
            }
            table.insert(id.to_ascii_lowercase(), constant);
        }
        Self {
            functions: FunctionRegistry::builtin(),
            units: UnitCatalog::builtin(),
            predefined: table,
        }
    }

    /// Build a validator with the built-in default constants.
    pub fn with_defaults() -> Self {
        Self::new(default_constants())
    }

    /// The built-in function registry.
    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// The unit catalog.
    pub fn units(&self) -> &UnitCatalog {
        &self.units
    }

    /// The predefined constants, in configuration order.
    pub fn predefined_constants(&self) -> impl Iterator<Item = &ConstantInput> {
        self.predefined.values()
    }

    /// Validate a request and produce the response envelope.
    pub fn validate(&self, request: &ValidationRequest) -> ValidationResponse {
        let trimmed = request.formula.trim();
        match self.run(trimmed, request) {
            Ok(result) => {
                debug!(formula = trimmed, result, "formula validated");
                ValidationResponse::success(result, trimmed)
            }
            Err(error) => {
                debug!(formula = trimmed, %error, "formula rejected");
                ValidationResponse::failure(error.to_string())
            }
        }
    }

    /// The fallible pipeline behind [`Self::validate`].
    fn run(
        &self,
        trimmed: &str,
        request: &ValidationRequest,
    ) -> Result<f64, ValidationError> {
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyFormula);
        }
        if trimmed.len() > MAX_FORMULA_LEN {
            return Err(ValidationError::FormulaTooLarge);
        }

        let values = normalize_measured_values(&request.measured_values)?;
        let expr = parse(trimmed)?;
        let usage = analyze(&expr);

        // Semantic checks, first failure wins, in this exact order.
        for (key, var) in &usage.variables {
            if !values.contains_key(key) {
                return Err(EvalError::UndefinedVariable(var.display.clone()).into());
            }
        }
        for (key, var) in &usage.variables {
            if var.with_index && !values[key].is_vector() {
                return Err(EvalError::IndexedScalar(var.display.clone()).into());
            }
        }
        for (_, var) in &usage.variables {
            if var.with_index && var.without_index {
                return Err(EvalError::MixedIndexUse(var.display.clone()).into());
            }
        }
        for (key, var) in &usage.variables {
            if var.without_index && values[key].is_vector() {
                return Err(EvalError::VectorWithoutIndex {
                    name: var.display.clone(),
                }
                .into());
            }
        }

        let constants = self.merge_constants(&request.constants)?;
        for (key, display) in &usage.constants {
            if !constants.contains_key(key) {
                return Err(EvalError::UndefinedConstant(display.clone()).into());
            }
        }

        for (key, var) in &usage.variables {
            if var.with_unit && values[key].unit.is_none() {
                return Err(EvalError::MissingUnit(var.display.clone()).into());
            }
        }

        let evaluator = Evaluator::new(&values, &constants, &self.functions, &self.units);
        let result = evaluator.eval(&expr)?;

        if result.is_nan() {
            return Err(ValidationError::NanResult);
        }
        if result.is_infinite() {
            return Err(ValidationError::InfiniteResult);
        }
        Ok(result)
    }

    /// Merge request constants over the predefined table.
    ///
    /// Overrides win on normalized id collision; duplicates inside the
    /// request itself are an error.
    fn merge_constants(
        &self,
        overrides: &[ConstantInput],
    ) -> Result<IndexMap<String, f64>, ValidationError> {
        let mut merged: IndexMap<String, f64> = self
            .predefined
            .iter()
            .map(|(key, constant)| (key.clone(), constant.value))
            .collect();

        let mut seen = HashSet::with_capacity(overrides.len());
        for constant in overrides {
            let display = strip_sigil(&constant.id, '#');
            if display.is_empty() {
                return Err(ValidationError::EmptyConstantId);
            }
            if !constant.value.is_finite() {
                return Err(ValidationError::NonFiniteConstant(display.to_string()));
            }
            let key = display.to_ascii_lowercase();
            if !seen.insert(key.clone()) {
                return Err(ValidationError::DuplicateConstant(display.to_string()));
            }
            merged.insert(key, constant.value);
        }
        Ok(merged)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Strip a leading sigil from a trimmed identifier.
fn strip_sigil(id: &str, sigil: char) -> &str {
    let trimmed = id.trim();
    trimmed.strip_prefix(sigil).unwrap_or(trimmed)
}

/// Normalize measured values into the evaluator's symbol table.
///
/// Enforces the definitional invariants: non-empty id, unique normalized
/// id, exactly one of scalar/vector (an empty vector counts as absent),
/// finite numbers, and blank units folded to "unitless".
fn normalize_measured_values(
    inputs: &[MeasuredValueInput],
) -> Result<IndexMap<String, Measured>, ValidationError> {
    let mut map = IndexMap::with_capacity(inputs.len());
    for input in inputs {
        let display = strip_sigil(&input.id, '$');
        if display.is_empty() {
            return Err(ValidationError::EmptyVariableId);
        }

        let vector = input.values.as_ref().filter(|values| !values.is_empty());
        let kind = match (input.value, vector) {
            (Some(scalar), None) => {
                if !scalar.is_finite() {
                    return Err(ValidationError::NonFiniteValue(display.to_string()));
                }
                MeasuredKind::Scalar(scalar)
            }
            (None, Some(values)) => {
                if values.iter().any(|value| !value.is_finite()) {
                    return Err(ValidationError::NonFiniteValue(display.to_string()));
                }
                MeasuredKind::Vector(values.clone())
            }
            _ => return Err(ValidationError::AmbiguousValueShape(display.to_string())),
        };

        let unit = input
            .unit
            .as_deref()
            .map(str::trim)
            .filter(|unit| !unit.is_empty())
            .map(String::from);

        let key = display.to_ascii_lowercase();
        if map.insert(key, Measured { kind, unit }).is_some() {
            return Err(ValidationError::DuplicateVariable(display.to_string()));
        }
    }
    Ok(map)
}
