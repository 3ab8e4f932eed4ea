//! REST API handlers.

use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use indexmap::IndexMap;
use mensura_units::Quantity;
use mensura_validate::{ConstantInput, ValidationRequest, ValidationResponse};
use serde::Serialize;

/// POST `/api/validate` - run a formula through the validation pipeline.
///
/// # Request Body
/// ```json
/// {
///   "formula": "$d.km * 2",
///   "measuredValues": [ { "id": "$d", "name": "d", "value": 500, "unit": "m" } ],
///   "constants": []
/// }
/// ```
///
/// # Response
/// Always `200 OK`; success and every validation failure travel inside
/// the envelope (`isValid` / `error`). Only malformed JSON is rejected
/// at the HTTP level, by the extractor.
pub async fn validate_handler(
    State(state): State<AppState>,
    Json(request): Json<ValidationRequest>,
) -> Json<ValidationResponse> {
    Json(state.validator.validate(&request))
}

/// A built-in function as listed by the catalog endpoint.
#[derive(Debug, Serialize)]
pub struct FunctionInfo {
    pub name: &'static str,
    /// Human-readable arity, e.g. `"1"`, `"1 or 2"`, `"at least 1"`.
    pub arity: String,
}

/// GET `/api/functions` - the built-in function catalog.
///
/// Intended for client-side autocompletion; order is stable.
pub async fn functions_handler(State(state): State<AppState>) -> Json<Vec<FunctionInfo>> {
    let functions = state
        .validator
        .functions()
        .iter()
        .map(|function| FunctionInfo {
            name: function.name,
            arity: function.arity.to_string(),
        })
        .collect();
    Json(functions)
}

/// GET `/api/units` - unit aliases grouped by quantity.
pub async fn units_handler(
    State(state): State<AppState>,
) -> Json<IndexMap<Quantity, Vec<&'static str>>> {
    Json(state.validator.units().by_quantity())
}

/// GET `/api/constants` - the predefined constants.
pub async fn constants_handler(State(state): State<AppState>) -> Json<Vec<ConstantInput>> {
    Json(state.validator.predefined_constants().cloned().collect())
}

/// Liveness payload for `/healthz`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET `/healthz` - liveness probe.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
