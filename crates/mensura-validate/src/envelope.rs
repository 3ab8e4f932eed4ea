//! Request and response envelopes.
//!
//! Wire names are camelCase; identifiers may carry their surface sigil
//! (`$name`, `#name`) or come bare, and are normalized by the
//! validator, not here.

use serde::{Deserialize, Serialize};

/// The fixed origin tag carried by every response.
pub const SOURCE_BACKEND: &str = "Backend";

/// A formula validation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    pub formula: String,
    #[serde(default)]
    pub measured_values: Vec<MeasuredValueInput>,
    #[serde(default)]
    pub constants: Vec<ConstantInput>,
}

/// A measured value as supplied by the caller.
///
/// Exactly one of `value` and `values` must be present (an empty
/// `values` array counts as absent); the validator enforces this.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasuredValueInput {
    /// Identifier, `"$name"` or `"name"`.
    pub id: String,
    /// Display name; not used for lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Scalar form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Vector form, mutually exclusive with `value`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f64>>,
    /// Unit alias recognized by the unit catalog; blank means unitless.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// A named constant, from the request or the predefined configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstantInput {
    /// Identifier, `"#name"` or `"name"`.
    pub id: String,
    /// Display name; not used for lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub value: f64,
}

/// The validation result envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<f64>,
    /// The trimmed original input, echoed on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluated_formula: Option<String>,
    pub source: String,
}

impl ValidationResponse {
    /// Successful validation carrying the computed result.
    pub fn success(result: f64, formula: &str) -> Self {
        Self {
            is_valid: true,
            error: None,
            result: Some(result),
            evaluated_formula: Some(formula.to_string()),
            source: SOURCE_BACKEND.to_string(),
        }
    }

    /// Failed validation carrying the catalog error message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(error.into()),
            result: None,
            evaluated_formula: None,
            source: SOURCE_BACKEND.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let json = r##"{
            "formula": "$d.km + #offset",
            "measuredValues": [
                { "id": "$d", "name": "Distance", "value": 1000.0, "unit": "meter" },
                { "id": "$temps", "name": "Temps", "values": [1.0, 2.0] }
            ],
            "constants": [ { "id": "#offset", "name": "Offset", "value": 3.0 } ]
        }"##;
        let request: ValidationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.formula, "$d.km + #offset");
        assert_eq!(request.measured_values.len(), 2);
        assert_eq!(request.measured_values[0].value, Some(1000.0));
        assert_eq!(
            request.measured_values[1].values,
            Some(vec![1.0, 2.0])
        );
        assert_eq!(request.constants[0].value, 3.0);
    }

    #[test]
    fn test_request_defaults() {
        let request: ValidationRequest = serde_json::from_str(r#"{"formula": "1"}"#).unwrap();
        assert!(request.measured_values.is_empty());
        assert!(request.constants.is_empty());
    }

    #[test]
    fn test_response_success_wire_format() {
        let json = serde_json::to_value(ValidationResponse::success(4.0, "2 + 2")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "isValid": true,
                "result": 4.0,
                "evaluatedFormula": "2 + 2",
                "source": "Backend"
            })
        );
    }

    #[test]
    fn test_response_failure_wire_format() {
        let json = serde_json::to_value(ValidationResponse::failure("Formula cannot be empty"))
            .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "isValid": false,
                "error": "Formula cannot be empty",
                "source": "Backend"
            })
        );
    }
}
