//! End-to-end validation scenarios.
//!
//! Each test drives the full pipeline through [`Validator::validate`]
//! with a request envelope, checking the response envelope the way a
//! caller would see it.

use mensura_validate::{
    ConstantInput, MeasuredValueInput, ValidationRequest, Validator,
};

fn scalar(id: &str, value: f64) -> MeasuredValueInput {
    MeasuredValueInput {
        id: id.to_string(),
        name: None,
        value: Some(value),
        values: None,
        unit: None,
    }
}

fn scalar_with_unit(id: &str, value: f64, unit: &str) -> MeasuredValueInput {
    MeasuredValueInput {
        unit: Some(unit.to_string()),
        ..scalar(id, value)
    }
}

fn vector(id: &str, values: &[f64]) -> MeasuredValueInput {
    MeasuredValueInput {
        id: id.to_string(),
        name: None,
        value: None,
        values: Some(values.to_vec()),
        unit: None,
    }
}

fn constant(id: &str, value: f64) -> ConstantInput {
    ConstantInput {
        id: id.to_string(),
        name: None,
        value,
    }
}

fn request(
    formula: &str,
    measured_values: Vec<MeasuredValueInput>,
    constants: Vec<ConstantInput>,
) -> ValidationRequest {
    ValidationRequest {
        formula: formula.to_string(),
        measured_values,
        constants,
    }
}

fn validate(
    formula: &str,
    measured_values: Vec<MeasuredValueInput>,
    constants: Vec<ConstantInput>,
) -> mensura_validate::ValidationResponse {
    Validator::with_defaults().validate(&request(formula, measured_values, constants))
}

#[test]
fn test_plain_arithmetic() {
    let response = validate("2 + 2", vec![], vec![]);
    assert!(response.is_valid);
    assert_eq!(response.result, Some(4.0));
    assert_eq!(response.error, None);
    assert_eq!(response.evaluated_formula.as_deref(), Some("2 + 2"));
    assert_eq!(response.source, "Backend");
}

#[test]
fn test_variables_and_constants() {
    let response = validate(
        "($temperature * #conversion_factor) + 32",
        vec![scalar("$temperature", 25.5)],
        vec![constant("#conversion_factor", 1.8)],
    );
    assert!(response.is_valid);
    let result = response.result.unwrap();
    assert!((result - 77.9).abs() < 1e-12);
}

#[test]
fn test_unit_conversion() {
    let response = validate("$d.km", vec![scalar_with_unit("$d", 1000.0, "meter")], vec![]);
    assert!(response.is_valid);
    assert_eq!(response.result, Some(1.0));
}

#[test]
fn test_unit_suffix_without_declared_unit() {
    let response = validate("$d.km", vec![scalar("$d", 1000.0)], vec![]);
    assert!(!response.is_valid);
    assert_eq!(
        response.error.as_deref(),
        Some("Variable 'd' has no unit defined but is used with a unit suffix.")
    );
    assert_eq!(response.result, None);
    assert_eq!(response.evaluated_formula, None);
}

#[test]
fn test_vector_indexing() {
    let response = validate(
        "$temps[1] + $temps[2]",
        vec![vector("$temps", &[10.0, 20.0, 30.0])],
        vec![],
    );
    assert!(response.is_valid);
    assert_eq!(response.result, Some(50.0));
}

#[test]
fn test_mixed_index_use_on_scalar() {
    // Both the scalar-index and mixed-use rules are violated; the
    // scalar-index check runs first.
    let response = validate("$a + $a[0]", vec![scalar("$a", 5.0)], vec![]);
    assert!(!response.is_valid);
    assert_eq!(
        response.error.as_deref(),
        Some("Variable 'a' is scalar but is used with an index.")
    );
}

#[test]
fn test_mixed_index_use_on_vector() {
    let response = validate("$a[0] + $a", vec![vector("$a", &[1.0, 2.0])], vec![]);
    assert!(!response.is_valid);
    assert_eq!(
        response.error.as_deref(),
        Some("Variable 'a' is used both with and without an index.")
    );
}

#[test]
fn test_if_with_comparison() {
    let response = validate(
        "if($t > #max, 1, 0)",
        vec![scalar("$t", 50.0)],
        vec![constant("#max", 100.0)],
    );
    assert!(response.is_valid);
    assert_eq!(response.result, Some(0.0));
}

#[test]
fn test_incomplete_formula_names_eof() {
    let response = validate("5 + ", vec![], vec![]);
    assert!(!response.is_valid);
    assert_eq!(
        response.error.as_deref(),
        Some("Unexpected end of formula at [line 1, col 4]")
    );
}

#[test]
fn test_sqrt() {
    let response = validate("sqrt(16)", vec![], vec![]);
    assert!(response.is_valid);
    assert_eq!(response.result, Some(4.0));
}

#[test]
fn test_division_by_zero() {
    let response = validate("1 / 0", vec![], vec![]);
    assert!(!response.is_valid);
    assert!(response.error.unwrap().contains("infinity"));
}

#[test]
fn test_nan_result() {
    for formula in ["0 / 0", "ln(-1)", "sqrt(-1)"] {
        let response = validate(formula, vec![], vec![]);
        assert!(!response.is_valid, "{} should fail", formula);
        assert_eq!(
            response.error.as_deref(),
            Some("Result is not a real number (NaN)"),
            "{}",
            formula
        );
    }
}

#[test]
fn test_empty_formula() {
    for formula in ["", "   ", "\t\n"] {
        let response = validate(formula, vec![], vec![]);
        assert!(!response.is_valid);
        assert_eq!(response.error.as_deref(), Some("Formula cannot be empty"));
    }
}

#[test]
fn test_formula_too_large() {
    let formula = "1+".repeat(6000) + "1";
    let response = validate(&formula, vec![], vec![]);
    assert!(!response.is_valid);
    assert_eq!(response.error.as_deref(), Some("Formula too large"));
}

#[test]
fn test_undefined_variable() {
    let response = validate("$Missing + 1", vec![], vec![]);
    assert!(!response.is_valid);
    assert_eq!(response.error.as_deref(), Some("Undefined variable: $Missing"));
}

#[test]
fn test_undefined_constant() {
    let response = validate("#nope", vec![], vec![]);
    assert!(!response.is_valid);
    assert_eq!(response.error.as_deref(), Some("Undefined constant: #nope"));
}

#[test]
fn test_vector_without_index() {
    let response = validate("$temps + 1", vec![vector("$temps", &[1.0])], vec![]);
    assert!(!response.is_valid);
    assert_eq!(
        response.error.as_deref(),
        Some("Variable 'temps' is non-scalar. Use an index like '$temps[i]'.")
    );
}

#[test]
fn test_index_boundaries() {
    let temps = vector("$temps", &[10.0, 20.0, 30.0]);
    // Last element is fine.
    let response = validate("$temps[2]", vec![temps.clone()], vec![]);
    assert_eq!(response.result, Some(30.0));
    // Index == length is out of range.
    let response = validate("$temps[3]", vec![temps], vec![]);
    assert_eq!(
        response.error.as_deref(),
        Some("Index 3 is out of range for variable 'temps'.")
    );
}

#[test]
fn test_power_left_associativity() {
    let response = validate("2^3^2", vec![], vec![]);
    assert_eq!(response.result, Some(64.0));
}

#[test]
fn test_duplicate_variable() {
    let response = validate(
        "$a",
        vec![scalar("$a", 1.0), scalar("$A", 2.0)],
        vec![],
    );
    assert!(!response.is_valid);
    assert_eq!(response.error.as_deref(), Some("Duplicate variable: $A"));
}

#[test]
fn test_predefined_constants_available() {
    let response = validate("#pi", vec![], vec![]);
    assert_eq!(response.result, Some(std::f64::consts::PI));
}

#[test]
fn test_request_constant_shadows_predefined() {
    let response = validate("#pi", vec![], vec![constant("#pi", 3.0)]);
    assert_eq!(response.result, Some(3.0));
}

#[test]
fn test_unknown_function() {
    let response = validate("frobnicate(1)", vec![], vec![]);
    assert_eq!(response.error.as_deref(), Some("Unknown function: frobnicate"));
}

#[test]
fn test_arity_violation() {
    let response = validate("sqrt(1, 2)", vec![], vec![]);
    assert_eq!(response.error.as_deref(), Some("Function expects 1 argument(s)."));
}

#[test]
fn test_conversion_failure_message() {
    let response = validate(
        "$d.kg",
        vec![scalar_with_unit("$d", 1.0, "meter")],
        vec![],
    );
    assert_eq!(
        response.error.as_deref(),
        Some("Cannot convert variable 'd' from 'meter' to 'kg'.")
    );
}

#[test]
fn test_self_conversion_of_undeclared_alias() {
    // The unit tag matches the declared unit textually, so conversion is
    // the identity even though the alias is not in the catalog.
    let response = validate(
        "$x.widgets",
        vec![scalar_with_unit("$x", 7.0, "widgets")],
        vec![],
    );
    assert!(response.is_valid);
    assert_eq!(response.result, Some(7.0));
}

#[test]
fn test_evaluated_formula_is_trimmed_input() {
    let response = validate("  1 + 1  ", vec![], vec![]);
    assert_eq!(response.evaluated_formula.as_deref(), Some("1 + 1"));
}

#[test]
fn test_input_order_independence() {
    let formula = "$a + $b * #k";
    let forward = validate(
        formula,
        vec![scalar("$a", 1.0), scalar("$b", 2.0)],
        vec![constant("#k", 3.0), constant("#unused", 9.0)],
    );
    let reversed = validate(
        formula,
        vec![scalar("$b", 2.0), scalar("$a", 1.0)],
        vec![constant("#unused", 9.0), constant("#k", 3.0)],
    );
    assert_eq!(forward, reversed);
    assert_eq!(forward.result, Some(7.0));
}
