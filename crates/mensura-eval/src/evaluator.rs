//! Tree-walking evaluator.
//!
//! Produces a double from a parsed formula, the normalized measured
//! values, the merged constants, the function registry, and the unit
//! catalog. All failures are values; the walk short-circuits on the
//! first error.
//!
//! The final NaN/infinity policy is applied by the orchestrator, not
//! here: intermediate non-finite values are legal and only the end
//! result is judged.

use crate::error::EvalError;
use crate::functions::FunctionRegistry;
use crate::value::{Measured, MeasuredKind};
use indexmap::IndexMap;
use mensura_fdl_ast::{BinaryOp, Expr, ExprKind, Suffix, UnaryOp};
use mensura_units::UnitCatalog;

/// Indices must land within this distance of a whole number.
const INDEX_TOLERANCE: f64 = 1e-9;

/// Evaluates expression trees against request-scoped symbol tables.
///
/// Holds references only; the registry and catalog are process-wide
/// immutable state, the symbol tables live for one request.
pub struct Evaluator<'a> {
    values: &'a IndexMap<String, Measured>,
    constants: &'a IndexMap<String, f64>,
    functions: &'a FunctionRegistry,
    units: &'a UnitCatalog,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator over the given symbol tables and catalogs.
    ///
    /// Both maps are keyed by normalized (lower-cased) identifier.
    pub fn new(
        values: &'a IndexMap<String, Measured>,
        constants: &'a IndexMap<String, f64>,
        functions: &'a FunctionRegistry,
        units: &'a UnitCatalog,
    ) -> Self {
        Self {
            values,
            constants,
            functions,
            units,
        }
    }

    /// Evaluate an expression tree.
    pub fn eval(&self, expr: &Expr) -> Result<f64, EvalError> {
        match &expr.kind {
            ExprKind::Number(value) => Ok(*value),
            ExprKind::Variable { name, suffixes } => self.eval_variable(name, suffixes),
            ExprKind::Constant { name } => self
                .constants
                .get(name.to_ascii_lowercase().as_str())
                .copied()
                .ok_or_else(|| EvalError::UndefinedConstant(name.clone())),
            ExprKind::Call { name, args } => {
                let mut evaluated = Vec::with_capacity(args.len());
                for arg in args {
                    evaluated.push(self.eval(arg)?);
                }
                let function = self
                    .functions
                    .get(name)
                    .ok_or_else(|| EvalError::UnknownFunction(name.clone()))?;
                function.invoke(&evaluated)
            }
            ExprKind::Unary { op, operand } => {
                let value = self.eval(operand)?;
                Ok(match op {
                    UnaryOp::Plus => value,
                    UnaryOp::Neg => -value,
                })
            }
            ExprKind::Binary { op, left, right } => {
                let lhs = self.eval(left)?;
                let rhs = self.eval(right)?;
                Ok(apply_binary(*op, lhs, rhs))
            }
        }
    }

    /// Resolve a variable reference and apply its suffixes.
    fn eval_variable(&self, name: &str, suffixes: &[Suffix]) -> Result<f64, EvalError> {
        let measured = self
            .values
            .get(name.to_ascii_lowercase().as_str())
            .ok_or_else(|| EvalError::UndefinedVariable(name.to_string()))?;

        // At most one index and one unit tag across all suffixes.
        let mut index_expr: Option<&Expr> = None;
        let mut unit_tag: Option<&str> = None;
        for suffix in suffixes {
            match suffix {
                Suffix::Unit(tag) => {
                    if unit_tag.replace(tag).is_some() {
                        return Err(EvalError::MultipleSuffixes(name.to_string()));
                    }
                }
                Suffix::Index(expr) => {
                    if index_expr.replace(expr).is_some() {
                        return Err(EvalError::MultipleSuffixes(name.to_string()));
                    }
                }
            }
        }

        let current = match &measured.kind {
            MeasuredKind::Vector(elements) => {
                let Some(index_expr) = index_expr else {
                    return Err(EvalError::VectorWithoutIndex {
                        name: name.to_string(),
                    });
                };
                let raw = self.eval(index_expr)?;
                if !raw.is_finite() {
                    return Err(EvalError::IndexNotFinite(name.to_string()));
                }
                let rounded = raw.round();
                if (raw - rounded).abs() > INDEX_TOLERANCE {
                    return Err(EvalError::IndexNotInteger(name.to_string()));
                }
                if rounded < 0.0 {
                    return Err(EvalError::IndexNegative(name.to_string()));
                }
                let index = rounded as usize;
                if index >= elements.len() {
                    return Err(EvalError::IndexOutOfRange {
                        name: name.to_string(),
                        index: rounded,
                    });
                }
                elements[index]
            }
            MeasuredKind::Scalar(value) => {
                if index_expr.is_some() {
                    return Err(EvalError::IndexedScalar(name.to_string()));
                }
                *value
            }
        };

        // Without a unit tag the stored value is used as-is, whatever
        // the declared unit says.
        let Some(target) = unit_tag else {
            return Ok(current);
        };
        let declared = measured
            .unit
            .as_deref()
            .filter(|unit| !unit.is_empty())
            .ok_or_else(|| EvalError::MissingUnit(name.to_string()))?;
        self.units
            .try_convert(current, declared, target)
            .map_err(|_| EvalError::UnitConversion {
                name: name.to_string(),
                from: declared.to_string(),
                to: target.to_string(),
            })
    }
}

/// Apply a binary operator under IEEE semantics.
///
/// Comparisons yield 1.0/0.0 so they chain left-associatively by
/// reduction; equality uses machine epsilon, preserved from the source
/// system.
fn apply_binary(op: BinaryOp, lhs: f64, rhs: f64) -> f64 {
    match op {
        BinaryOp::Add => lhs + rhs,
        BinaryOp::Sub => lhs - rhs,
        BinaryOp::Mul => lhs * rhs,
        BinaryOp::Div => lhs / rhs,
        BinaryOp::Rem => lhs % rhs,
        BinaryOp::Pow => lhs.powf(rhs),
        BinaryOp::Lt => bool_value(lhs < rhs),
        BinaryOp::Le => bool_value(lhs <= rhs),
        BinaryOp::Gt => bool_value(lhs > rhs),
        BinaryOp::Ge => bool_value(lhs >= rhs),
        BinaryOp::Eq => bool_value((lhs - rhs).abs() < f64::EPSILON),
        BinaryOp::Ne => bool_value((lhs - rhs).abs() >= f64::EPSILON),
    }
}

fn bool_value(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Measured;
    use mensura_fdl_parser::parse;

    fn eval_with(
        source: &str,
        values: &[(&str, Measured)],
        constants: &[(&str, f64)],
    ) -> Result<f64, EvalError> {
        let values: IndexMap<String, Measured> = values
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        let constants: IndexMap<String, f64> =
            constants.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        let functions = FunctionRegistry::builtin();
        let units = UnitCatalog::builtin();
        let expr = parse(source).unwrap();
        Evaluator::new(&values, &constants, &functions, &units).eval(&expr)
    }

    fn eval(source: &str) -> Result<f64, EvalError> {
        eval_with(source, &[], &[])
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("2 + 2").unwrap(), 4.0);
        assert_eq!(eval("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(eval("10 % 3").unwrap(), 1.0);
        assert_eq!(eval("-7 % 3").unwrap(), -1.0);
    }

    #[test]
    fn test_power_left_associative() {
        assert_eq!(eval("2^3^2").unwrap(), 64.0);
        assert_eq!(eval("2^(3^2)").unwrap(), 512.0);
    }

    #[test]
    fn test_unary_inside_power() {
        assert_eq!(eval("-2^2").unwrap(), 4.0);
        assert_eq!(eval("-(2^2)").unwrap(), -4.0);
    }

    #[test]
    fn test_comparison_chain_reduces() {
        // 1 < 2 < 3 → (1<2) < 3 → 1 < 3 → 1
        assert_eq!(eval("1 < 2 < 3").unwrap(), 1.0);
        // 3 > 2 > 1 → (3>2) > 1 → 1 > 1 → 0
        assert_eq!(eval("3 > 2 > 1").unwrap(), 0.0);
    }

    #[test]
    fn test_epsilon_equality() {
        assert_eq!(eval("1 == 1").unwrap(), 1.0);
        assert_eq!(eval("1 == 1.5").unwrap(), 0.0);
        // The representation error of 0.1 + 0.2 is under machine epsilon,
        // so the epsilon-equality rule calls these equal.
        assert_eq!(eval("0.1 + 0.2 == 0.3").unwrap(), 1.0);
        assert_eq!(eval("1000000.1 == 1000000.2").unwrap(), 0.0);
    }

    #[test]
    fn test_scalar_variable() {
        let vars = [("t", Measured::scalar(25.5))];
        assert_eq!(eval_with("$t * 2", &vars, &[]).unwrap(), 51.0);
    }

    #[test]
    fn test_variable_lookup_case_insensitive() {
        let vars = [("temp", Measured::scalar(5.0))];
        assert_eq!(eval_with("$TEMP + $Temp", &vars, &[]).unwrap(), 10.0);
    }

    #[test]
    fn test_undefined_variable() {
        let err = eval("$missing").unwrap_err();
        assert_eq!(err.to_string(), "Undefined variable: $missing");
    }

    #[test]
    fn test_constants() {
        let consts = [("conversion_factor", 1.8)];
        let vars = [("temperature", Measured::scalar(25.5))];
        let result = eval_with(
            "($temperature * #conversion_factor) + 32",
            &vars,
            &consts,
        )
        .unwrap();
        assert!((result - 77.9).abs() < 1e-12);
    }

    #[test]
    fn test_undefined_constant() {
        let err = eval("#nope").unwrap_err();
        assert_eq!(err.to_string(), "Undefined constant: #nope");
    }

    #[test]
    fn test_vector_indexing() {
        let vars = [("temps", Measured::vector(vec![10.0, 20.0, 30.0]))];
        assert_eq!(
            eval_with("$temps[1] + $temps[2]", &vars, &[]).unwrap(),
            50.0
        );
        assert_eq!(eval_with("$temps[0]", &vars, &[]).unwrap(), 10.0);
    }

    #[test]
    fn test_index_is_an_expression() {
        let vars = [("v", Measured::vector(vec![10.0, 20.0, 30.0]))];
        let consts = [("i", 1.0)];
        assert_eq!(eval_with("$v[#i + 1]", &vars, &consts).unwrap(), 30.0);
    }

    #[test]
    fn test_index_tolerance() {
        let vars = [("v", Measured::vector(vec![10.0, 20.0]))];
        // Within 1e-9 of a whole number is accepted.
        assert_eq!(eval_with("$v[0.9999999999]", &vars, &[]).unwrap(), 20.0);
        let err = eval_with("$v[0.5]", &vars, &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Index for variable 'v' must be an integer."
        );
    }

    #[test]
    fn test_index_out_of_range() {
        let vars = [("v", Measured::vector(vec![10.0, 20.0]))];
        let err = eval_with("$v[2]", &vars, &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Index 2 is out of range for variable 'v'."
        );
    }

    #[test]
    fn test_index_negative() {
        let vars = [("v", Measured::vector(vec![10.0, 20.0]))];
        let err = eval_with("$v[-1]", &vars, &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Index for variable 'v' must be non-negative."
        );
    }

    #[test]
    fn test_index_not_finite() {
        let vars = [("v", Measured::vector(vec![10.0, 20.0]))];
        let err = eval_with("$v[1/0]", &vars, &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Index for variable 'v' must evaluate to a finite number."
        );
    }

    #[test]
    fn test_index_on_scalar() {
        let vars = [("a", Measured::scalar(5.0))];
        let err = eval_with("$a[0]", &vars, &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Variable 'a' is scalar but is used with an index."
        );
    }

    #[test]
    fn test_vector_without_index() {
        let vars = [("v", Measured::vector(vec![1.0]))];
        let err = eval_with("$v + 1", &vars, &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Variable 'v' is non-scalar. Use an index like '$v[i]'."
        );
    }

    #[test]
    fn test_multiple_indices_rejected() {
        let vars = [("v", Measured::vector(vec![1.0, 2.0]))];
        let err = eval_with("$v[0][1]", &vars, &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Variable 'v' is used with multiple indices/units"
        );
    }

    #[test]
    fn test_unit_conversion() {
        let vars = [("d", Measured::scalar(1000.0).with_unit("meter"))];
        assert_eq!(eval_with("$d.km", &vars, &[]).unwrap(), 1.0);
        // Without a tag the raw value passes through.
        assert_eq!(eval_with("$d", &vars, &[]).unwrap(), 1000.0);
    }

    #[test]
    fn test_unit_tag_without_declared_unit() {
        let vars = [("d", Measured::scalar(1000.0))];
        let err = eval_with("$d.km", &vars, &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Variable 'd' has no unit defined but is used with a unit suffix."
        );
    }

    #[test]
    fn test_incompatible_unit_conversion() {
        let vars = [("d", Measured::scalar(10.0).with_unit("kg"))];
        let err = eval_with("$d.km", &vars, &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot convert variable 'd' from 'kg' to 'km'."
        );
    }

    #[test]
    fn test_indexed_element_converts() {
        let vars = [(
            "temps",
            Measured::vector(vec![0.0, 100.0]).with_unit("celsius"),
        )];
        let result = eval_with("$temps[1].fahrenheit", &vars, &[]).unwrap();
        assert!((result - 212.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_function() {
        let err = eval("nosuch(1)").unwrap_err();
        assert_eq!(err.to_string(), "Unknown function: nosuch");
    }

    #[test]
    fn test_function_dispatch() {
        assert_eq!(eval("sqrt(16)").unwrap(), 4.0);
        assert_eq!(eval("if(0, 1, 2)").unwrap(), 2.0);
        assert_eq!(eval("min(3, 1, 2)").unwrap(), 1.0);
    }

    #[test]
    fn test_intermediate_infinity_is_not_an_error() {
        // Only the final result is judged; 1/0 > 0 reduces to 1.
        assert_eq!(eval("(1/0) > 0").unwrap(), 1.0);
    }

    #[test]
    fn test_deterministic() {
        let expr = parse("2 * round(3.7) + sqrt(81)").unwrap();
        let values = IndexMap::new();
        let constants = IndexMap::new();
        let functions = FunctionRegistry::builtin();
        let units = UnitCatalog::builtin();
        let evaluator = Evaluator::new(&values, &constants, &functions, &units);
        assert_eq!(evaluator.eval(&expr).unwrap(), evaluator.eval(&expr).unwrap());
    }
}
