// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Symbol usage analysis for mensura formulas.
//!
//! A single read-only pass over the expression tree that records which
//! variables and constants a formula references and how: with a unit
//! suffix, with an index, or bare. The semantic checks that run before
//! evaluation are driven entirely by this record.
//!
//! The pass is idempotent, never mutates the tree, and deliberately
//! knows nothing about the function registry or the unit catalog.
//! Symbols are keyed by lower-cased identifier; the casing of the first
//! occurrence is kept for error messages.

use indexmap::IndexMap;
use mensura_fdl_ast::{Expr, ExprKind, Suffix};

/// How a single variable is used across the whole formula.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableUse {
    /// Casing of the first occurrence, for error messages.
    pub display: String,
    /// Referenced with a `.unit` suffix at least once.
    pub with_unit: bool,
    /// Referenced with an `[index]` suffix at least once.
    pub with_index: bool,
    /// Referenced without any index at least once.
    pub without_index: bool,
}

/// Symbol usage record for one formula.
///
/// Maps are keyed by normalized (lower-cased) identifier and preserve
/// first-reference order, which makes "first failure wins" semantic
/// checks deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolUsage {
    /// Variables referenced, in first-reference order.
    pub variables: IndexMap<String, VariableUse>,
    /// Constants referenced: normalized id → first-seen casing.
    pub constants: IndexMap<String, String>,
}

/// Analyze a parsed formula and produce its symbol usage record.
pub fn analyze(expr: &Expr) -> SymbolUsage {
    let mut usage = SymbolUsage::default();
    walk(expr, &mut usage);
    usage
}

fn walk(expr: &Expr, usage: &mut SymbolUsage) {
    match &expr.kind {
        ExprKind::Number(_) => {}
        ExprKind::Variable { name, suffixes } => {
            let entry = usage
                .variables
                .entry(name.to_ascii_lowercase())
                .or_insert_with(|| VariableUse {
                    display: name.clone(),
                    ..VariableUse::default()
                });

            let mut occurrence_indexed = false;
            let mut occurrence_unit = false;
            for suffix in suffixes {
                match suffix {
                    Suffix::Unit(_) => occurrence_unit = true,
                    Suffix::Index(_) => occurrence_indexed = true,
                }
            }
            entry.with_unit |= occurrence_unit;
            entry.with_index |= occurrence_indexed;
            entry.without_index |= !occurrence_indexed;

            // Index expressions may reference further symbols.
            for suffix in suffixes {
                if let Suffix::Index(index) = suffix {
                    walk(index, usage);
                }
            }
        }
        ExprKind::Constant { name } => {
            usage
                .constants
                .entry(name.to_ascii_lowercase())
                .or_insert_with(|| name.clone());
        }
        ExprKind::Call { args, .. } => {
            for arg in args {
                walk(arg, usage);
            }
        }
        ExprKind::Unary { operand, .. } => walk(operand, usage),
        ExprKind::Binary { left, right, .. } => {
            walk(left, usage);
            walk(right, usage);
        }
    }
}
