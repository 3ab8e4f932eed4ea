//! Measured-value representation.
//!
//! The request payload allows either `value` (scalar) or `values`
//! (vector); the ambiguous middle ground is rejected at ingest, so by
//! the time evaluation runs every measured value is exactly one of the
//! two.

/// A normalized measured value as the evaluator sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct Measured {
    pub kind: MeasuredKind,
    /// Declared unit alias; `None` means unitless. Never the empty
    /// string; ingest normalizes blank units away.
    pub unit: Option<String>,
}

/// Scalar or vector payload of a measured value.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasuredKind {
    Scalar(f64),
    /// Always non-empty; zero-based indexing.
    Vector(Vec<f64>),
}

impl Measured {
    /// A unitless scalar.
    pub fn scalar(value: f64) -> Self {
        Self {
            kind: MeasuredKind::Scalar(value),
            unit: None,
        }
    }

    /// A unitless vector.
    pub fn vector(values: Vec<f64>) -> Self {
        Self {
            kind: MeasuredKind::Vector(values),
            unit: None,
        }
    }

    /// Attach a declared unit alias.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Whether this value is a vector.
    pub fn is_vector(&self) -> bool {
        matches!(self.kind, MeasuredKind::Vector(_))
    }
}
