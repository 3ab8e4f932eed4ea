// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Unit alias catalog and conversion for mensura formulas.
//!
//! Every recognized alias (case-insensitive) maps to a canonical unit
//! inside a quantity category. Conversion pivots through the category's
//! base unit as `base = value * scale + offset`; ratio units have a zero
//! offset, temperature scales are affine.
//!
//! This is deliberately not full dimensional analysis: only conversion
//! between aliases of the same declared category is supported, and unit
//! algebra (`m/s`, `kg*m`) does not exist in the surface language.
//!
//! # Self-conversion escape hatch
//!
//! `try_convert(v, a, a)` is the identity even when `a` is unknown to
//! the catalog, but only when the two aliases are textually equal
//! (case-insensitive). The surface DSL relies on this for unitless
//! passthrough; typos between two distinct unknown aliases still fail.

mod catalog;

pub use catalog::{UnitEntry, UNIT_TABLE};

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// Physical quantity category; conversion is defined within a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quantity {
    Length,
    Mass,
    Duration,
    Temperature,
    ElectricCurrent,
    ElectricPotential,
    ElectricResistance,
    Volume,
    Pressure,
    Force,
    Energy,
    Power,
}

/// Conversion failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The alias is not present in the catalog.
    #[error("unknown unit alias '{0}'")]
    UnknownAlias(String),

    /// Both aliases are known but belong to different categories.
    #[error("cannot convert between {from:?} and {to:?}")]
    QuantityMismatch { from: Quantity, to: Quantity },
}

/// A resolved unit: canonical name, category, and base-unit mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDef {
    /// Canonical (pivot) name of this unit, e.g. `km` for `kilometre`.
    pub canonical: &'static str,
    /// Quantity category the unit belongs to.
    pub quantity: Quantity,
    /// Multiplicative factor to the category base unit.
    pub scale: f64,
    /// Additive offset to the category base unit (temperature only).
    pub offset: f64,
}

impl UnitDef {
    /// Convert a value in this unit into the category base unit.
    fn to_base(&self, value: f64) -> f64 {
        value * self.scale + self.offset
    }

    /// Convert a value in the category base unit into this unit.
    fn from_base(&self, base: f64) -> f64 {
        (base - self.offset) / self.scale
    }
}

/// Immutable catalog of unit aliases.
///
/// Built once at process start and shared read-only across requests.
#[derive(Debug, Clone)]
pub struct UnitCatalog {
    aliases: HashMap<&'static str, UnitDef>,
}

impl UnitCatalog {
    /// Build the catalog with the built-in unit families.
    pub fn builtin() -> Self {
        let mut aliases = HashMap::new();
        for entry in UNIT_TABLE {
            let def = UnitDef {
                canonical: entry.canonical,
                quantity: entry.quantity,
                scale: entry.scale,
                offset: entry.offset,
            };
            for alias in entry.aliases {
                let previous = aliases.insert(*alias, def);
                debug_assert!(previous.is_none(), "duplicate unit alias '{}'", alias);
            }
        }
        Self { aliases }
    }

    /// Look up an alias (case-insensitive).
    pub fn lookup(&self, alias: &str) -> Option<&UnitDef> {
        self.aliases.get(alias.to_ascii_lowercase().as_str())
    }

    /// Whether the catalog recognizes an alias.
    pub fn contains(&self, alias: &str) -> bool {
        self.lookup(alias).is_some()
    }

    /// Convert `value` from one alias to another.
    ///
    /// Textually equal aliases (case-insensitive) are the identity even
    /// when unknown; otherwise both aliases must resolve to the same
    /// quantity category.
    pub fn try_convert(&self, value: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
        if from.eq_ignore_ascii_case(to) {
            return Ok(value);
        }
        let from_def = self
            .lookup(from)
            .ok_or_else(|| ConversionError::UnknownAlias(from.to_string()))?;
        let to_def = self
            .lookup(to)
            .ok_or_else(|| ConversionError::UnknownAlias(to.to_string()))?;
        if from_def.quantity != to_def.quantity {
            return Err(ConversionError::QuantityMismatch {
                from: from_def.quantity,
                to: to_def.quantity,
            });
        }
        // Identical pivots differ only in spelling (m vs meter); skip the
        // base round-trip so the identity stays exact.
        if from_def.canonical == to_def.canonical {
            return Ok(value);
        }
        Ok(to_def.from_base(from_def.to_base(value)))
    }

    /// Aliases grouped by quantity, in catalog declaration order.
    ///
    /// Powers the unit listing endpoint; the grouping is stable across
    /// processes because it follows the static table.
    pub fn by_quantity(&self) -> IndexMap<Quantity, Vec<&'static str>> {
        let mut groups: IndexMap<Quantity, Vec<&'static str>> = IndexMap::new();
        for entry in UNIT_TABLE {
            let group = groups.entry(entry.quantity).or_default();
            group.extend(entry.aliases.iter().copied());
        }
        groups
    }
}

impl Default for UnitCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
