//! Fuel energy-equivalence tables.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{CreditError, Result};

/// Name of the reference fuel every factor is expressed against.
pub const REFERENCE_FUEL: &str = "Diesel";

/// Standard conversion factors (fuel unit → DGE).
const STANDARD_FACTORS: &[(&str, f64)] = &[
    ("Diesel", 1.00),
    ("Gasoline", 0.88),
    ("Biodiesel (B100)", 0.93),
    ("Biodiesel (B20)", 0.99),
    ("Renewable Diesel (R100)", 0.96),
    ("Propane (LPG)", 0.66),
    ("Compressed Natural Gas (CNG)", 0.16),
    ("Liquefied Natural Gas (LNG)", 0.59),
    ("Ethanol (E100)", 0.61),
    ("Ethanol (E85)", 0.68),
    ("Methanol (M100)", 0.45),
    ("Hydrogen", 1.00),
    ("Electricity", 0.0266),
];

/// One row of a fuel table: a fuel name and its ratio to one DGE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FuelFactor {
    /// Fuel identifier as shown to users.
    pub name: String,
    /// Energy of one fuel unit expressed in DGE, in (0, 1].
    pub factor: f64,
}

/// Immutable lookup table of fuel conversion factors.
///
/// Entries keep their construction order so callers can present them as a
/// selector list. Once built the table is never mutated; swap in a different
/// table (e.g. for another regulatory year) by constructing a new one.
///
/// # Examples
///
/// ```
/// use fuel_credit_sim::fuel::FuelTable;
///
/// let table = FuelTable::standard();
/// assert_eq!(table.factor("Gasoline").ok(), Some(0.88));
/// assert!(table.factor("Kerosene").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelTable {
    entries: Vec<FuelFactor>,
}

impl FuelTable {
    /// Builds a table from explicit entries.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidFuelTable` if the list is empty, a name is
    /// blank or repeated, or a factor is outside (0, 1].
    pub fn new(entries: Vec<FuelFactor>) -> Result<Self> {
        if entries.is_empty() {
            return Err(CreditError::InvalidFuelTable(
                "table has no entries".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if entry.name.trim().is_empty() {
                return Err(CreditError::InvalidFuelTable(
                    "fuel name must not be blank".to_string(),
                ));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(CreditError::InvalidFuelTable(format!(
                    "duplicate fuel \"{}\"",
                    entry.name
                )));
            }
            if !(entry.factor > 0.0 && entry.factor <= 1.0) {
                return Err(CreditError::InvalidFuelTable(format!(
                    "factor for \"{}\" must be in (0, 1], got {}",
                    entry.name, entry.factor
                )));
            }
        }

        Ok(Self { entries })
    }

    /// Returns the standard thirteen-fuel table with Diesel as reference.
    pub fn standard() -> Self {
        Self {
            entries: STANDARD_FACTORS
                .iter()
                .map(|&(name, factor)| FuelFactor {
                    name: name.to_string(),
                    factor,
                })
                .collect(),
        }
    }

    /// Looks up the conversion factor for `fuel`.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::UnknownFuelType` if the fuel is not in the table.
    pub fn factor(&self, fuel: &str) -> Result<f64> {
        self.entries
            .iter()
            .find(|e| e.name == fuel)
            .map(|e| e.factor)
            .ok_or_else(|| CreditError::UnknownFuelType(fuel.to_string()))
    }

    /// Whether `fuel` is a key of this table.
    pub fn contains(&self, fuel: &str) -> bool {
        self.entries.iter().any(|e| e.name == fuel)
    }

    /// Fuel names in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// All entries in table order.
    pub fn entries(&self) -> &[FuelFactor] {
        &self.entries
    }
}

impl Default for FuelTable {
    fn default() -> Self {
        Self::standard()
    }
}
