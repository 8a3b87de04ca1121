use tracing::debug;

use super::table::FuelTable;
use super::types::Dge;
use crate::error::Result;

/// Converts fuel quantities into diesel-gallon-equivalents.
///
/// Holds the fuel table it was built with; the amount is not range-checked,
/// so callers are responsible for passing non-negative quantities.
#[derive(Debug, Clone)]
pub struct FuelNormalizer {
    table: FuelTable,
}

impl FuelNormalizer {
    /// Creates a normalizer over the given fuel table.
    pub fn new(table: FuelTable) -> Self {
        Self { table }
    }

    /// Converts `amount` units of `fuel` into DGE.
    ///
    /// # Arguments
    ///
    /// * `fuel` - Fuel name, must be a key of the table
    /// * `amount` - Quantity in the fuel's native unit (gallons, kWh, ...)
    ///
    /// # Errors
    ///
    /// Returns `CreditError::UnknownFuelType` if `fuel` is not in the table.
    pub fn normalize(&self, fuel: &str, amount: f64) -> Result<Dge> {
        let factor = self.table.factor(fuel)?;
        let dge = Dge(amount * factor);
        debug!(fuel, amount, factor, dge = dge.value(), "normalized fuel amount");
        Ok(dge)
    }

    /// The table this normalizer looks factors up in.
    pub fn table(&self) -> &FuelTable {
        &self.table
    }
}

impl Default for FuelNormalizer {
    fn default() -> Self {
        Self::new(FuelTable::standard())
    }
}
