//! Fuel normalization and credit estimation.

/// Carbon-intensity credit formula.
pub mod credit;
/// Fuel amount to DGE conversion.
pub mod normalizer;
pub mod table;
pub mod types;

pub use credit::{CarbonIntensity, CreditEstimator, FuelIntensity};
pub use normalizer::FuelNormalizer;
pub use table::{FuelFactor, FuelTable};
pub use types::{Credits, Dge};
