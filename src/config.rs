//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::fuel::{CarbonIntensity, FuelFactor, FuelTable};
use crate::market::ParseMode;
use crate::projection::{ProjectionHorizon, ProjectionParams};

/// Top-level scenario configuration parsed from TOML.
///
/// All sections have defaults matching the `diesel_fleet` preset. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::diesel_fleet`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Fuel selection and quantity.
    #[serde(default)]
    pub fuel: FuelConfig,
    /// Credit formula constants and per-fuel carbon intensities.
    #[serde(default)]
    pub credit: CarbonIntensity,
    /// Historical price source.
    #[serde(default)]
    pub history: HistoryConfig,
    /// Projection horizon, seed and band parameters.
    #[serde(default)]
    pub projection: ProjectionConfig,
    /// Replacement fuel table; the standard table is used when empty.
    #[serde(default)]
    pub fuel_table: Vec<FuelFactor>,
}

/// Fuel selection and quantity.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FuelConfig {
    /// Fuel name, must be in the active fuel table.
    pub name: String,
    /// Quantity in the fuel's native unit (must be >= 0).
    pub amount: f64,
}

impl Default for FuelConfig {
    fn default() -> Self {
        Self {
            name: "Diesel".to_string(),
            amount: 1000.0,
        }
    }
}

/// Historical price source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    /// Path to the weekly price table.
    pub path: Option<PathBuf>,
    /// Single-character field delimiter.
    pub delimiter: String,
    /// `"strict"` rejects malformed rows, `"lenient"` drops them.
    pub mode: ParseMode,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: None,
            delimiter: ",".to_string(),
            mode: ParseMode::Strict,
        }
    }
}

impl HistoryConfig {
    /// Delimiter as a byte, `None` unless it is exactly one ASCII character.
    pub fn delimiter_byte(&self) -> Option<u8> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Some(*b),
            _ => None,
        }
    }
}

/// Projection horizon, seed and band parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectionConfig {
    /// Horizon in years: 1, 5 or 10.
    pub horizon_years: u32,
    /// Fixed seed for reproducible projections; fresh entropy when absent.
    pub seed: Option<u64>,
    /// Compound monthly growth rate.
    pub monthly_growth: f64,
    /// Width of the uniform noise factor.
    pub noise_amplitude: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        let params = ProjectionParams::default();
        Self {
            horizon_years: 1,
            seed: None,
            monthly_growth: params.monthly_growth,
            noise_amplitude: params.noise_amplitude,
        }
    }
}

impl ProjectionConfig {
    /// Selected horizon, `None` if `horizon_years` is not selectable.
    pub fn horizon(&self) -> Option<ProjectionHorizon> {
        ProjectionHorizon::from_years(self.horizon_years)
    }

    pub fn params(&self) -> ProjectionParams {
        ProjectionParams {
            monthly_growth: self.monthly_growth,
            noise_amplitude: self.noise_amplitude,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"projection.horizon_years"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ScenarioConfig {
    /// Returns the default scenario: 1000 gallons of diesel over one year.
    pub fn diesel_fleet() -> Self {
        Self::default()
    }

    /// Returns a renewable diesel scenario with a ten-year horizon.
    pub fn renewable_diesel() -> Self {
        Self {
            fuel: FuelConfig {
                name: "Renewable Diesel (R100)".to_string(),
                amount: 50_000.0,
            },
            projection: ProjectionConfig {
                horizon_years: 10,
                ..ProjectionConfig::default()
            },
            ..Self::default()
        }
    }

    /// Returns an electric fleet scenario (amount in kWh) over five years.
    pub fn ev_fleet() -> Self {
        Self {
            fuel: FuelConfig {
                name: "Electricity".to_string(),
                amount: 250_000.0,
            },
            projection: ProjectionConfig {
                horizon_years: 5,
                ..ProjectionConfig::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    ///
    /// Presets fix the fuel, amount and horizon only. They carry no
    /// `history.path`, no per-fuel CI overrides and no seed, so a preset run
    /// needs a price history supplied separately (`--history`).
    pub const PRESETS: &[&str] = &["diesel_fleet", "renewable_diesel", "ev_fleet"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "diesel_fleet" => Ok(Self::diesel_fleet()),
            "renewable_diesel" => Ok(Self::renewable_diesel()),
            "ev_fleet" => Ok(Self::ev_fleet()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// A relative `history.path` is resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        let mut cfg = Self::from_toml_str(&content)?;
        if let (Some(history), Some(dir)) = (cfg.history.path.as_mut(), path.parent()) {
            if history.is_relative() {
                *history = dir.join(&*history);
            }
        }
        Ok(cfg)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Builds the active fuel table: the configured one, or the standard table.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the configured table is invalid.
    pub fn fuel_table(&self) -> Result<FuelTable, ConfigError> {
        if self.fuel_table.is_empty() {
            return Ok(FuelTable::standard());
        }
        FuelTable::new(self.fuel_table.clone())
            .map_err(|e| ConfigError::new("fuel_table", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let table = match self.fuel_table() {
            Ok(table) => Some(table),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        let fuel = &self.fuel;
        if let Some(table) = &table {
            if !table.contains(&fuel.name) {
                errors.push(ConfigError::new(
                    "fuel.name",
                    format!("unknown fuel \"{}\"", fuel.name),
                ));
            }
        }
        if !fuel.amount.is_finite() || fuel.amount < 0.0 {
            errors.push(ConfigError::new("fuel.amount", "must be a finite number >= 0"));
        }

        let c = &self.credit;
        if !c.benchmark_ci.is_finite() {
            errors.push(ConfigError::new("credit.benchmark_ci", "must be finite"));
        }
        if !c.renewable_ci.is_finite() {
            errors.push(ConfigError::new("credit.renewable_ci", "must be finite"));
        }
        if !(c.energy_density_mj.is_finite() && c.energy_density_mj > 0.0) {
            errors.push(ConfigError::new("credit.energy_density_mj", "must be > 0"));
        }
        for (i, entry) in c.fuel_ci.iter().enumerate() {
            if let Some(table) = &table {
                if !table.contains(&entry.fuel) {
                    errors.push(ConfigError::new(
                        format!("credit.fuel_ci[{i}].fuel"),
                        format!("unknown fuel \"{}\"", entry.fuel),
                    ));
                }
            }
            if !entry.ci.is_finite() {
                errors.push(ConfigError::new(format!("credit.fuel_ci[{i}].ci"), "must be finite"));
            }
        }

        if self.history.delimiter_byte().is_none() {
            errors.push(ConfigError::new(
                "history.delimiter",
                format!(
                    "must be a single ASCII character, got \"{}\"",
                    self.history.delimiter
                ),
            ));
        }

        let p = &self.projection;
        if p.horizon().is_none() {
            errors.push(ConfigError::new(
                "projection.horizon_years",
                format!("must be 1, 5 or 10, got {}", p.horizon_years),
            ));
        }
        if !(p.monthly_growth.is_finite() && p.monthly_growth > -1.0) {
            errors.push(ConfigError::new("projection.monthly_growth", "must be > -1.0"));
        }
        if !(0.0..2.0).contains(&p.noise_amplitude) {
            errors.push(ConfigError::new(
                "projection.noise_amplitude",
                "must be in [0.0, 2.0)",
            ));
        }

        errors
    }
}
