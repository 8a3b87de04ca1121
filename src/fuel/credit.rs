//! Credit generation from delivered energy and carbon-intensity reduction.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{Credits, Dge};

/// Credits are denominated in metric tonnes; CI × energy is in grams.
const GRAMS_PER_TONNE: f64 = 1_000_000.0;

/// Certified carbon intensity for a single fuel pathway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FuelIntensity {
    /// Fuel name, matching a fuel table entry.
    pub fuel: String,
    /// Carbon intensity (gCO2e/MJ).
    pub ci: f64,
}

/// Constants of the credit-generation formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarbonIntensity {
    /// Regulatory benchmark CI for diesel (gCO2e/MJ).
    pub benchmark_ci: f64,
    /// CI applied to any fuel without its own entry in `fuel_ci` (gCO2e/MJ).
    pub renewable_ci: f64,
    /// Energy content of one DGE (MJ).
    pub energy_density_mj: f64,
    /// Per-fuel CI overrides.
    pub fuel_ci: Vec<FuelIntensity>,
}

impl Default for CarbonIntensity {
    fn default() -> Self {
        Self {
            benchmark_ci: 100.45,
            renewable_ci: 30.0,
            energy_density_mj: 134.47,
            fuel_ci: Vec::new(),
        }
    }
}

/// Converts energy quantities into a credit count.
///
/// # Examples
///
/// ```
/// use fuel_credit_sim::fuel::{CreditEstimator, Dge};
///
/// let credits = CreditEstimator::default().estimate_credits(Dge(1000.0));
/// assert!((credits.value() - 9.4734).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CreditEstimator {
    params: CarbonIntensity,
}

impl CreditEstimator {
    /// Creates an estimator with explicit formula constants.
    pub fn new(params: CarbonIntensity) -> Self {
        Self { params }
    }

    /// Estimates credits for `energy` using the default renewable CI.
    ///
    /// `credits = (benchmark_ci - renewable_ci) * energy * density / 1e6`
    pub fn estimate_credits(&self, energy: Dge) -> Credits {
        self.compute(energy, self.params.renewable_ci)
    }

    /// Estimates credits for `energy` delivered as `fuel`.
    ///
    /// Uses the fuel's entry in `fuel_ci` when present, otherwise the
    /// default renewable CI, in which case the result equals
    /// [`CreditEstimator::estimate_credits`].
    pub fn estimate_credits_for(&self, fuel: &str, energy: Dge) -> Credits {
        self.compute(energy, self.fuel_ci(fuel))
    }

    /// Carbon intensity used for `fuel`.
    pub fn fuel_ci(&self, fuel: &str) -> f64 {
        self.params
            .fuel_ci
            .iter()
            .find(|f| f.fuel == fuel)
            .map_or(self.params.renewable_ci, |f| f.ci)
    }

    /// Formula constants in use.
    pub fn params(&self) -> &CarbonIntensity {
        &self.params
    }

    fn compute(&self, energy: Dge, fuel_ci: f64) -> Credits {
        let energy_mj = energy.value() * self.params.energy_density_mj;
        let ci_delta = self.params.benchmark_ci - fuel_ci;
        let credits = Credits(ci_delta * energy_mj / GRAMS_PER_TONNE);
        debug!(
            dge = energy.value(),
            fuel_ci,
            credits = credits.value(),
            "estimated credits"
        );
        credits
    }
}
