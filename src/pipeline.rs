//! End-to-end credit estimation and revenue projection for one scenario.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

use crate::config::{ConfigError, ScenarioConfig};
use crate::error::{CreditError, Result};
use crate::fuel::{CreditEstimator, Credits, Dge, FuelNormalizer};
use crate::market::{PriceSeries, SeriesStats};
use crate::projection::{ProjectionEngine, ProjectionPoint, RevenuePoint, RevenueProjector};

/// Credit estimate for one fuel selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelEstimate {
    /// Fuel name.
    pub fuel: String,
    /// Quantity in the fuel's native unit.
    pub amount: f64,
    /// Energy delivered.
    pub dge: Dge,
    /// Carbon intensity used for this fuel.
    pub fuel_ci: f64,
    /// Credits generated.
    pub credits: Credits,
}

/// Everything computed for one scenario, ready for display or export.
#[derive(Debug, Clone, Serialize)]
pub struct CreditReport {
    /// Fuel, energy and credit scalars.
    pub estimate: FuelEstimate,
    /// Historical prices as supplied.
    pub history: PriceSeries,
    /// Summary of the historical prices.
    pub stats: SeriesStats,
    /// Projected per-credit value band, one point per month.
    pub projection: Vec<ProjectionPoint>,
    /// Projected revenue band, one row per month.
    pub revenue: Vec<RevenuePoint>,
}

impl CreditReport {
    /// Number of projected months.
    pub fn horizon_months(&self) -> usize {
        self.projection.len()
    }

    /// Sum of base-scenario revenue over the horizon.
    pub fn total_base_revenue(&self) -> f64 {
        self.revenue.iter().map(|r| r.base_revenue).sum()
    }
}

impl fmt::Display for CreditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = &self.estimate;
        let s = &self.stats;
        writeln!(f, "--- Credit Estimate ---")?;
        writeln!(f, "Fuel:                  {} ({} units)", e.fuel, e.amount)?;
        writeln!(f, "Energy:                {}", e.dge)?;
        writeln!(f, "Fuel CI:               {:.2} gCO2e/MJ", e.fuel_ci)?;
        writeln!(f, "Estimated credits:     {:.4}", e.credits.value())?;
        writeln!(f, "--- Price History ---")?;
        writeln!(f, "Observations:          {}", s.count)?;
        writeln!(f, "Latest price:          ${:.2}", s.latest)?;
        writeln!(f, "Mean / std dev:        ${:.2} / ${:.2}", s.mean, s.std_dev)?;
        writeln!(f, "Range:                 ${:.2} .. ${:.2}", s.min, s.max)?;
        writeln!(f, "--- Projection ---")?;
        writeln!(f, "Horizon:               {} months", self.horizon_months())?;
        if let Some(last) = self.revenue.last() {
            writeln!(
                f,
                "Final month value:     ${:.2} (${:.2} .. ${:.2})",
                last.base, last.pessimistic, last.optimistic
            )?;
        }
        write!(f, "Total base revenue:    ${:.2}", self.total_base_revenue())
    }
}

/// The five computation stages wired together.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    normalizer: FuelNormalizer,
    estimator: CreditEstimator,
    engine: ProjectionEngine,
    revenue: RevenueProjector,
}

impl Pipeline {
    pub fn new(
        normalizer: FuelNormalizer,
        estimator: CreditEstimator,
        engine: ProjectionEngine,
    ) -> Self {
        Self {
            normalizer,
            estimator,
            engine,
            revenue: RevenueProjector,
        }
    }

    /// Builds a pipeline from a scenario's fuel table, credit and projection settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the configured fuel table is invalid.
    pub fn from_config(cfg: &ScenarioConfig) -> std::result::Result<Self, ConfigError> {
        Ok(Self::new(
            FuelNormalizer::new(cfg.fuel_table()?),
            CreditEstimator::new(cfg.credit.clone()),
            ProjectionEngine::new(cfg.projection.params()),
        ))
    }

    pub fn normalizer(&self) -> &FuelNormalizer {
        &self.normalizer
    }

    /// Normalizes `amount` of `fuel` and estimates its credits.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::UnknownFuelType` if the fuel is not in the table.
    pub fn estimate(&self, fuel: &str, amount: f64) -> Result<FuelEstimate> {
        let dge = self.normalizer.normalize(fuel, amount)?;
        let credits = self.estimator.estimate_credits_for(fuel, dge);
        Ok(FuelEstimate {
            fuel: fuel.to_string(),
            amount,
            dge,
            fuel_ci: self.estimator.fuel_ci(fuel),
            credits,
        })
    }

    /// Runs every stage and collects the results.
    ///
    /// # Errors
    ///
    /// * `CreditError::UnknownFuelType` if the fuel is not in the table
    /// * `CreditError::EmptySeries` if `history` has no points
    pub fn run<R: Rng>(
        &self,
        fuel: &str,
        amount: f64,
        history: PriceSeries,
        horizon_months: usize,
        rng: &mut R,
    ) -> Result<CreditReport> {
        let estimate = self.estimate(fuel, amount)?;
        let stats = SeriesStats::from_series(&history).ok_or(CreditError::EmptySeries)?;
        let projection = self.engine.project(&history, horizon_months, rng)?;
        let revenue = self.revenue.project_revenue(&projection, estimate.credits);

        info!(
            fuel,
            dge = estimate.dge.value(),
            credits = estimate.credits.value(),
            months = horizon_months,
            "credit report ready"
        );

        Ok(CreditReport {
            estimate,
            history,
            stats,
            projection,
            revenue,
        })
    }
}

/// Random source for projections: seeded when `seed` is given, OS entropy otherwise.
pub fn projection_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::market::PricePoint;

    fn history(prices: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| PricePoint {
                date: start + chrono::Duration::weeks(i as i64),
                price,
            })
            .collect()
    }

    #[test]
    fn estimate_diesel() {
        let est = Pipeline::default()
            .estimate("Diesel", 1000.0)
            .expect("diesel is a standard fuel");
        assert_eq!(est.dge, Dge(1000.0));
        assert_eq!(est.fuel_ci, 30.0);
        assert!((est.credits.value() - 9.4734115).abs() < 1e-6);
    }

    #[test]
    fn estimate_unknown_fuel_fails() {
        let result = Pipeline::default().estimate("Kerosene", 10.0);
        assert!(matches!(result, Err(CreditError::UnknownFuelType(_))));
    }

    #[test]
    fn run_wires_credits_into_revenue() {
        let mut rng = projection_rng(Some(3));
        let report = Pipeline::default()
            .run("Diesel", 1000.0, history(&[60.0, 65.0, 70.0]), 12, &mut rng)
            .expect("run should succeed");

        assert_eq!(report.horizon_months(), 12);
        assert_eq!(report.revenue.len(), 12);
        assert_eq!(report.stats.latest, 70.0);
        let credits = report.estimate.credits.value();
        for (p, r) in report.projection.iter().zip(&report.revenue) {
            assert_eq!(r.base_revenue, p.base * credits);
        }
    }

    #[test]
    fn run_without_history_fails() {
        let mut rng = projection_rng(Some(3));
        let result =
            Pipeline::default().run("Diesel", 1000.0, PriceSeries::default(), 12, &mut rng);
        assert!(matches!(result, Err(CreditError::EmptySeries)));
    }

    #[test]
    fn seeded_runs_match() {
        let pipeline = Pipeline::default();
        let run = |seed| {
            let mut rng = projection_rng(Some(seed));
            pipeline
                .run("Gasoline", 500.0, history(&[60.0, 64.0]), 24, &mut rng)
                .map(|r| r.revenue)
                .ok()
        };
        assert_eq!(run(10), run(10));
    }

    #[test]
    fn from_config_uses_fuel_ci_overrides() {
        let toml = r#"
[credit]
fuel_ci = [{ fuel = "Electricity", ci = 10.0 }]
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).expect("valid toml");
        let pipeline = Pipeline::from_config(&cfg).expect("valid config");
        let est = pipeline.estimate("Electricity", 1000.0).expect("known fuel");
        assert_eq!(est.fuel_ci, 10.0);
    }

    #[test]
    fn report_display_mentions_credits_and_horizon() {
        let mut rng = projection_rng(Some(1));
        let report = Pipeline::default()
            .run("Diesel", 1000.0, history(&[60.0]), 60, &mut rng)
            .expect("run should succeed");
        let text = report.to_string();
        assert!(text.contains("Estimated credits:     9.4734"), "{text}");
        assert!(text.contains("60 months"), "{text}");
    }
}
