//! Trend-plus-noise projection of future credit prices.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CreditError, Result};
use crate::market::{PriceSeries, SeriesStats};

/// Tunable parameters of the projection band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectionParams {
    /// Compound growth applied per month (0.01 = 1%).
    pub monthly_growth: f64,
    /// Full width of the uniform noise factor around 1.0 (0.1 = ±5%).
    pub noise_amplitude: f64,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            monthly_growth: 0.01,
            noise_amplitude: 0.1,
        }
    }
}

/// Projected credit value for one future month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionPoint {
    /// 1-based month offset from the latest observation.
    pub month: usize,
    /// Trend value perturbed by noise.
    pub base: f64,
    /// `base` plus one historical standard deviation.
    pub optimistic: f64,
    /// `base` minus one historical standard deviation.
    pub pessimistic: f64,
}

/// Projects monthly credit values from a historical price series.
///
/// Each month's base value is the latest price grown at a fixed monthly
/// rate and scaled by an independent uniform noise factor. The optimistic and
/// pessimistic values bracket the base by one population standard deviation
/// of the history. This is a scenario band, not a calibrated model.
///
/// The random source is supplied by the caller, so a seeded generator gives
/// reproducible output.
///
/// # Examples
///
/// ```
/// use fuel_credit_sim::market::{PricePoint, PriceSeries};
/// use fuel_credit_sim::projection::ProjectionEngine;
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let series = PriceSeries::new(vec![PricePoint { date, price: 60.0 }]);
/// let mut rng = StdRng::seed_from_u64(7);
/// let points = ProjectionEngine::default().project(&series, 12, &mut rng).unwrap();
/// assert_eq!(points.len(), 12);
/// assert_eq!(points[11].month, 12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    params: ProjectionParams,
}

impl ProjectionEngine {
    pub fn new(params: ProjectionParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ProjectionParams {
        &self.params
    }

    /// Produces `horizon_months` projection points, months `1..=horizon_months`.
    ///
    /// # Arguments
    ///
    /// * `series` - Historical prices; the last point is the starting price
    /// * `horizon_months` - Number of months to project
    /// * `rng` - Source of the per-month noise
    ///
    /// # Errors
    ///
    /// Returns `CreditError::EmptySeries` if `series` has no points.
    pub fn project<R: Rng>(
        &self,
        series: &PriceSeries,
        horizon_months: usize,
        rng: &mut R,
    ) -> Result<Vec<ProjectionPoint>> {
        let stats = SeriesStats::from_series(series).ok_or(CreditError::EmptySeries)?;
        debug!(
            latest = stats.latest,
            mean = stats.mean,
            std_dev = stats.std_dev,
            horizon_months,
            "projecting credit value"
        );

        let growth = 1.0 + self.params.monthly_growth;
        let points = (1..=horizon_months)
            .map(|month| {
                let trend = stats.latest * growth.powi((month - 1) as i32);
                let base = trend * self.noise_factor(rng);
                ProjectionPoint {
                    month,
                    base,
                    optimistic: base + stats.std_dev,
                    pessimistic: base - stats.std_dev,
                }
            })
            .collect();

        Ok(points)
    }

    /// Uniform factor in `[1 - a/2, 1 + a/2)` for amplitude `a`.
    fn noise_factor<R: Rng>(&self, rng: &mut R) -> f64 {
        1.0 + (rng.random::<f64>() - 0.5) * self.params.noise_amplitude
    }
}
