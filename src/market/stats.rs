//! Summary statistics over a price series.

use serde::Serialize;

use super::history::PriceSeries;

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by `n`, not `n - 1`).
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let mu = mean(values)?;
    let var = values.iter().map(|v| (v - mu) * (v - mu)).sum::<f64>() / values.len() as f64;
    Some(var.sqrt())
}

/// Aggregate statistics for a non-empty price series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesStats {
    /// Number of observations.
    pub count: usize,
    /// Most recent price (last in series order).
    pub latest: f64,
    /// Mean price.
    pub mean: f64,
    /// Population standard deviation of prices.
    pub std_dev: f64,
    /// Lowest observed price.
    pub min: f64,
    /// Highest observed price.
    pub max: f64,
}

impl SeriesStats {
    /// Computes statistics, or `None` when the series is empty.
    pub fn from_series(series: &PriceSeries) -> Option<Self> {
        let prices = series.prices();
        let latest = *prices.last()?;
        let mean = mean(&prices)?;
        let std_dev = population_std_dev(&prices)?;
        let (min, max) = prices
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
                (lo.min(p), hi.max(p))
            });

        Some(Self {
            count: prices.len(),
            latest,
            mean,
            std_dev,
            min,
            max,
        })
    }
}
