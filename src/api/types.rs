//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::market::SeriesStats;
use crate::pipeline::FuelEstimate;

/// Scalar outputs: fuel estimate, history summary and horizon length.
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    /// Fuel, DGE and credit figures.
    pub estimate: FuelEstimate,
    /// Historical price summary.
    pub stats: SeriesStats,
    /// Number of projected months.
    pub horizon_months: usize,
    /// Total base-scenario revenue over the horizon.
    pub total_base_revenue: f64,
}

/// Optional month range for the revenue endpoint.
#[derive(Debug, Deserialize)]
pub struct MonthRangeQuery {
    /// First month (inclusive, 1-based).
    pub from: Option<usize>,
    /// Last month (inclusive).
    pub to: Option<usize>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
