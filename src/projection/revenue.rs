//! Revenue band from projected credit values.

use std::fmt;

use serde::Serialize;

use super::engine::ProjectionPoint;
use crate::fuel::Credits;

/// Projected value and revenue for one future month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevenuePoint {
    /// 1-based month offset.
    pub month: usize,
    /// Projected value per credit, base scenario ($).
    pub base: f64,
    /// Projected value per credit, optimistic scenario ($).
    pub optimistic: f64,
    /// Projected value per credit, pessimistic scenario ($).
    pub pessimistic: f64,
    /// `base * credits` ($).
    pub base_revenue: f64,
    /// `optimistic * credits` ($).
    pub optimistic_revenue: f64,
    /// `pessimistic * credits` ($).
    pub pessimistic_revenue: f64,
}

impl fmt::Display for RevenuePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "month {:>3} | value base={:>8.2}  opt={:>8.2}  pess={:>8.2} | \
             revenue base={:>10.2}  opt={:>10.2}  pess={:>10.2}",
            self.month,
            self.base,
            self.optimistic,
            self.pessimistic,
            self.base_revenue,
            self.optimistic_revenue,
            self.pessimistic_revenue,
        )
    }
}

/// Scales projected per-credit values by a credit count.
#[derive(Debug, Default, Clone, Copy)]
pub struct RevenueProjector;

impl RevenueProjector {
    /// Multiplies every projected value by `credits`.
    ///
    /// Pure and exact: no rounding is applied and non-finite inputs pass
    /// through unchanged.
    pub fn project_revenue(
        &self,
        points: &[ProjectionPoint],
        credits: Credits,
    ) -> Vec<RevenuePoint> {
        let c = credits.value();
        points
            .iter()
            .map(|p| RevenuePoint {
                month: p.month,
                base: p.base,
                optimistic: p.optimistic,
                pessimistic: p.pessimistic,
                base_revenue: p.base * c,
                optimistic_revenue: p.optimistic * c,
                pessimistic_revenue: p.pessimistic * c,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(month: usize, base: f64, spread: f64) -> ProjectionPoint {
        ProjectionPoint {
            month,
            base,
            optimistic: base + spread,
            pessimistic: base - spread,
        }
    }

    #[test]
    fn revenue_is_value_times_credits_exactly() {
        let points: Vec<ProjectionPoint> = (1..=12)
            .map(|m| point(m, 60.0 + m as f64 * 0.37, 4.2))
            .collect();
        let credits = Credits(9.4734115);
        let revenue = RevenueProjector.project_revenue(&points, credits);

        assert_eq!(revenue.len(), points.len());
        for (p, r) in points.iter().zip(&revenue) {
            assert_eq!(r.month, p.month);
            assert_eq!(r.base, p.base);
            assert_eq!(r.base_revenue, p.base * credits.value());
            assert_eq!(r.optimistic_revenue, p.optimistic * credits.value());
            assert_eq!(r.pessimistic_revenue, p.pessimistic * credits.value());
        }
    }

    #[test]
    fn is_idempotent() {
        let points = vec![point(1, 70.0, 3.0), point(2, 71.0, 3.0)];
        let a = RevenueProjector.project_revenue(&points, Credits(2.5));
        let b = RevenueProjector.project_revenue(&points, Credits(2.5));
        assert_eq!(a, b);
    }

    #[test]
    fn zero_credits_zero_revenue() {
        let revenue = RevenueProjector.project_revenue(&[point(1, 70.0, 3.0)], Credits(0.0));
        assert_eq!(revenue[0].base_revenue, 0.0);
        assert_eq!(revenue[0].optimistic_revenue, 0.0);
    }

    #[test]
    fn nan_propagates() {
        let revenue = RevenueProjector.project_revenue(&[point(1, f64::NAN, 1.0)], Credits(3.0));
        assert!(revenue[0].base_revenue.is_nan());
    }

    #[test]
    fn empty_projection_gives_empty_revenue() {
        assert!(RevenueProjector.project_revenue(&[], Credits(1.0)).is_empty());
    }
}
