//! Credit value projection and revenue scenarios.

pub mod engine;
/// Selectable projection horizons.
pub mod horizon;
pub mod revenue;

pub use engine::{ProjectionEngine, ProjectionParams, ProjectionPoint};
pub use horizon::ProjectionHorizon;
pub use revenue::{RevenuePoint, RevenueProjector};
