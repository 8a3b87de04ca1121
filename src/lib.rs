//! Low-carbon fuel credit estimator and credit value projector.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod error;
/// Fuel normalization and credit estimation.
pub mod fuel;
pub mod io;
/// Historical credit price data.
pub mod market;
pub mod pipeline;
/// Credit value projection and revenue scenarios.
pub mod projection;

pub use error::{CreditError, Result};
