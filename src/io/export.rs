//! CSV export for projection and revenue tables.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::projection::{ProjectionPoint, RevenuePoint};

/// Column header for the revenue table.
const REVENUE_HEADER: &str = "month,base,optimistic,pessimistic,\
                              base_revenue,optimistic_revenue,pessimistic_revenue";

/// Column header for the projected value series.
const PROJECTION_HEADER: &str = "month,base,optimistic,pessimistic";

/// Exports the revenue table to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_revenue_csv(rows: &[RevenuePoint], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_revenue_csv(rows, io::BufWriter::new(file))
}

/// Writes the revenue table as CSV to any writer.
///
/// One header row, then one row per month. Values keep four decimals so
/// output is byte-identical for identical input.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_revenue_csv(rows: &[RevenuePoint], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(REVENUE_HEADER.split(',').map(str::trim))?;

    for r in rows {
        wtr.write_record(&[
            r.month.to_string(),
            format!("{:.4}", r.base),
            format!("{:.4}", r.optimistic),
            format!("{:.4}", r.pessimistic),
            format!("{:.4}", r.base_revenue),
            format!("{:.4}", r.optimistic_revenue),
            format!("{:.4}", r.pessimistic_revenue),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports the projected value series to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_projection_csv(points: &[ProjectionPoint], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_projection_csv(points, io::BufWriter::new(file))
}

/// Writes the projected value series as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_projection_csv(points: &[ProjectionPoint], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(PROJECTION_HEADER.split(','))?;

    for p in points {
        wtr.write_record(&[
            p.month.to_string(),
            format!("{:.4}", p.base),
            format!("{:.4}", p.optimistic),
            format!("{:.4}", p.pessimistic),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
