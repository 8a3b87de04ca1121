/// CSV export of projection results.
pub mod export;
