//! Aggregate statistics for dashboard rendering
//!
//! Computes summary counts, resolution rate, average time to resolution
//! and per-dimension breakdowns from the full ticket collection. The
//! computation is total: any collection, including an empty one, yields a
//! summary, and every ratio short-circuits to zero rather than dividing by
//! zero.
//!
//! Percentages are returned unrounded; display rounding (whole percents on
//! the dashboard cards, one decimal on the average) is the caller's
//! convention.

mod summary;

pub use summary::{compute_stats, Bucket, StatsSummary};
