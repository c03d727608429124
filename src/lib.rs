//! Ticketdesk core library
//!
//! In-memory filtering, sorting and aggregate statistics for IT support
//! ticket collections. The ticket data itself comes from an external source
//! (a REST backend returning JSON arrays, or a seeded demo dataset); this
//! crate owns the list logic that sits between that source and whatever
//! renders the results.
//!
//! The two engines are pure functions over a borrowed ticket slice:
//!
//! - [`query::TicketQuery`] applies the combined search/status/category/
//!   technician filter and orders the result by a closed set of sort keys.
//! - [`analytics::compute_stats`] derives the dashboard numbers: totals,
//!   resolution rate, average time to resolution, and per-dimension
//!   breakdowns.
//!
//! Both are safe to re-run on every input change; neither mutates its
//! input or holds state between calls.

pub mod analytics;
pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod query;
pub mod session;

pub use config::Config;
pub use dataset::Dataset;
pub use error::{AppError, Result};
