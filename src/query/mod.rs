//! Combined filter/sort/search engine for ticket lists
//!
//! Given the full in-memory ticket collection and the active criteria
//! (free-text search plus status/category/technician selections), produces
//! the ordered subset to display. Pure and side-effect free; safe to
//! re-run on every keystroke or filter change.
//!
//! # Example
//!
//! ```
//! use ticketdesk::dataset::Dataset;
//! use ticketdesk::query::{FilterCriteria, SortDirection, SortKey, TicketQuery};
//!
//! let dataset = Dataset::sample();
//! let users = dataset.user_directory();
//! let engine = TicketQuery::new(&dataset.taxonomy, &users);
//!
//! let criteria = FilterCriteria::new().with_search("network");
//! let rows = engine.filter_and_sort(
//!     &dataset.tickets,
//!     &criteria,
//!     SortKey::CreatedAt,
//!     SortDirection::Descending,
//! );
//! assert!(rows.iter().all(|t| t.title.to_lowercase().contains("network")
//!     || t.description.to_lowercase().contains("network")
//!     || t.requester.to_lowercase().contains("network")));
//! ```

mod criteria;
mod engine;
mod sort;

pub use criteria::FilterCriteria;
pub use engine::TicketQuery;
pub use sort::{SortDirection, SortKey};
