//! Externally-configured classification sets
//!
//! Statuses, categories and ticket kinds are open sets defined by the data
//! source, not hard-coded enumerations. Whether a status is terminal
//! ("resolved", "closed") is a per-status flag, so the statistics engine
//! never string-matches on labels.

use serde::{Deserialize, Serialize};

/// Status identifier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StatusId(pub i64);

/// Category identifier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

/// Ticket-kind identifier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct KindId(pub i64);

/// A ticket status (e.g. New, In Progress, Resolved)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    pub id: StatusId,
    pub name: String,

    /// Terminal statuses signify the ticket requires no further action
    #[serde(default)]
    pub terminal: bool,
}

/// A ticket category (e.g. Network, Hardware, Software)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A ticket kind (e.g. Incident, Request)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kind {
    pub id: KindId,
    pub name: String,
}

/// The full classification vocabulary for a ticket collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Taxonomy {
    #[serde(default)]
    pub statuses: Vec<Status>,

    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub kinds: Vec<Kind>,
}

impl Taxonomy {
    /// Look up a status by id
    pub fn status(&self, id: StatusId) -> Option<&Status> {
        self.statuses.iter().find(|s| s.id == id)
    }

    /// Look up a category by id
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Look up a kind by id
    pub fn kind(&self, id: KindId) -> Option<&Kind> {
        self.kinds.iter().find(|k| k.id == id)
    }

    /// Resolve a status label (case-insensitive) to its id
    pub fn status_by_name(&self, name: &str) -> Option<StatusId> {
        self.statuses
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .map(|s| s.id)
    }

    /// Resolve a category label (case-insensitive) to its id
    pub fn category_by_name(&self, name: &str) -> Option<CategoryId> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .map(|c| c.id)
    }

    /// Whether the status is terminal; unknown ids are not terminal
    pub fn is_terminal(&self, id: StatusId) -> bool {
        self.status(id).map(|s| s.terminal).unwrap_or(false)
    }

    /// Display label for a status, empty for unknown ids
    pub fn status_label(&self, id: StatusId) -> &str {
        self.status(id).map(|s| s.name.as_str()).unwrap_or("")
    }

    /// Display label for a category, empty for unknown ids
    pub fn category_label(&self, id: CategoryId) -> &str {
        self.category(id).map(|c| c.name.as_str()).unwrap_or("")
    }

    /// Display label for a kind, empty for unknown ids
    pub fn kind_label(&self, id: KindId) -> &str {
        self.kind(id).map(|k| k.name.as_str()).unwrap_or("")
    }

}
