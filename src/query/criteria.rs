use serde::{Deserialize, Serialize};

use crate::models::{CategoryId, StatusId, Ticket, UserId};

/// The active filter constraints for a ticket list
///
/// Every constraint defaults to "match all"; active constraints combine
/// with logical AND. The free-text search matches case-insensitively
/// against title, description and requester name (any of the three).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free-text search; empty matches everything
    #[serde(default)]
    pub search: String,

    /// Restrict to a single status; `None` is the "all" sentinel
    #[serde(default)]
    pub status: Option<StatusId>,

    /// Restrict to a single category; `None` is the "all" sentinel
    #[serde(default)]
    pub category: Option<CategoryId>,

    /// Restrict to tickets assigned to this technician; `None` is the
    /// "all" sentinel
    #[serde(default)]
    pub technician: Option<UserId>,
}

impl FilterCriteria {
    /// Criteria matching every ticket
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text search
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Filter by status
    pub fn with_status(mut self, status: StatusId) -> Self {
        self.status = Some(status);
        self
    }

    /// Filter by category
    pub fn with_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    /// Filter by assigned technician
    pub fn with_technician(mut self, technician: UserId) -> Self {
        self.technician = Some(technician);
        self
    }

    /// Whether a ticket satisfies every active constraint
    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.matches_lowered(ticket, &self.search.to_lowercase())
    }

    /// `matches` with the search needle already lowercased, so callers
    /// iterating a collection lowercase it once
    pub(crate) fn matches_lowered(&self, ticket: &Ticket, needle: &str) -> bool {
        let matches_search = needle.is_empty()
            || ticket.title.to_lowercase().contains(needle)
            || ticket.description.to_lowercase().contains(needle)
            || ticket.requester.to_lowercase().contains(needle);

        let matches_status = self.status.map_or(true, |s| ticket.status_id == s);
        let matches_category = self.category.map_or(true, |c| ticket.category_id == c);
        let matches_technician = self
            .technician
            .map_or(true, |t| ticket.is_assigned_to(t));

        matches_search && matches_status && matches_category && matches_technician
    }
}
