use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::taxonomy::{CategoryId, KindId, StatusId};
use crate::models::user::UserId;

/// Unique ticket identifier, assigned by the data source and never reused
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TicketId(pub i64);

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unit of reported IT work
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Ticket {
    /// Unique identifier
    pub id: TicketId,

    /// Human-readable title
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// Detailed description
    #[serde(default)]
    pub description: String,

    /// Name of the person who reported the ticket
    pub requester: String,

    /// Requester's department or group
    #[serde(default)]
    pub requester_department: Option<String>,

    /// Current status
    pub status_id: StatusId,

    /// Classification category
    pub category_id: CategoryId,

    /// Ticket kind (incident, request, ...)
    pub kind_id: KindId,

    /// Assigned technicians; may be empty
    #[serde(default)]
    pub assignee_ids: Vec<UserId>,

    /// Creation timestamp, immutable once assigned
    pub created_at: DateTime<Utc>,

    /// Resolution timestamp, present once the ticket reached a terminal
    /// status
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,

    /// Last modification timestamp
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Whether the given technician is assigned to this ticket
    pub fn is_assigned_to(&self, technician: UserId) -> bool {
        self.assignee_ids.contains(&technician)
    }

    /// Time from creation to resolution in fractional hours, if resolved
    pub fn resolution_hours(&self) -> Option<f64> {
        self.resolved_at.map(|resolved| {
            let seconds = resolved.signed_duration_since(self.created_at).num_seconds();
            seconds as f64 / 3600.0
        })
    }
}
