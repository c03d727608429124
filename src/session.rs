//! Explicit session context
//!
//! The caller authenticates elsewhere and hands the engines an explicit
//! session value; there is no ambient logged-in-user state. Technicians
//! see only tickets assigned to them, admins and requesters see the whole
//! collection, matching the backend's role gates.

use serde::{Deserialize, Serialize};

use crate::models::{Ticket, UserId, UserRole};

/// An authenticated caller identity, passed explicitly to anything that
/// needs role-scoped data
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub role: UserRole,
}

impl Session {
    pub fn new(user_id: UserId, role: UserRole) -> Self {
        Self { user_id, role }
    }

    /// The subset of the collection this session may see, as owned clones
    /// ready for the engines. The input is never mutated.
    pub fn visible(&self, tickets: &[Ticket]) -> Vec<Ticket> {
        match self.role {
            UserRole::Admin | UserRole::Requester => tickets.to_vec(),
            UserRole::Technician => tickets
                .iter()
                .filter(|t| t.is_assigned_to(self.user_id))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, KindId, StatusId, TicketId};

    fn ticket(id: i64, assignees: &[i64]) -> Ticket {
        Ticket {
            id: TicketId(id),
            title: format!("Ticket {id}"),
            description: String::new(),
            requester: "Alice".to_string(),
            requester_department: None,
            status_id: StatusId(1),
            category_id: CategoryId(1),
            kind_id: KindId(1),
            assignee_ids: assignees.iter().copied().map(UserId).collect(),
            created_at: "2024-01-15T08:00:00Z".parse().unwrap(),
            resolved_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_admin_sees_everything() {
        let tickets = vec![ticket(1, &[10]), ticket(2, &[])];
        let session = Session::new(UserId(99), UserRole::Admin);
        assert_eq!(session.visible(&tickets).len(), 2);
    }

    #[test]
    fn test_technician_sees_only_assigned() {
        let tickets = vec![ticket(1, &[10]), ticket(2, &[11]), ticket(3, &[10, 11])];
        let session = Session::new(UserId(10), UserRole::Technician);

        let visible = session.visible(&tickets);
        let ids: Vec<i64> = visible.iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_requester_sees_everything() {
        let tickets = vec![ticket(1, &[10])];
        let session = Session::new(UserId(50), UserRole::Requester);
        assert_eq!(session.visible(&tickets).len(), 1);
    }
}
