use std::cmp::Ordering;

use crate::models::{Taxonomy, Ticket, UserDirectory};
use crate::query::criteria::FilterCriteria;
use crate::query::sort::{SortDirection, SortKey};

/// The filter/sort engine for ticket lists
///
/// Borrows the taxonomy and user directory so label-keyed sorts (status,
/// category, kind, technician) compare by display name rather than by raw
/// id. Construction is cheap; the engine holds no state between calls.
pub struct TicketQuery<'a> {
    taxonomy: &'a Taxonomy,
    users: &'a UserDirectory,
}

impl<'a> TicketQuery<'a> {
    pub fn new(taxonomy: &'a Taxonomy, users: &'a UserDirectory) -> Self {
        Self { taxonomy, users }
    }

    /// Filter the collection by `criteria`, then order it by `key` and
    /// `direction`. Returns a new sequence; the input is never mutated.
    ///
    /// The underlying sort is not stable: tickets with equal keys carry no
    /// guaranteed relative order.
    pub fn filter_and_sort(
        &self,
        tickets: &[Ticket],
        criteria: &FilterCriteria,
        key: SortKey,
        direction: SortDirection,
    ) -> Vec<Ticket> {
        let needle = criteria.search.to_lowercase();

        let mut rows: Vec<Ticket> = tickets
            .iter()
            .filter(|t| criteria.matches_lowered(t, &needle))
            .cloned()
            .collect();

        rows.sort_unstable_by(|a, b| direction.apply(self.compare(a, b, key)));

        tracing::debug!(
            total = tickets.len(),
            matched = rows.len(),
            sort_key = %key,
            "filtered and sorted ticket list"
        );

        rows
    }

    /// Ascending comparison of two tickets under a sort key
    fn compare(&self, a: &Ticket, b: &Ticket, key: SortKey) -> Ordering {
        match key {
            SortKey::Title => cmp_ci(&a.title, &b.title),
            SortKey::Requester => cmp_ci(&a.requester, &b.requester),
            SortKey::Status => cmp_ci(
                self.taxonomy.status_label(a.status_id),
                self.taxonomy.status_label(b.status_id),
            ),
            SortKey::Category => cmp_ci(
                self.taxonomy.category_label(a.category_id),
                self.taxonomy.category_label(b.category_id),
            ),
            SortKey::Kind => cmp_ci(
                self.taxonomy.kind_label(a.kind_id),
                self.taxonomy.kind_label(b.kind_id),
            ),
            SortKey::Technician => cmp_ci(&self.primary_assignee(a), &self.primary_assignee(b)),
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            // Unresolved tickets order before every resolved one
            SortKey::ResolvedAt => a.resolved_at.cmp(&b.resolved_at),
        }
    }

    /// Display name of the first listed assignee; unassigned tickets sort
    /// as the empty string
    fn primary_assignee(&self, ticket: &Ticket) -> String {
        ticket
            .assignee_ids
            .first()
            .map(|id| self.users.name(*id).to_string())
            .unwrap_or_default()
    }
}

/// Case-insensitive string comparison (labels are lowercased before
/// comparison, matching the list view's behavior)
fn cmp_ci(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Category, CategoryId, Kind, KindId, Status, StatusId, TicketId, User, UserId, UserRole,
    };

    fn taxonomy() -> Taxonomy {
        Taxonomy {
            statuses: vec![
                Status {
                    id: StatusId(1),
                    name: "New".to_string(),
                    terminal: false,
                },
                Status {
                    id: StatusId(2),
                    name: "Resolved".to_string(),
                    terminal: true,
                },
            ],
            categories: vec![
                Category {
                    id: CategoryId(1),
                    name: "Network".to_string(),
                },
                Category {
                    id: CategoryId(2),
                    name: "Hardware".to_string(),
                },
            ],
            kinds: vec![Kind {
                id: KindId(1),
                name: "Incident".to_string(),
            }],
        }
    }

    fn users() -> UserDirectory {
        UserDirectory::new(vec![
            User {
                id: UserId(10),
                name: "Jean Dupont".to_string(),
                role: UserRole::Technician,
            },
            User {
                id: UserId(11),
                name: "Amelie Roux".to_string(),
                role: UserRole::Technician,
            },
        ])
    }

    fn ticket(id: i64, title: &str, created: &str, assignees: &[i64]) -> Ticket {
        Ticket {
            id: TicketId(id),
            title: title.to_string(),
            description: String::new(),
            requester: "Alice".to_string(),
            requester_department: None,
            status_id: StatusId(1),
            category_id: CategoryId(1),
            kind_id: KindId(1),
            assignee_ids: assignees.iter().copied().map(UserId).collect(),
            created_at: created.parse().unwrap(),
            resolved_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_sort_by_created_at_descending() {
        let tax = taxonomy();
        let dir = users();
        let engine = TicketQuery::new(&tax, &dir);

        let tickets = vec![
            ticket(1, "a", "2024-01-15T08:00:00Z", &[]),
            ticket(2, "b", "2024-01-17T08:00:00Z", &[]),
            ticket(3, "c", "2024-01-16T08:00:00Z", &[]),
        ];

        let rows = engine.filter_and_sort(
            &tickets,
            &FilterCriteria::new(),
            SortKey::CreatedAt,
            SortDirection::Descending,
        );

        let ids: Vec<i64> = rows.iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_by_title_is_case_insensitive() {
        let tax = taxonomy();
        let dir = users();
        let engine = TicketQuery::new(&tax, &dir);

        let tickets = vec![
            ticket(1, "printer down", "2024-01-15T08:00:00Z", &[]),
            ticket(2, "Backup failed", "2024-01-15T08:00:00Z", &[]),
            ticket(3, "NETWORK outage", "2024-01-15T08:00:00Z", &[]),
        ];

        let rows = engine.filter_and_sort(
            &tickets,
            &FilterCriteria::new(),
            SortKey::Title,
            SortDirection::Ascending,
        );

        let ids: Vec<i64> = rows.iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_by_technician_name() {
        let tax = taxonomy();
        let dir = users();
        let engine = TicketQuery::new(&tax, &dir);

        let tickets = vec![
            ticket(1, "a", "2024-01-15T08:00:00Z", &[10]), // Jean Dupont
            ticket(2, "b", "2024-01-15T08:00:00Z", &[11]), // Amelie Roux
            ticket(3, "c", "2024-01-15T08:00:00Z", &[]),   // unassigned
        ];

        let rows = engine.filter_and_sort(
            &tickets,
            &FilterCriteria::new(),
            SortKey::Technician,
            SortDirection::Ascending,
        );

        let ids: Vec<i64> = rows.iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_unresolved_sorts_before_resolved() {
        let tax = taxonomy();
        let dir = users();
        let engine = TicketQuery::new(&tax, &dir);

        let mut resolved = ticket(1, "a", "2024-01-15T08:00:00Z", &[]);
        resolved.resolved_at = Some("2024-01-15T10:00:00Z".parse().unwrap());
        let open = ticket(2, "b", "2024-01-15T08:00:00Z", &[]);

        let rows = engine.filter_and_sort(
            &[resolved, open],
            &FilterCriteria::new(),
            SortKey::ResolvedAt,
            SortDirection::Ascending,
        );

        assert_eq!(rows[0].id, TicketId(2));
        assert_eq!(rows[1].id, TicketId(1));
    }

    #[test]
    fn test_filter_and_sort_does_not_mutate_input() {
        let tax = taxonomy();
        let dir = users();
        let engine = TicketQuery::new(&tax, &dir);

        let tickets = vec![
            ticket(1, "b", "2024-01-15T08:00:00Z", &[]),
            ticket(2, "a", "2024-01-16T08:00:00Z", &[]),
        ];

        let _ = engine.filter_and_sort(
            &tickets,
            &FilterCriteria::new(),
            SortKey::Title,
            SortDirection::Ascending,
        );

        assert_eq!(tickets[0].id, TicketId(1));
        assert_eq!(tickets[1].id, TicketId(2));
    }

    #[test]
    fn test_empty_result_for_unmatched_filter() {
        let tax = taxonomy();
        let dir = users();
        let engine = TicketQuery::new(&tax, &dir);

        let tickets = vec![ticket(1, "a", "2024-01-15T08:00:00Z", &[])];
        let criteria = FilterCriteria::new().with_category(CategoryId(2));

        let rows = engine.filter_and_sort(
            &tickets,
            &criteria,
            SortKey::CreatedAt,
            SortDirection::Ascending,
        );
        assert!(rows.is_empty());
    }
}
