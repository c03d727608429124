//! Ticket dataset boundary
//!
//! The external data source hands us a JSON bundle of taxonomy, users and
//! tickets (a REST response, or a seeded file in offline/demo use). This
//! module deserializes the bundle and checks referential integrity before
//! either engine sees the data.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use validator::Validate;

use crate::config::WorkflowConfig;
use crate::error::{AppError, Result};
use crate::models::{
    Category, CategoryId, Kind, KindId, Status, StatusId, Taxonomy, Ticket, TicketId, User,
    UserDirectory, UserId, UserRole,
};

/// A complete ticket collection with its vocabulary and user directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(flatten)]
    pub taxonomy: Taxonomy,

    #[serde(default)]
    pub users: Vec<User>,

    #[serde(default)]
    pub tickets: Vec<Ticket>,
}

impl Dataset {
    /// Parse a dataset from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(json)?;
        Ok(dataset)
    }

    /// Read a dataset from any reader
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let dataset: Dataset = serde_json::from_reader(reader)?;
        Ok(dataset)
    }

    /// Load a dataset from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        tracing::info!(path = %path.display(), "loading ticket dataset");
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Build the user lookup table
    pub fn user_directory(&self) -> UserDirectory {
        UserDirectory::new(self.users.iter().cloned())
    }

    /// Mark configured terminal-status labels on the taxonomy, for
    /// bundles that do not flag statuses themselves
    pub fn apply_workflow(&mut self, workflow: &WorkflowConfig) {
        for status in &mut self.taxonomy.statuses {
            if workflow.is_terminal_label(&status.name) {
                status.terminal = true;
            }
        }
    }

    /// Check referential integrity and ticket invariants.
    ///
    /// Rejects: duplicate ticket ids, references to unknown
    /// status/category/kind/user ids, empty titles, and a resolution
    /// timestamp earlier than the creation timestamp. A resolution
    /// timestamp on a non-terminal status (or a terminal status without
    /// one) is tolerated but logged, since observed data sources produce
    /// both.
    pub fn validate(&self) -> Result<()> {
        let status_ids: HashSet<StatusId> = self.taxonomy.statuses.iter().map(|s| s.id).collect();
        let category_ids: HashSet<CategoryId> =
            self.taxonomy.categories.iter().map(|c| c.id).collect();
        let kind_ids: HashSet<KindId> = self.taxonomy.kinds.iter().map(|k| k.id).collect();
        let user_ids: HashSet<UserId> = self.users.iter().map(|u| u.id).collect();

        let mut seen = HashSet::with_capacity(self.tickets.len());
        for ticket in &self.tickets {
            if !seen.insert(ticket.id) {
                return Err(AppError::Validation(format!(
                    "duplicate ticket id {}",
                    ticket.id
                )));
            }

            ticket.validate()?;

            if !status_ids.contains(&ticket.status_id) {
                return Err(AppError::Validation(format!(
                    "ticket {} references unknown status {:?}",
                    ticket.id, ticket.status_id
                )));
            }
            if !category_ids.contains(&ticket.category_id) {
                return Err(AppError::Validation(format!(
                    "ticket {} references unknown category {:?}",
                    ticket.id, ticket.category_id
                )));
            }
            if !kind_ids.contains(&ticket.kind_id) {
                return Err(AppError::Validation(format!(
                    "ticket {} references unknown kind {:?}",
                    ticket.id, ticket.kind_id
                )));
            }
            for assignee in &ticket.assignee_ids {
                if !user_ids.contains(assignee) {
                    return Err(AppError::Validation(format!(
                        "ticket {} references unknown user {}",
                        ticket.id, assignee
                    )));
                }
            }

            if let Some(resolved_at) = ticket.resolved_at {
                if resolved_at < ticket.created_at {
                    return Err(AppError::Validation(format!(
                        "ticket {} resolved before it was created",
                        ticket.id
                    )));
                }
                if !self.taxonomy.is_terminal(ticket.status_id) {
                    tracing::warn!(
                        ticket = %ticket.id,
                        status = self.taxonomy.status_label(ticket.status_id),
                        "resolution timestamp on a non-terminal status"
                    );
                }
            } else if self.taxonomy.is_terminal(ticket.status_id) {
                tracing::warn!(
                    ticket = %ticket.id,
                    status = self.taxonomy.status_label(ticket.status_id),
                    "terminal status without a resolution timestamp"
                );
            }
        }

        Ok(())
    }

    /// In-code demo seed, used when no dataset file is configured
    pub fn sample() -> Self {
        let statuses = vec![
            status(1, "New", false),
            status(2, "In Progress", false),
            status(3, "Pending", false),
            status(4, "Resolved", true),
        ];
        let categories = vec![
            category(1, "Network"),
            category(2, "Hardware"),
            category(3, "Software"),
            category(4, "Security"),
            category(5, "Infrastructure"),
        ];
        let kinds = vec![kind(1, "Incident"), kind(2, "Request")];
        let users = vec![
            user(1, "Jean Dupont", UserRole::Technician),
            user(2, "Marie Martin", UserRole::Technician),
            user(3, "Pierre Durand", UserRole::Technician),
            user(4, "Sophie Lefevre", UserRole::Technician),
            user(5, "Thomas Bernard", UserRole::Technician),
            user(6, "Admin", UserRole::Admin),
        ];

        let tickets = vec![
            sample_ticket(
                1,
                "Network connection issue",
                "Cannot reach the office WiFi since this morning",
                "Alice Johnson",
                "Accounting",
                4,
                1,
                1,
                &[1],
                "2024-01-15T08:00:00Z",
                Some("2024-01-15T14:30:00Z"),
            ),
            sample_ticket(
                2,
                "Office 365 installation",
                "Requesting Office 365 on a new workstation",
                "Bob Smith",
                "HR",
                2,
                3,
                2,
                &[2],
                "2024-01-16T09:15:00Z",
                None,
            ),
            sample_ticket(
                3,
                "Computer will not boot",
                "The machine hangs on the startup screen",
                "Carol Wilson",
                "Marketing",
                1,
                2,
                1,
                &[3],
                "2024-01-17T10:30:00Z",
                None,
            ),
            sample_ticket(
                4,
                "Antivirus update",
                "Requesting an antivirus definitions update",
                "David Brown",
                "IT",
                4,
                4,
                2,
                &[4],
                "2024-01-18T11:45:00Z",
                Some("2024-01-18T16:20:00Z"),
            ),
            sample_ticket(
                5,
                "VPN keeps dropping",
                "VPN disconnects every few minutes when working remotely",
                "Emma Davis",
                "Sales",
                3,
                1,
                1,
                &[1, 5],
                "2024-01-19T13:20:00Z",
                None,
            ),
            sample_ticket(
                6,
                "Shared printer offline",
                "Second floor printer rejects every job",
                "Frank Miller",
                "Legal",
                2,
                2,
                1,
                &[3],
                "2024-01-20T08:50:00Z",
                None,
            ),
            sample_ticket(
                7,
                "Server migration",
                "Move the file server to the new rack",
                "Grace Moreau",
                "IT",
                4,
                5,
                2,
                &[1, 2],
                "2024-01-21T07:00:00Z",
                Some("2024-01-23T17:00:00Z"),
            ),
        ];

        Self {
            taxonomy: Taxonomy {
                statuses,
                categories,
                kinds,
            },
            users,
            tickets,
        }
    }
}

fn status(id: i64, name: &str, terminal: bool) -> Status {
    Status {
        id: StatusId(id),
        name: name.to_string(),
        terminal,
    }
}

fn category(id: i64, name: &str) -> Category {
    Category {
        id: CategoryId(id),
        name: name.to_string(),
    }
}

fn kind(id: i64, name: &str) -> Kind {
    Kind {
        id: KindId(id),
        name: name.to_string(),
    }
}

fn user(id: i64, name: &str, role: UserRole) -> User {
    User {
        id: UserId(id),
        name: name.to_string(),
        role,
    }
}

#[allow(clippy::too_many_arguments)]
fn sample_ticket(
    id: i64,
    title: &str,
    description: &str,
    requester: &str,
    department: &str,
    status: i64,
    category: i64,
    kind: i64,
    assignees: &[i64],
    created: &str,
    resolved: Option<&str>,
) -> Ticket {
    Ticket {
        id: TicketId(id),
        title: title.to_string(),
        description: description.to_string(),
        requester: requester.to_string(),
        requester_department: Some(department.to_string()),
        status_id: StatusId(status),
        category_id: CategoryId(category),
        kind_id: KindId(kind),
        assignee_ids: assignees.iter().copied().map(UserId).collect(),
        created_at: created.parse().expect("sample timestamp"),
        resolved_at: resolved.map(|r| r.parse().expect("sample timestamp")),
        updated_at: None,
    }
}
