use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{CategoryId, StatusId, Taxonomy, Ticket, UserId};

/// One slice of a breakdown: how many tickets fall in the bucket and the
/// unrounded share of the total it represents (percent)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub count: u64,
    pub share: f64,
}

/// Dashboard statistics derived from a ticket collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsSummary {
    /// Count of all tickets
    pub total: u64,

    /// Tickets in a terminal status
    pub resolved: u64,

    /// `resolved / total * 100`, unrounded; 0 when the collection is empty
    pub resolution_rate: f64,

    /// Mean time from creation to resolution in fractional hours, over
    /// tickets that carry a resolution timestamp; 0 when none do
    pub avg_resolution_hours: f64,

    /// Ticket counts by status
    pub by_status: HashMap<StatusId, Bucket>,

    /// Ticket counts by category
    pub by_category: HashMap<CategoryId, Bucket>,

    /// Ticket counts by technician. A ticket with N assignees contributes
    /// to N buckets, so these counts need not sum to `total`.
    pub by_technician: HashMap<UserId, Bucket>,
}

/// Compute dashboard statistics from the full (unfiltered) collection
///
/// Never fails: empty input yields zeroed counts and empty breakdowns.
pub fn compute_stats(tickets: &[Ticket], taxonomy: &Taxonomy) -> StatsSummary {
    let total = tickets.len() as u64;

    let mut resolved = 0u64;
    let mut status_counts: HashMap<StatusId, u64> = HashMap::new();
    let mut category_counts: HashMap<CategoryId, u64> = HashMap::new();
    let mut technician_counts: HashMap<UserId, u64> = HashMap::new();
    let mut resolution_hours: Vec<f64> = Vec::new();

    for ticket in tickets {
        if taxonomy.is_terminal(ticket.status_id) {
            resolved += 1;
        }

        *status_counts.entry(ticket.status_id).or_insert(0) += 1;
        *category_counts.entry(ticket.category_id).or_insert(0) += 1;
        for assignee in &ticket.assignee_ids {
            *technician_counts.entry(*assignee).or_insert(0) += 1;
        }

        if let Some(hours) = ticket.resolution_hours() {
            resolution_hours.push(hours);
        }
    }

    let resolution_rate = ratio(resolved, total);
    let avg_resolution_hours = if resolution_hours.is_empty() {
        0.0
    } else {
        resolution_hours.iter().sum::<f64>() / resolution_hours.len() as f64
    };

    StatsSummary {
        total,
        resolved,
        resolution_rate,
        avg_resolution_hours,
        by_status: into_buckets(status_counts, total),
        by_category: into_buckets(category_counts, total),
        by_technician: into_buckets(technician_counts, total),
    }
}

fn into_buckets<K: std::hash::Hash + Eq>(
    counts: HashMap<K, u64>,
    total: u64,
) -> HashMap<K, Bucket> {
    counts
        .into_iter()
        .map(|(key, count)| {
            (
                key,
                Bucket {
                    count,
                    share: ratio(count, total),
                },
            )
        })
        .collect()
}

fn ratio(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}
