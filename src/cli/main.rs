use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ticketdesk::analytics::compute_stats;
use ticketdesk::models::{Taxonomy, UserDirectory, UserId};
use ticketdesk::query::{FilterCriteria, SortDirection, SortKey, TicketQuery};
use ticketdesk::session::Session;
use ticketdesk::{Config, Dataset};

#[derive(Parser)]
#[command(name = "ticketdesk")]
#[command(about = "Ticket list filtering and dashboard statistics", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a JSON dataset bundle (overrides configuration; the
    /// built-in sample data is used when neither is set)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Run as this user id; technicians only see their assigned tickets
    #[arg(long, value_name = "USER_ID")]
    as_user: Option<i64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tickets with filters and ordering
    List {
        /// Free-text search over title, description and requester
        #[arg(short, long, default_value = "")]
        search: String,

        /// Status label to filter by
        #[arg(long)]
        status: Option<String>,

        /// Category label to filter by
        #[arg(long)]
        category: Option<String>,

        /// Technician name to filter by
        #[arg(long)]
        technician: Option<String>,

        /// Sort key (title, status, kind, category, technician,
        /// requester, created-at, resolved-at)
        #[arg(long, default_value = "created-at")]
        sort: SortKey,

        /// Sort direction (asc or desc)
        #[arg(long, default_value = "desc")]
        direction: SortDirection,
    },

    /// Print dashboard statistics
    Stats,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ticketdesk=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load().context("failed to load configuration")?;

    let mut dataset = match cli.data.as_ref().or(config.dataset.path.as_ref()) {
        Some(path) => Dataset::from_path(path)
            .with_context(|| format!("failed to load dataset from {}", path.display()))?,
        None => Dataset::sample(),
    };
    dataset.apply_workflow(&config.workflow);
    dataset.validate().context("invalid dataset")?;

    let users = dataset.user_directory();

    // Scope the collection to the caller's session, if one was given
    let tickets = match cli.as_user {
        Some(id) => {
            let user = users
                .get(UserId(id))
                .with_context(|| format!("unknown user id {id}"))?;
            Session::new(user.id, user.role).visible(&dataset.tickets)
        }
        None => dataset.tickets.clone(),
    };

    match cli.command {
        Commands::List {
            search,
            status,
            category,
            technician,
            sort,
            direction,
        } => {
            let criteria = build_criteria(
                &dataset.taxonomy,
                &users,
                search,
                status,
                category,
                technician,
            )?;
            let engine = TicketQuery::new(&dataset.taxonomy, &users);
            let rows = engine.filter_and_sort(&tickets, &criteria, sort, direction);
            print_list(&rows, &dataset.taxonomy, &users);
        }
        Commands::Stats => {
            let stats = compute_stats(&tickets, &dataset.taxonomy);
            print_stats(&stats, &dataset.taxonomy, &users);
        }
    }

    Ok(())
}

/// Resolve filter labels to ids; unknown labels are an error up front,
/// not a silent empty result
fn build_criteria(
    taxonomy: &Taxonomy,
    users: &UserDirectory,
    search: String,
    status: Option<String>,
    category: Option<String>,
    technician: Option<String>,
) -> anyhow::Result<FilterCriteria> {
    let mut criteria = FilterCriteria::new().with_search(search);

    if let Some(name) = status {
        match taxonomy.status_by_name(&name) {
            Some(id) => criteria = criteria.with_status(id),
            None => bail!("unknown status: {name}"),
        }
    }
    if let Some(name) = category {
        match taxonomy.category_by_name(&name) {
            Some(id) => criteria = criteria.with_category(id),
            None => bail!("unknown category: {name}"),
        }
    }
    if let Some(name) = technician {
        match users.by_name(&name) {
            Some(id) => criteria = criteria.with_technician(id),
            None => bail!("unknown technician: {name}"),
        }
    }

    Ok(criteria)
}

fn print_list(
    rows: &[ticketdesk::models::Ticket],
    taxonomy: &Taxonomy,
    users: &UserDirectory,
) {
    if rows.is_empty() {
        println!("No tickets match the current filters.");
        return;
    }

    println!(
        "{:<5} {:<35} {:<12} {:<14} {:<22} {:<17} {}",
        "ID", "TITLE", "STATUS", "CATEGORY", "TECHNICIANS", "CREATED", "RESOLVED"
    );
    for ticket in rows {
        let technicians: Vec<&str> = ticket
            .assignee_ids
            .iter()
            .map(|id| users.name(*id))
            .collect();
        println!(
            "{:<5} {:<35} {:<12} {:<14} {:<22} {:<17} {}",
            ticket.id,
            truncate(&ticket.title, 34),
            taxonomy.status_label(ticket.status_id),
            taxonomy.category_label(ticket.category_id),
            truncate(&technicians.join(", "), 21),
            ticket.created_at.format("%Y-%m-%d %H:%M"),
            ticket
                .resolved_at
                .map(|r| r.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
    }
    println!("\n{} ticket(s)", rows.len());
}

fn print_stats(
    stats: &ticketdesk::analytics::StatsSummary,
    taxonomy: &Taxonomy,
    users: &UserDirectory,
) {
    // Dashboard display convention: whole-percent shares, one decimal on
    // the average
    println!("Total tickets:        {}", stats.total);
    println!("Resolved tickets:     {}", stats.resolved);
    println!("Resolution rate:      {}%", stats.resolution_rate.round());
    println!(
        "Avg resolution time:  {}h",
        (stats.avg_resolution_hours * 10.0).round() / 10.0
    );

    println!("\nBy status:");
    let mut by_status: Vec<_> = stats.by_status.iter().collect();
    by_status.sort_by(|a, b| b.1.count.cmp(&a.1.count).then(a.0.cmp(b.0)));
    for (id, bucket) in by_status {
        println!(
            "  {:<20} {:>4}  ({}%)",
            taxonomy.status_label(*id),
            bucket.count,
            bucket.share.round()
        );
    }

    println!("\nBy category:");
    let mut by_category: Vec<_> = stats.by_category.iter().collect();
    by_category.sort_by(|a, b| b.1.count.cmp(&a.1.count).then(a.0.cmp(b.0)));
    for (id, bucket) in by_category {
        println!(
            "  {:<20} {:>4}  ({}%)",
            taxonomy.category_label(*id),
            bucket.count,
            bucket.share.round()
        );
    }

    println!("\nBy technician:");
    let mut by_technician: Vec<_> = stats.by_technician.iter().collect();
    by_technician.sort_by(|a, b| b.1.count.cmp(&a.1.count).then(a.0.cmp(b.0)));
    for (id, bucket) in by_technician {
        println!("  {:<20} {:>4}", users.name(*id), bucket.count);
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
