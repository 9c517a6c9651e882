//! `recompute` - Rebuilds stored student summaries from their applications.
//!
//! Useful after bulk imports or after changing the status vocabulary. Refreshes
//! every live student unless specific IDs are given.

use clap::Parser;
use dotenvy::dotenv;
use intake_tracker::{
    config,
    core::{resolver::StatusResolver, student, summary},
    errors::Result,
};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Recompute highest status and intake for students
#[derive(Debug, Parser)]
#[command(name = "recompute", version, about)]
struct Cli {
    /// Student ID to refresh; repeat for several. Defaults to every live student.
    #[arg(long = "student", value_name = "ID")]
    students: Vec<i64>,

    /// TOML file describing the status vocabulary (overrides `STATUS_CONFIG`)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();

    let cli = Cli::parse();

    // 3. Build the resolver from the configured vocabulary
    let vocabulary = config::statuses::load_vocabulary_or_default(cli.config.as_deref())
        .inspect_err(|e| error!("Failed to load status vocabulary: {}", e))?;
    let resolver = StatusResolver::new(vocabulary);

    // 4. Connect and make sure the tables exist
    let db = config::database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    // 5. Refresh the requested students
    let student_ids = if cli.students.is_empty() {
        student::get_all_active_students(&db)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect()
    } else {
        cli.students
    };

    let report = summary::refresh_summaries(&db, &resolver, &student_ids).await;
    print!("{}", summary::format_refresh_report(&report));

    // Non-zero exit when any student could not be refreshed
    report.ensure_success()
}
