//! Logs command - view and manage the event log

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, TimeZone, Utc};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;

use invoicegen_core::{LogEntry, LoggingService};

use super::get_app_dir;
use crate::output;

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show recent log entries
    List {
        /// Number of entries to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Show only errors
        #[arg(long)]
        errors: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete old log entries
    Clear {
        /// Delete logs older than N days
        #[arg(long, default_value = "30", value_parser = clap::value_parser!(u64).range(0..=MAX_RETENTION_DAYS))]
        older_than_days: u64,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show log statistics and database path
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Upper bound for `logs clear --older-than-days`
const MAX_RETENTION_DAYS: u64 = 36500;

/// Unix-ms cutoff `days` before `now`
fn cutoff_ms(now: DateTime<Utc>, days: u64) -> Result<i64> {
    let days = i64::try_from(days).context("Retention period too large")?;
    Duration::try_days(days)
        .and_then(|age| now.checked_sub_signed(age))
        .map(|cutoff| cutoff.timestamp_millis())
        .context("Retention period too large")
}

fn get_logging_service() -> Result<LoggingService> {
    let app_dir = get_app_dir()?;
    std::fs::create_dir_all(&app_dir)?;
    LoggingService::new(&app_dir, env!("CARGO_PKG_VERSION"))
}

fn format_timestamp(timestamp_ms: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

fn context_of(entry: &LogEntry) -> String {
    [entry.command.as_deref(), entry.role.as_deref(), entry.page.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn run(command: LogsCommands) -> Result<()> {
    let service = get_logging_service()?;

    match command {
        LogsCommands::List { limit, errors, json } => {
            let entries = if errors {
                service.get_errors(limit)?
            } else {
                service.get_recent(limit)?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
                return Ok(());
            }

            if entries.is_empty() {
                println!("No log entries found.");
                return Ok(());
            }

            let mut table = output::create_table();
            table.set_header(vec!["Time", "Event", "Context", "Error"]);
            for entry in &entries {
                table.add_row(vec![
                    format_timestamp(entry.timestamp),
                    entry.event.clone(),
                    context_of(entry),
                    entry.error_message.clone().unwrap_or_default(),
                ]);
            }
            println!("{}", table);
        }
        LogsCommands::Clear {
            older_than_days,
            force,
            json,
        } => {
            let cutoff = cutoff_ms(Utc::now(), older_than_days)?;

            if !force && !json {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete logs older than {} days?", older_than_days))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let deleted = service.delete_before(cutoff)?;
            if json {
                println!("{}", serde_json::json!({ "deleted": deleted }));
            } else {
                println!("Deleted {} log entries", deleted);
            }
        }
        LogsCommands::Stats { json } => {
            let total = service.count()?;
            let errors = service.count_errors()?;
            let db_path = service.db_path();
            let size_bytes = std::fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);

            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "total_entries": total,
                        "error_count": errors,
                        "database_path": db_path.to_string_lossy(),
                        "database_size_bytes": size_bytes
                    })
                );
            } else {
                println!("{}", "Log Statistics".bold());
                println!("  Total entries: {}", total);
                println!("  Errors: {}", errors);
                println!("  Database: {}", db_path.display());
                println!("  Size: {} bytes", size_bytes);
            }
        }
    }

    Ok(())
}
