//! InvoiceGen CLI - invoice manager login gate in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{init, login, logs, passwd, register, users};

/// InvoiceGen - invoice management for small teams
#[derive(Parser)]
#[command(name = "ig", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prepare the store and create the admin user on first run
    Init {
        /// Admin email to store in settings.json (fresh stores only)
        #[arg(long)]
        admin_email: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Register a new user and log in
    Register {
        /// Email to register
        #[arg(long)]
        email: String,
        /// Password (prompted if omitted)
        #[arg(long, env = "INVOICEGEN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Role (team, admin)
        #[arg(long, default_value = "team")]
        role: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log in and show the dashboard shell
    Login {
        /// Account email
        #[arg(long)]
        email: String,
        /// Password (prompted if omitted)
        #[arg(long, env = "INVOICEGEN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Role to log in as (team, admin)
        #[arg(long, default_value = "team")]
        role: String,
        /// Page to open after login
        #[arg(long, default_value = "/")]
        path: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change the admin password
    Passwd {
        /// Admin record id
        #[arg(long, default_value = invoicegen_core::domain::ADMIN_ID)]
        id: String,
        /// New password (prompted if omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// List registered users
    Users {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { admin_email, json } => init::run(admin_email, json),
        Commands::Register { email, password, role, json } => {
            register::run(&email, password, &role, json)
        }
        Commands::Login { email, password, role, path, json } => {
            login::run(&email, password, &role, &path, json)
        }
        Commands::Passwd { id, password } => passwd::run(&id, password),
        Commands::Users { json } => users::run(json),
        Commands::Logs { command } => logs::run(command),
    }
}
