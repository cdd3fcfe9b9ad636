//! CLI command implementations

pub mod init;
pub mod login;
pub mod logs;
pub mod passwd;
pub mod register;
pub mod shell;
pub mod users;

use std::future::Future;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dialoguer::Password;
use invoicegen_core::{InvoiceContext, LogEvent, LoggingService};

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize; logging never blocks a command.
pub fn get_logger() -> Option<LoggingService> {
    let app_dir = get_app_dir().ok()?;
    std::fs::create_dir_all(&app_dir).ok()?;
    LoggingService::new(&app_dir, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Application directory from INVOICEGEN_DIR, or ~/.invoicegen
pub fn get_app_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("INVOICEGEN_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".invoicegen"))
        .context("Could not find home directory; set INVOICEGEN_DIR")
}

/// Open the application context, creating the directory on first use
pub fn get_context() -> Result<InvoiceContext> {
    let app_dir = get_app_dir()?;
    std::fs::create_dir_all(&app_dir)
        .with_context(|| format!("Failed to create app directory: {:?}", app_dir))?;

    InvoiceContext::new(&app_dir).context("Failed to initialize invoicegen context")
}

/// Drive one async credential operation to completion
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    Ok(runtime.block_on(future))
}

/// Use the given password or prompt for one
pub fn password_or_prompt(password: Option<String>, prompt: &str, confirm: bool) -> Result<String> {
    if let Some(p) = password {
        return Ok(p);
    }
    let mut input = Password::new().with_prompt(prompt);
    if confirm {
        input = input.with_confirmation("Confirm password", "Passwords do not match");
    }
    Ok(input.interact()?)
}
