//! Passwd command - rotate the admin password

use anyhow::Result;

use invoicegen_core::LogEvent;

use super::{block_on, get_context, get_logger, log_event, password_or_prompt};
use crate::output;

pub fn run(id: &str, password: Option<String>) -> Result<()> {
    let logger = get_logger();
    log_event(&logger, LogEvent::new("command_executed").with_command("passwd"));

    let ctx = get_context()?;
    let new_password = password_or_prompt(password, "New admin password", true)?;
    if new_password.is_empty() {
        anyhow::bail!("Password must not be empty");
    }

    if let Err(e) = block_on(ctx.session_gate.change_admin_password(id, &new_password))? {
        log_event(&logger, LogEvent::new("admin_password_update_failed").with_error(e.to_string()));
        return Err(e.into());
    }

    log_event(&logger, LogEvent::new("admin_password_updated"));
    output::success("Admin password updated");
    Ok(())
}
