//! Init command - create the store and bootstrap the admin user

use anyhow::Result;
use serde_json::json;

use invoicegen_core::config::Config;
use invoicegen_core::services::INIT_FAILED_MESSAGE;
use invoicegen_core::LogEvent;

use super::{block_on, get_app_dir, get_context, get_logger, log_event};
use crate::output;

/// Persist the admin email to settings.json before the context opens
fn save_admin_email(admin_email: &str) -> Result<()> {
    let app_dir = get_app_dir()?;
    std::fs::create_dir_all(&app_dir)?;
    let mut config = Config::load(&app_dir)?;
    config.admin_email = admin_email.to_string();
    config.save(&app_dir)
}

pub fn run(admin_email: Option<String>, json: bool) -> Result<()> {
    let logger = get_logger();
    log_event(&logger, LogEvent::new("command_executed").with_command("init"));

    if let Some(admin_email) = admin_email.as_deref() {
        save_admin_email(admin_email)?;
    }

    let ctx = get_context()?;
    let temp_password = match block_on(ctx.session_gate.initialize())? {
        Ok(temp_password) => temp_password,
        Err(e) => {
            log_event(
                &logger,
                LogEvent::new("init_failed")
                    .with_error(INIT_FAILED_MESSAGE)
                    .with_error_details(e.to_string()),
            );
            return Err(e.into());
        }
    };

    if admin_email.is_some() && temp_password.is_none() && !json {
        output::warning("Admin user already exists; the new email applies to a fresh store only.");
    }

    if temp_password.is_some() {
        log_event(&logger, LogEvent::new("admin_bootstrapped"));
    }

    if json {
        let out = json!({
            "admin_email": ctx.session_gate.credentials().admin_email(),
            "admin_created": temp_password.is_some(),
            "temp_password": temp_password,
            "store_path": ctx.store.db_path(),
            "namespace": ctx.store.namespace(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    match temp_password {
        Some(temp_password) => {
            output::success("Admin user created");
            output::temp_password_notice(ctx.session_gate.credentials().admin_email(), &temp_password);
        }
        None => println!("Admin user already exists. Nothing to do."),
    }

    Ok(())
}
