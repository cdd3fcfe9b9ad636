//! Register command - create a user and log them in

use anyhow::{bail, Result};

use invoicegen_core::{LogEvent, Role, SessionState};

use super::{block_on, get_context, get_logger, log_event, password_or_prompt, shell};
use crate::output;

pub fn run(email: &str, password: Option<String>, role: &str, json: bool) -> Result<()> {
    let logger = get_logger();
    log_event(&logger, LogEvent::new("command_executed").with_command("register"));

    let role: Role = role.parse()?;
    if role == Role::Admin && !json {
        output::warning("Registering with the admin role; no authorization check applies.");
    }

    let ctx = get_context()?;
    let gate = &ctx.session_gate;
    let state = block_on(gate.start(SessionState::new()))?;
    if let Some(temp_password) = state.temp_password() {
        log_event(&logger, LogEvent::new("admin_bootstrapped"));
        if !json {
            output::temp_password_notice(gate.credentials().admin_email(), temp_password);
        }
    }
    if state.error().is_some() {
        shell::render(&state, json)?;
        bail!("Initialization failed");
    }

    let password = password_or_prompt(password, "Password", true)?;
    let state = block_on(gate.submit_registration(state, email, &password, role))?;

    if let Some(message) = state.error() {
        log_event(
            &logger,
            LogEvent::new("registration_failed")
                .with_role(role)
                .with_error(message),
        );
        shell::render(&state, json)?;
        bail!("Registration failed");
    }

    log_event(&logger, LogEvent::new("user_registered").with_role(role));
    if !json {
        output::success(&format!("Registered {}", email));
    }
    shell::render(&state, json)
}
