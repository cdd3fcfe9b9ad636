//! Login command - verify credentials and open the shell

use anyhow::{bail, Result};

use invoicegen_core::{LogEvent, Role, SessionState};

use super::{block_on, get_context, get_logger, log_event, password_or_prompt, shell};
use crate::output;

pub fn run(email: &str, password: Option<String>, role: &str, path: &str, json: bool) -> Result<()> {
    let logger = get_logger();
    log_event(&logger, LogEvent::new("command_executed").with_command("login"));

    let role: Role = role.parse()?;
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

    let password = password_or_prompt(password, "Password", false)?;
    let state = block_on(gate.submit_login(state, email, &password, role))?;

    if !state.is_authenticated() {
        log_event(
            &logger,
            LogEvent::new("login_rejected")
                .with_role(role)
                .with_error(state.error().unwrap_or_default()),
        );
        shell::render(&state, json)?;
        bail!("Login failed");
    }

    let state = state.navigate(path);
    log_event(
        &logger,
        LogEvent::new("login_succeeded")
            .with_role(role)
            .with_page(state.active_path()),
    );

    shell::render(&state, json)
}
