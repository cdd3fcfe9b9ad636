//! Users command - list registered accounts

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use super::{block_on, get_context};
use crate::output;

/// Account as shown to the operator; passwords are never printed
#[derive(Serialize)]
struct UserRow {
    id: String,
    email: String,
    role: String,
}

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let credentials = ctx.session_gate.credentials();

    let (admin, users) = block_on(async {
        let admin = credentials.admin().await?;
        let users = credentials.list_users().await?;
        Ok::<_, invoicegen_core::Error>((admin, users))
    })??;

    let rows: Vec<UserRow> = admin
        .into_iter()
        .chain(users)
        .map(|u| UserRow {
            id: u.id,
            email: u.email,
            role: u.role.to_string(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No users yet. Run 'ig init' to create the admin user.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Email", "Role", "ID"]);
    for row in &rows {
        table.add_row(vec![row.email.clone(), row.role.clone(), row.id.clone()]);
    }
    println!("{}", "Users".bold());
    println!("{}", table);

    Ok(())
}
