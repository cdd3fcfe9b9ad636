//! Dashboard shell rendering - sidebar, header and active panel

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use invoicegen_core::domain::{DashboardSummary, MenuItem, SIDEBAR};
use invoicegen_core::{Panel, SessionState};

use crate::output;

fn render_item(item: &MenuItem, active_path: &str) {
    let label = if item.is_active(active_path) {
        format!("▸ {}", item.label).green().bold().to_string()
    } else {
        format!("  {}", item.label)
    };
    println!("  {}", label);

    // Sub-items unfold only while their parent is active
    if item.has_children() && item.is_active(active_path) {
        for child in item.children {
            let label = if child.is_active_child(active_path) {
                format!("▸ {}", child.label).green().to_string()
            } else {
                format!("  {}", child.label)
            };
            println!("      {}", label);
        }
    }
}

fn render_sidebar(active_path: &str) {
    for section in SIDEBAR {
        println!("{}", section.title.dimmed());
        for item in section.items {
            render_item(item, active_path);
        }
        println!();
    }
}

fn render_panel(panel: Panel) {
    match panel {
        Panel::Dashboard => {
            let summary = DashboardSummary::default();
            println!("{}", "Dashboard".bold());
            println!("Welcome to the invoice generator dashboard.");
            let mut table = output::create_table();
            table.set_header(vec!["Total Invoices", "Total Customers", "Total Revenue"]);
            table.add_row(vec![
                summary.total_invoices.to_string(),
                summary.total_customers.to_string(),
                summary.total_revenue,
            ]);
            println!("{}", table);
        }
        Panel::Customers | Panel::AddCustomer | Panel::CustomerList => {
            println!("{}", panel.title().bold());
            println!("No customers yet.");
        }
        Panel::Blank => println!("{}", "Nothing here yet.".dimmed()),
        Panel::Login => println!("{}", "Not logged in.".dimmed()),
    }
}

/// Print the shell for `state`, or its JSON description
pub fn render(state: &SessionState, json: bool) -> Result<()> {
    if json {
        let out = json!({
            "authenticated": state.is_authenticated(),
            "role": state.role(),
            "active_path": state.active_path(),
            "panel": state.panel(),
            "error": state.error(),
            "sidebar": SIDEBAR,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if let Some(err) = state.error() {
        output::error(err);
    }

    let Some(role) = state.role() else {
        render_panel(Panel::Login);
        return Ok(());
    };

    println!("{} {}", "Logged in as".dimmed(), role.to_string().bold());
    println!();
    render_sidebar(state.active_path());
    render_panel(state.panel());
    Ok(())
}
