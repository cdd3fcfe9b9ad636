//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};

pub fn success(msg: &str) {
    println!("{}", msg.green());
}

pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// One-time notice for a freshly generated admin password
pub fn temp_password_notice(email: &str, temp_password: &str) {
    warning(&format!("Temporary admin password: {}", temp_password.bold()));
    warning(&format!("Admin email: {}", email));
    warning("Please change this password after logging in (ig passwd).");
}
