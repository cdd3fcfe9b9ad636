//! Store migrations - embedded SQL files
//!
//! Each migration is a tuple of (name, sql_content), applied in order.

/// All store migrations, embedded at compile time.
///
/// When adding a new migration, create `NNN_description.sql` and append an
/// entry here.
pub const MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("000_migrations.sql")),
    ("001_kv_entries.sql", include_str!("001_kv_entries.sql")),
];
