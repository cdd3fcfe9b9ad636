//! InvoiceGen Core - credential gate and session shell for the invoice manager
//!
//! Laid out in hexagonal style:
//!
//! - **domain**: user records, session state, navigation model
//! - **ports**: the key-value store capability
//! - **services**: credential store, session gate, event log
//! - **adapters**: DuckDB-backed and in-memory stores

pub mod adapters;
pub mod config;
pub mod domain;
mod log_migrations;
mod migrations;
pub mod ports;
pub mod services;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use adapters::DuckDbStore;
use config::Config;
use services::{CredentialStore, SessionGate};

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::{Panel, Role, SessionState, User};
pub use services::{LogEntry, LogEvent, LoggingService};

/// File holding the key-value store inside the application directory
pub const STORE_FILENAME: &str = "invoicegen.duckdb";

/// Main context for InvoiceGen operations
///
/// Holds the configuration, the durable store and the session gate built
/// on top of it.
pub struct InvoiceContext {
    pub config: Config,
    pub store: Arc<DuckDbStore>,
    pub session_gate: SessionGate,
    app_dir: PathBuf,
}

impl InvoiceContext {
    pub fn new(app_dir: &Path) -> Result<Self> {
        let config = Config::load(app_dir)?;

        let db_path = app_dir.join(STORE_FILENAME);
        let store = Arc::new(
            DuckDbStore::open(&db_path, config.store_name.clone())
                .with_context(|| format!("Failed to open store at {}", db_path.display()))?,
        );

        let credentials = CredentialStore::new(store.clone(), config.admin_email.clone())
            .with_temp_password_length(config.temp_password_length);
        let session_gate = SessionGate::new(credentials);

        Ok(Self {
            config,
            store,
            session_gate,
            app_dir: app_dir.to_path_buf(),
        })
    }

    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }
}
