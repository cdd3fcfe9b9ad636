//! Logging service - usage events persisted to logs.duckdb
//!
//! Events carry a name plus optional role, page and command context. Emails
//! and passwords are never recorded.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use chrono::Utc;
use duckdb::Connection;
use serde::{Deserialize, Serialize};

use crate::domain::Role;
use crate::log_migrations::LOG_MIGRATIONS;
use crate::services::MigrationService;

/// Counter for unique ids within the same millisecond
static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Timestamp in the high 48 bits, counter in the low 16
fn generate_id() -> u64 {
    let timestamp = now_ms() as u64;
    let counter = ID_COUNTER.fetch_add(1, Ordering::Relaxed) & 0xFFFF;
    (timestamp << 16) | counter
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn detect_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "linux") {
        "linux"
    } else {
        "unknown"
    }
}

/// A log event to be recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
}

impl LogEvent {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            role: None,
            page: None,
            command: None,
            error_message: None,
            error_details: None,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role.as_str().to_string());
        self
    }

    /// Active shell path when the event happened
    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn with_error_details(mut self, details: impl Into<String>) -> Self {
        self.error_details = Some(details.into());
        self
    }
}

/// A log entry as stored in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: i64,
    pub app_version: String,
    pub platform: String,
    pub event: String,
    pub role: Option<String>,
    pub page: Option<String>,
    pub command: Option<String>,
    pub error_message: Option<String>,
    pub error_details: Option<String>,
}

const ENTRY_COLUMNS: &str = "id, timestamp, app_version, platform, event, role, page, command, error_message, error_details";

pub struct LoggingService {
    conn: Mutex<Connection>,
    db_path: PathBuf,
    app_version: String,
    platform: &'static str,
}

impl LoggingService {
    /// Open or create logs.duckdb in `app_dir` and apply pending migrations
    pub fn new(app_dir: &Path, app_version: impl Into<String>) -> Result<Self> {
        let db_path = app_dir.join("logs.duckdb");
        let conn = Connection::open(&db_path)?;
        MigrationService::new(&conn, LOG_MIGRATIONS).run_pending()?;

        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
            app_version: app_version.into(),
            platform: detect_platform(),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))
    }

    /// Record an event; version and platform are filled in automatically
    pub fn log(&self, event: LogEvent) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            &format!(
                "INSERT INTO sys_logs ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                ENTRY_COLUMNS
            ),
            duckdb::params![
                generate_id(),
                now_ms(),
                &self.app_version,
                self.platform,
                &event.event,
                &event.role,
                &event.page,
                &event.command,
                &event.error_message,
                &event.error_details,
            ],
        )?;
        Ok(())
    }

    /// Most recent entries first
    pub fn get_recent(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.query_entries("", limit)
    }

    /// Most recent entries carrying an error message
    pub fn get_errors(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.query_entries("WHERE error_message IS NOT NULL", limit)
    }

    fn query_entries(&self, filter: &str, limit: usize) -> Result<Vec<LogEntry>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM sys_logs {} ORDER BY timestamp DESC, id DESC LIMIT ?",
            ENTRY_COLUMNS, filter
        ))?;

        let entries = stmt
            .query_map([limit as i64], |row| {
                Ok(LogEntry {
                    id: row.get(0)?,
                    timestamp: row.get(1)?,
                    app_version: row.get(2)?,
                    platform: row.get(3)?,
                    event: row.get(4)?,
                    role: row.get(5)?,
                    page: row.get(6)?,
                    command: row.get(7)?,
                    error_message: row.get(8)?,
                    error_details: row.get(9)?,
                })
            })?
            .collect::<duckdb::Result<Vec<_>>>()?;

        Ok(entries)
    }

    pub fn count(&self) -> Result<u64> {
        let conn = self.lock()?;
        let count: u64 = conn.query_row("SELECT COUNT(*) FROM sys_logs", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Number of entries carrying an error message
    pub fn count_errors(&self) -> Result<u64> {
        let conn = self.lock()?;
        let count: u64 = conn.query_row(
            "SELECT COUNT(*) FROM sys_logs WHERE error_message IS NOT NULL",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Delete entries older than `timestamp_ms` (unix ms)
    pub fn delete_before(&self, timestamp_ms: i64) -> Result<u64> {
        let conn = self.lock()?;
        let deleted = conn.execute("DELETE FROM sys_logs WHERE timestamp < ?", [timestamp_ms])?;
        Ok(deleted as u64)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_logging_service_creation() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), "1.0.0").unwrap();
        assert!(service.db_path().exists());
    }

    #[test]
    fn test_id_layout() {
        let before = now_ms() as u64;
        let id = generate_id();
        let after = now_ms() as u64;

        let timestamp = id >> 16;
        assert!(timestamp >= before && timestamp <= after);
        assert_ne!(generate_id(), id);
    }

    #[test]
    fn test_log_event() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), "1.0.0").unwrap();

        service.log(LogEvent::new("app_initialized")).unwrap();

        let entries = service.get_recent(10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event, "app_initialized");
        assert_eq!(entries[0].app_version, "1.0.0");
    }

    #[test]
    fn test_log_with_context() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), "1.0.0").unwrap();

        service
            .log(
                LogEvent::new("login_succeeded")
                    .with_role(Role::Team)
                    .with_page("/customers")
                    .with_command("login"),
            )
            .unwrap();

        let entries = service.get_recent(10).unwrap();
        assert_eq!(entries[0].role.as_deref(), Some("team"));
        assert_eq!(entries[0].page.as_deref(), Some("/customers"));
        assert_eq!(entries[0].command.as_deref(), Some("login"));
    }

    #[test]
    fn test_log_error() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), "1.0.0").unwrap();

        service.log(LogEvent::new("login_rejected")).unwrap();
        service
            .log(LogEvent::new("registration_failed").with_error("User already exists"))
            .unwrap();

        let errors = service.get_errors(10).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].event, "registration_failed");
        assert!(errors[0].error_details.is_none());
    }

    #[test]
    fn test_count_errors_is_not_capped() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), "1.0.0").unwrap();

        service.log(LogEvent::new("app_initialized")).unwrap();
        for _ in 0..1005 {
            service
                .log(LogEvent::new("login_failed").with_error("store offline"))
                .unwrap();
        }

        assert_eq!(service.count_errors().unwrap(), 1005);
        assert_eq!(service.count().unwrap(), 1006);
    }

    #[test]
    fn test_count_and_delete() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), "1.0.0").unwrap();

        for command in ["init", "login"] {
            service
                .log(LogEvent::new("command_executed").with_command(command))
                .unwrap();
        }
        assert_eq!(service.count().unwrap(), 2);

        let deleted = service.delete_before(now_ms() + 1000).unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_reopen_keeps_entries() {
        let dir = tempdir().unwrap();
        {
            let service = LoggingService::new(dir.path(), "1.0.0").unwrap();
            service.log(LogEvent::new("app_initialized")).unwrap();
        }
        let service = LoggingService::new(dir.path(), "1.0.1").unwrap();
        assert_eq!(service.count().unwrap(), 1);
    }
}
