//! DuckDB key-value store
//!
//! Entries live in a single `kv_entries` table keyed by (namespace, key).
//! Values are stored as JSON text.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use duckdb::{params, Connection};
use serde_json::Value;

use crate::domain::result::{Error, Result};
use crate::migrations::MIGRATIONS;
use crate::ports::KeyValueStore;
use crate::services::{MigrationResult, MigrationService};

/// Maximum number of attempts when the database file is locked
const MAX_RETRIES: u32 = 5;

/// Initial retry delay in milliseconds (doubles each retry: 50, 100, 200, 400ms)
const INITIAL_RETRY_DELAY_MS: u64 = 50;

/// Check if an error message indicates a file locking issue that should be retried
fn is_retryable_error(err_msg: &str) -> bool {
    let lower = err_msg.to_lowercase();
    // Windows
    lower.contains("being used by another process")
        || lower.contains("cannot access the file")
        // Unix/macOS
        || lower.contains("resource temporarily unavailable")
        || lower.contains("database is locked")
        || lower.contains("file is already open")
}

pub struct DuckDbStore {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
    namespace: String,
}

impl DuckDbStore {
    /// Open (or create) the store file and bring its schema up to date
    ///
    /// Opening is retried with exponential backoff while another process
    /// holds the file lock.
    pub fn open(db_path: &Path, namespace: impl Into<String>) -> Result<Self> {
        let mut attempt = 0;
        let conn = loop {
            match Self::try_open_connection(db_path) {
                Ok(conn) => break conn,
                Err(e) => {
                    let err_msg = e.to_string();
                    attempt += 1;
                    if !is_retryable_error(&err_msg) || attempt >= MAX_RETRIES {
                        return Err(Error::store(err_msg));
                    }
                    let delay = Duration::from_millis(INITIAL_RETRY_DELAY_MS * 2u64.pow(attempt - 1));
                    tracing::warn!(
                        path = %db_path.display(),
                        attempt,
                        max = MAX_RETRIES,
                        "store busy, retrying in {}ms: {}",
                        delay.as_millis(),
                        err_msg
                    );
                    thread::sleep(delay);
                }
            }
        };

        let store = Self {
            conn: Mutex::new(conn),
            db_path: Some(db_path.to_path_buf()),
            namespace: namespace.into(),
        };
        store.run_migrations()?;
        Ok(store)
    }

    /// Store backed by an in-memory DuckDB database
    pub fn open_in_memory(namespace: impl Into<String>) -> Result<Self> {
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        let store = Self {
            conn: Mutex::new(Connection::open_in_memory_with_flags(config)?),
            db_path: None,
            namespace: namespace.into(),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn try_open_connection(db_path: &Path) -> duckdb::Result<Connection> {
        // Cached extensions are never needed; keep autoload off
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        Connection::open_with_flags(db_path, config)
    }

    /// Apply pending schema migrations
    pub fn run_migrations(&self) -> Result<MigrationResult> {
        let conn = self.lock()?;
        MigrationService::new(&conn, MIGRATIONS).run_pending()
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| Error::store(format!("Lock poisoned: {}", e)))
    }

    fn read(&self, key: &str) -> Result<Option<Value>> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT value FROM kv_entries WHERE namespace = ? AND key = ?")?;
        let mut rows = stmt.query(params![self.namespace, key])?;

        match rows.next()? {
            Some(row) => {
                let raw: String = row.get(0)?;
                let value = serde_json::from_str(&raw)
                    .map_err(|e| Error::store(format!("Corrupt entry '{}': {}", key, e)))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn write(&self, key: &str, value: &Value) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        let conn = self.lock()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO kv_entries (namespace, key, value, updated_at)
            VALUES (?, ?, ?, current_timestamp)
            "#,
            params![self.namespace, key, raw],
        )?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for DuckDbStore {
    async fn ready(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute_batch("SELECT 1")?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Value>> {
        self.read(key)
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.write(key, &value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = DuckDbStore::open_in_memory("users").unwrap();
        store.set("admin", json!({"id": "admin-id"})).await.unwrap();

        let value = store.get("admin").await.unwrap();
        assert_eq!(value, Some(json!({"id": "admin-id"})));
        assert!(store.get("users").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = DuckDbStore::open_in_memory("users").unwrap();
        store.set("k", json!(1)).await.unwrap();
        store.set("k", json!(2)).await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), Some(json!(2)));
    }

    #[tokio::test]
    async fn test_namespaces_are_isolated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.duckdb");

        {
            let users = DuckDbStore::open(&path, "users").unwrap();
            users.set("admin", json!("a")).await.unwrap();
        }

        let other = DuckDbStore::open(&path, "other").unwrap();
        assert!(other.get("admin").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.duckdb");

        {
            let store = DuckDbStore::open(&path, "users").unwrap();
            store.ready().await.unwrap();
            store.set("users", json!({"a@x.com": {"id": "1"}})).await.unwrap();
        }

        let store = DuckDbStore::open(&path, "users").unwrap();
        assert_eq!(store.db_path(), Some(path.as_path()));
        let value = store.get("users").await.unwrap().unwrap();
        assert_eq!(value["a@x.com"]["id"], "1");
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let store = DuckDbStore::open_in_memory("users").unwrap();
        let again = store.run_migrations().unwrap();
        assert!(again.applied.is_empty());
        assert_eq!(again.already_applied, MIGRATIONS.len());
    }

    #[test]
    fn test_retryable_errors() {
        assert!(is_retryable_error("IO Error: Database is locked"));
        assert!(!is_retryable_error("Catalog Error: table does not exist"));
    }
}
