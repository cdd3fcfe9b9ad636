//! In-memory key-value store
//!
//! Nothing survives the process. Used by tests and throwaway sessions.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::domain::result::Result;
use crate::ports::KeyValueStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = MemoryStore::new();
        assert!(store.get("admin").await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_set_replaces_value() {
        let store = MemoryStore::new();
        store.set("users", json!({"a": 1})).await.unwrap();
        store.set("users", json!({"b": 2})).await.unwrap();

        assert_eq!(store.get("users").await.unwrap(), Some(json!({"b": 2})));
        assert_eq!(store.len().await, 1);
    }
}
