//! Key-value store port - persistence abstraction

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::domain::result::Result;

/// Durable key-value storage
///
/// A single namespace partitioned by string keys. Adapters report every
/// failure as `Error::Store`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Wait until the backend can serve requests
    async fn ready(&self) -> Result<()> {
        Ok(())
    }

    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: Value) -> Result<()>;
}

/// Read and decode a typed value
pub async fn get_typed<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>> {
    match store.get(key).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Encode and store a typed value
pub async fn set_typed<T: Serialize + Sync>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    store.set(key, serde_json::to_value(value)?).await
}
