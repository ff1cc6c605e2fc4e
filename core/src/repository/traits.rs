use async_trait::async_trait;

use crate::error::KvError;

/// Opaque async string-keyed store the task list is persisted in.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError>;
    async fn set(&self, key: &str, value: String) -> Result<(), KvError>;
}
