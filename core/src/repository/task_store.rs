use std::sync::Arc;

use log::{debug, error, warn};

use crate::error::{Result, TaskError};
use crate::model::task::TaskCollection;
use crate::repository::traits::KeyValueStore;

/// Key the whole collection is stored under.
pub const STORAGE_KEY: &str = "tasks";

/// Sole owner of durable task data: one serialized collection under
/// [`STORAGE_KEY`]. Every mutation rewrites the whole collection.
///
/// Cloning is cheap and clones share the underlying store. There is no
/// locking between clones, so two uncoordinated load/save cycles resolve
/// as last write wins.
pub struct TaskStore<S: KeyValueStore> {
    kv: Arc<S>,
}

impl<S: KeyValueStore> Clone for TaskStore<S> {
    fn clone(&self) -> Self {
        Self {
            kv: Arc::clone(&self.kv),
        }
    }
}

impl<S: KeyValueStore> TaskStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv: Arc::new(kv) }
    }

    pub fn from_shared(kv: Arc<S>) -> Self {
        Self { kv }
    }

    /// Absent key reads as an empty collection. An unparsable value is
    /// reported as [`TaskError::CorruptData`].
    pub async fn load(&self) -> Result<TaskCollection> {
        let raw = self
            .kv
            .get(STORAGE_KEY)
            .await
            .map_err(|source| TaskError::StorageRead {
                key: STORAGE_KEY.to_string(),
                source,
            })?;

        match raw {
            None => Ok(TaskCollection::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|source| TaskError::CorruptData {
                key: STORAGE_KEY.to_string(),
                source,
            }),
        }
    }

    /// Like [`load`](Self::load), but recoverable read failures fall back to
    /// an empty collection. The anomaly is logged and handed back so the
    /// caller can surface it.
    pub async fn load_or_empty(&self) -> (TaskCollection, Option<TaskError>) {
        match self.load().await {
            Ok(tasks) => (tasks, None),
            Err(e) if e.is_recoverable() => {
                warn!("event=load_fallback key={} error={}", STORAGE_KEY, e);
                (TaskCollection::new(), Some(e))
            }
            Err(e) => {
                error!("event=load_failed key={} error={}", STORAGE_KEY, e);
                (TaskCollection::new(), Some(e))
            }
        }
    }

    pub async fn save(&self, tasks: &TaskCollection) -> Result<()> {
        let raw = serde_json::to_string(tasks).map_err(TaskError::Serialize)?;
        if let Err(source) = self.kv.set(STORAGE_KEY, raw).await {
            error!("event=save_failed key={} error={}", STORAGE_KEY, source);
            return Err(TaskError::StorageWrite {
                key: STORAGE_KEY.to_string(),
                source,
            });
        }
        debug!("event=save key={} count={}", STORAGE_KEY, tasks.len());
        Ok(())
    }

    /// Loads the collection, applies `transform`, saves the result and
    /// returns it. Nothing is written if the load or the transform fails.
    pub async fn update<F>(&self, transform: F) -> Result<TaskCollection>
    where
        F: FnOnce(&mut TaskCollection) -> Result<()>,
    {
        let mut tasks = self.load().await?;
        transform(&mut tasks)?;
        self.save(&tasks).await?;
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Task;
    use crate::repository::memory::MemoryKeyValueStore;

    #[tokio::test]
    async fn test_empty_store_loads_empty_collection() {
        let store = TaskStore::new(MemoryKeyValueStore::new());
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_after_save_round_trips() {
        let store = TaskStore::new(MemoryKeyValueStore::new());
        let mut tasks = TaskCollection::new();
        tasks.push(Task::new("Buy milk".to_string(), String::new())).unwrap();
        tasks.push(Task::new("Walk dog".to_string(), "twice".to_string())).unwrap();

        store.save(&tasks).await.unwrap();
        assert_eq!(store.load().await.unwrap(), tasks);
    }

    #[tokio::test]
    async fn test_reads_source_wire_format() {
        let raw = r#"[{"id":"1700000000000","title":"Buy milk","description":"","isCompleted":true}]"#;
        let store = TaskStore::new(MemoryKeyValueStore::with_entry(STORAGE_KEY, raw));
        let tasks = store.load().await.unwrap();
        let task = tasks.get("1700000000000").unwrap();
        assert_eq!(task.title, "Buy milk");
        assert!(task.is_completed);
    }

    #[tokio::test]
    async fn test_corrupt_value_is_surfaced() {
        let store = TaskStore::new(MemoryKeyValueStore::with_entry(STORAGE_KEY, "{not json"));
        assert!(matches!(store.load().await, Err(TaskError::CorruptData { .. })));

        let (tasks, anomaly) = store.load_or_empty().await;
        assert!(tasks.is_empty());
        assert!(matches!(anomaly, Some(TaskError::CorruptData { .. })));
    }

    #[tokio::test]
    async fn test_update_does_not_overwrite_corrupt_value() {
        let kv = Arc::new(MemoryKeyValueStore::with_entry(STORAGE_KEY, "oops"));
        let store = TaskStore::from_shared(Arc::clone(&kv));
        let result = store
            .update(|tasks| {
                tasks.push(Task::new("x".to_string(), String::new())).ok();
                Ok(())
            })
            .await;
        assert!(result.is_err());
        assert_eq!(kv.get(STORAGE_KEY).await.unwrap().as_deref(), Some("oops"));
    }
}
