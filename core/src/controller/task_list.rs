use log::{info, warn};

use crate::error::{Result, TaskError};
use crate::model::filter::{apply_filter, FilterMode};
use crate::model::task::{Task, TaskCollection};
use crate::repository::{KeyValueStore, TaskStore};

pub const EMPTY_LIST_MESSAGE: &str = "No tasks found.";

/// Backs the task list screen: reloads on activation, filters by status and
/// marks tasks completed.
///
/// The collection held here is a transient copy. It is only refreshed by
/// [`activate`](Self::activate), so edits saved elsewhere after the last
/// activation are not seen by [`mark_completed`](Self::mark_completed) and
/// are overwritten by its save.
pub struct TaskListController<S: KeyValueStore> {
    store: TaskStore<S>,
    tasks: TaskCollection,
    filter: FilterMode,
    load_warning: Option<TaskError>,
}

impl<S: KeyValueStore> TaskListController<S> {
    pub fn new(store: TaskStore<S>) -> Self {
        Self {
            store,
            tasks: TaskCollection::new(),
            filter: FilterMode::default(),
            load_warning: None,
        }
    }

    /// Reloads from the store. Call every time the screen becomes active.
    /// Unreadable data falls back to an empty list; see [`load_warning`](Self::load_warning).
    pub async fn activate(&mut self) -> &TaskCollection {
        let (tasks, anomaly) = self.store.load_or_empty().await;
        self.tasks = tasks;
        self.load_warning = anomaly;
        &self.tasks
    }

    pub async fn refresh(&mut self) -> &TaskCollection {
        self.activate().await
    }

    /// Why the last activation showed an empty list instead of stored data.
    pub fn load_warning(&self) -> Option<&TaskError> {
        self.load_warning.as_ref()
    }

    pub fn tasks(&self) -> &TaskCollection {
        &self.tasks
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn set_filter(&mut self, mode: FilterMode) {
        self.filter = mode;
    }

    pub fn apply_filter(collection: &TaskCollection, mode: FilterMode) -> TaskCollection {
        apply_filter(collection, mode)
    }

    /// The current collection under the current filter.
    pub fn visible(&self) -> TaskCollection {
        apply_filter(&self.tasks, self.filter)
    }

    /// Only pending rows offer the completion action.
    pub fn can_mark_completed(task: &Task) -> bool {
        !task.is_completed
    }

    /// Sets `is_completed` on the in-memory entry with `id` and saves the whole
    /// collection. An unknown or already completed id is a no-op, not an error.
    /// The view only adopts the new collection once the save has succeeded.
    ///
    /// After an activation that fell back to an empty list nothing is written,
    /// so data that could not be read is never replaced.
    pub async fn mark_completed(&mut self, id: &str) -> Result<TaskCollection> {
        if let Some(anomaly) = &self.load_warning {
            warn!("event=complete_skipped id={} reason={}", id, anomaly);
            return Ok(self.tasks.clone());
        }

        let updated: TaskCollection = self
            .tasks
            .iter()
            .cloned()
            .map(|mut t| {
                if t.id == id {
                    t.is_completed = true;
                }
                t
            })
            .collect();

        self.store.save(&updated).await?;
        info!("event=task_completed id={}", id);
        self.tasks = updated.clone();
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryKeyValueStore;

    fn seeded(tasks: &[(&str, bool)]) -> TaskStore<MemoryKeyValueStore> {
        let collection: TaskCollection = tasks
            .iter()
            .map(|(id, done)| Task {
                id: id.to_string(),
                title: format!("task {}", id),
                description: String::new(),
                is_completed: *done,
            })
            .collect();
        let raw = serde_json::to_string(&collection).unwrap();
        TaskStore::new(MemoryKeyValueStore::with_entry(crate::repository::STORAGE_KEY, &raw))
    }

    #[tokio::test]
    async fn test_activate_loads_and_filters() {
        let mut controller = TaskListController::new(seeded(&[("a", false), ("b", true)]));
        assert!(controller.tasks().is_empty());

        controller.activate().await;
        assert_eq!(controller.visible().ids(), vec!["a", "b"]);

        controller.set_filter(FilterMode::Pending);
        assert_eq!(controller.visible().ids(), vec!["a"]);
        assert_eq!(controller.tasks().len(), 2);
    }

    #[tokio::test]
    async fn test_mark_completed_is_idempotent() {
        let store = seeded(&[("a", false), ("b", false)]);
        let mut controller = TaskListController::new(store.clone());
        controller.activate().await;

        let once = controller.mark_completed("a").await.unwrap();
        let twice = controller.mark_completed("a").await.unwrap();
        assert_eq!(once, twice);
        assert!(twice.get("a").unwrap().is_completed);
        assert!(!twice.get("b").unwrap().is_completed);
        assert_eq!(store.load().await.unwrap(), twice);
    }

    #[tokio::test]
    async fn test_mark_completed_unknown_id_is_noop() {
        let store = seeded(&[("a", false)]);
        let mut controller = TaskListController::new(store.clone());
        let before = controller.activate().await.clone();

        let after = controller.mark_completed("missing").await.unwrap();
        assert_eq!(after, before);
        assert_eq!(store.load().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_corrupt_store_activates_empty_with_warning() {
        let store = TaskStore::new(MemoryKeyValueStore::with_entry(crate::repository::STORAGE_KEY, "[{"));
        let mut controller = TaskListController::new(store);
        assert!(controller.activate().await.is_empty());
        assert!(controller.load_warning().is_some_and(|e| e.is_recoverable()));
    }

    #[tokio::test]
    async fn test_mark_completed_after_fallback_writes_nothing() {
        let raw = r#"[{"id":"1","title":"Buy milk","description":"","isCompleted":false}"#;
        let kv = std::sync::Arc::new(MemoryKeyValueStore::with_entry(crate::repository::STORAGE_KEY, raw));
        let mut controller = TaskListController::new(TaskStore::from_shared(kv.clone()));
        controller.activate().await;
        assert!(controller.load_warning().is_some());

        let after = controller.mark_completed("1").await.unwrap();
        assert!(after.is_empty());
        assert_eq!(kv.get(crate::repository::STORAGE_KEY).await.unwrap().as_deref(), Some(raw));
    }

    #[test]
    fn test_only_pending_rows_offer_completion() {
        let mut task = Task::new("x".to_string(), String::new());
        assert!(TaskListController::<MemoryKeyValueStore>::can_mark_completed(&task));
        task.is_completed = true;
        assert!(!TaskListController::<MemoryKeyValueStore>::can_mark_completed(&task));
    }
}
