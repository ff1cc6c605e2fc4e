use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// One to-do item as it is persisted under the `tasks` key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
}

impl Task {
    pub fn new(title: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            is_completed: false,
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_completed {
            "Completed"
        } else {
            "Pending"
        }
    }
}

/// Mints an id that is not already used in `collection`.
pub fn mint_id(collection: &TaskCollection) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !collection.contains(&id) {
            return id;
        }
    }
}

/// The full ordered set of tasks, persisted as one unit.
///
/// Insertion order is preserved and ids are unique; both are enforced on
/// every path that builds a collection, including deserialization.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct TaskCollection {
    tasks: Vec<Task>,
}

impl TaskCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection, rejecting the first duplicate id found.
    pub fn from_tasks(tasks: Vec<Task>) -> Result<Self, DuplicateId> {
        let mut seen = HashSet::with_capacity(tasks.len());
        for task in &tasks {
            if !seen.insert(task.id.as_str()) {
                return Err(DuplicateId(task.id.clone()));
            }
        }
        Ok(Self { tasks })
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.id.as_str()).collect()
    }

    pub fn push(&mut self, task: Task) -> Result<(), DuplicateId> {
        if self.contains(&task.id) {
            return Err(DuplicateId(task.id));
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Swaps in `task` at the position of the entry with the same id.
    /// Returns `false` (and leaves the collection alone) when there is none.
    pub fn replace(&mut self, task: Task) -> bool {
        match self.tasks.iter().position(|t| t.id == task.id) {
            Some(pos) => {
                self.tasks[pos] = task;
                true
            }
            None => false,
        }
    }

}

impl<'de> Deserialize<'de> for TaskCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tasks = Vec::<Task>::deserialize(deserializer)?;
        TaskCollection::from_tasks(tasks).map_err(serde::de::Error::custom)
    }
}

impl FromIterator<Task> for TaskCollection {
    /// Keeps the first occurrence of each id; later duplicates are dropped
    /// silently. Mapping over an existing collection relies on this never
    /// failing, since its ids are already unique.
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        let mut collection = TaskCollection::new();
        for task in iter {
            let _ = collection.push(task);
        }
        collection
    }
}

impl IntoIterator for TaskCollection {
    type Item = Task;
    type IntoIter = std::vec::IntoIter<Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.into_iter()
    }
}

impl<'a> IntoIterator for &'a TaskCollection {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("duplicate task id `{0}`")]
pub struct DuplicateId(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, title: &str) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            is_completed: false,
        }
    }

    #[test]
    fn test_new_task_is_pending_with_fresh_id() {
        let a = Task::new("Buy milk".to_string(), String::new());
        let b = Task::new("Buy milk".to_string(), String::new());
        assert!(!a.is_completed);
        assert_ne!(a.id, b.id);
        assert_eq!(a.status_label(), "Pending");
    }

    #[test]
    fn test_serializes_with_camel_case_fields() {
        let json = serde_json::to_value(task("1", "Buy milk")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1",
                "title": "Buy milk",
                "description": "",
                "isCompleted": false,
            })
        );
    }

    #[test]
    fn test_collection_rejects_duplicate_ids() {
        let mut c = TaskCollection::new();
        c.push(task("1", "a")).unwrap();
        assert_eq!(c.push(task("1", "b")), Err(DuplicateId("1".to_string())));
        assert_eq!(c.len(), 1);

        let raw = r#"[{"id":"1","title":"a","description":"","isCompleted":false},
                      {"id":"1","title":"b","description":"","isCompleted":true}]"#;
        assert!(serde_json::from_str::<TaskCollection>(raw).is_err());
    }

    #[test]
    fn test_collect_drops_later_duplicates() {
        let c: TaskCollection = vec![task("1", "first"), task("2", "b"), task("1", "second")]
            .into_iter()
            .collect();
        assert_eq!(c.ids(), vec!["1", "2"]);
        assert_eq!(c.get("1").unwrap().title, "first");
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut c: TaskCollection = vec![task("1", "a"), task("2", "b"), task("3", "c")]
            .into_iter()
            .collect();
        assert!(c.replace(task("2", "B")));
        assert_eq!(c.ids(), vec!["1", "2", "3"]);
        assert_eq!(c.get("2").unwrap().title, "B");
        assert!(!c.replace(task("9", "z")));
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn test_mint_id_avoids_existing() {
        let c: TaskCollection = vec![task("1", "a")].into_iter().collect();
        let id = mint_id(&c);
        assert!(!c.contains(&id));
    }
}
