use thiserror::Error;

use crate::model::task::DuplicateId;

/// Failure reported by a [`KeyValueStore`](crate::repository::KeyValueStore).
#[derive(Debug, Error)]
pub enum KvError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum TaskError {
    /// User input failed a rule. Always raised before any storage I/O.
    #[error("{0}")]
    Validation(String),

    #[error("failed to read `{key}`: {source}")]
    StorageRead {
        key: String,
        #[source]
        source: KvError,
    },

    #[error("stored value under `{key}` is not a valid task list: {source}")]
    CorruptData {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write `{key}`: {source}")]
    StorageWrite {
        key: String,
        #[source]
        source: KvError,
    },

    #[error(transparent)]
    Duplicate(#[from] DuplicateId),

    #[error("failed to encode task list: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl TaskError {
    pub fn title_required() -> Self {
        TaskError::Validation("title required".to_string())
    }

    /// Read-side failures; callers may fall back to an empty collection.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TaskError::StorageRead { .. } | TaskError::CorruptData { .. })
    }

    /// Text suitable for a status line or alert.
    pub fn user_message(&self) -> String {
        match self {
            TaskError::Validation(msg) => format!("Validation: {}", capitalize(msg)),
            TaskError::StorageRead { .. } => "Could not read saved tasks.".to_string(),
            TaskError::CorruptData { .. } => "Saved tasks are unreadable; showing an empty list.".to_string(),
            TaskError::StorageWrite { .. } | TaskError::Serialize(_) | TaskError::Duplicate(_) => {
                "Could not save tasks. Please try again.".to_string()
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;
