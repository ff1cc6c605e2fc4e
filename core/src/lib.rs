pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod navigation;
pub mod repository;

pub use config::AppConfig;
pub use controller::{EditMode, FormState, TaskEditController, TaskListController};
pub use error::{KvError, Result, TaskError};
pub use model::filter::{apply_filter, FilterMode};
pub use model::task::{Task, TaskCollection};
pub use navigation::{NavSignal, Navigator, Route};
pub use repository::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, TaskStore, STORAGE_KEY};
