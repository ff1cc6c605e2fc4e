pub mod file;
pub mod memory;
pub mod task_store;
pub mod traits;

// Re-export
pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use task_store::{TaskStore, STORAGE_KEY};
pub use traits::KeyValueStore;
