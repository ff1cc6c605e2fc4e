pub mod task_edit;
pub mod task_list;

pub use task_edit::{commit_form, prepare, validate, EditMode, FormState, TaskEditController};
pub use task_list::{TaskListController, EMPTY_LIST_MESSAGE};
