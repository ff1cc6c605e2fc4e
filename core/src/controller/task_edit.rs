use log::{info, warn};

use crate::error::{Result, TaskError};
use crate::model::task::{mint_id, Task, TaskCollection};
use crate::repository::{KeyValueStore, TaskStore};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Create,
    Update,
}

impl EditMode {
    pub fn submit_label(self) -> &'static str {
        match self {
            EditMode::Create => "Add Task",
            EditMode::Update => "Update Task",
        }
    }
}

/// Initial form fields: copied from `existing` when editing, empty otherwise.
pub fn prepare(existing: Option<&Task>) -> FormState {
    match existing {
        Some(task) => FormState {
            title: task.title.clone(),
            description: task.description.clone(),
        },
        None => FormState::default(),
    }
}

/// The only input rule: a title that is not blank.
pub fn validate(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(TaskError::title_required());
    }
    Ok(())
}

/// Validates `form`, then merges it into the stored collection in a single
/// load/transform/save cycle. With `existing`, the entry with the same id is
/// replaced keeping its id and completion flag. Without it, a new pending
/// task is appended.
///
/// Validation failures return before any storage access.
pub async fn commit_form<S: KeyValueStore>(
    store: &TaskStore<S>,
    form: &FormState,
    existing: Option<&Task>,
) -> Result<TaskCollection> {
    validate(&form.title)?;

    store
        .update(|tasks| {
            match existing {
                Some(original) => {
                    let edited = Task {
                        title: form.title.clone(),
                        description: form.description.clone(),
                        ..original.clone()
                    };
                    if tasks.replace(edited) {
                        info!("event=task_updated id={}", original.id);
                    } else {
                        // Saved unchanged; the entry is gone from storage.
                        warn!("event=edit_target_missing id={}", original.id);
                    }
                }
                None => {
                    let task = Task {
                        id: mint_id(tasks),
                        title: form.title.clone(),
                        description: form.description.clone(),
                        is_completed: false,
                    };
                    info!("event=task_created id={}", task.id);
                    tasks.push(task)?;
                }
            }
            Ok(())
        })
        .await
}

/// Backs the add/edit form screen.
pub struct TaskEditController<S: KeyValueStore> {
    store: TaskStore<S>,
    existing: Option<Task>,
    form: FormState,
}

impl<S: KeyValueStore> TaskEditController<S> {
    /// `existing` is the optional "task" navigation parameter.
    pub fn new(store: TaskStore<S>, existing: Option<Task>) -> Self {
        let form = prepare(existing.as_ref());
        Self {
            store,
            existing,
            form,
        }
    }

    pub fn mode(&self) -> EditMode {
        if self.existing.is_some() {
            EditMode::Update
        } else {
            EditMode::Create
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.form.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.form.description = description.into();
    }

    /// `Ok` means the save went through and the host may navigate back.
    /// Any error means it must stay on the form.
    pub async fn commit(&self) -> Result<TaskCollection> {
        commit_form(&self.store, &self.form, self.existing.as_ref()).await
    }
}
