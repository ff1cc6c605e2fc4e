use ratatui::widgets::TableState;
use tasklist_core::{
    KeyValueStore, NavSignal, Navigator, Route, Task, TaskCollection, TaskEditController,
    TaskListController, TaskStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Title,
    Description,
}

/// The add/edit form while it is on screen.
pub struct FormScreen<S: KeyValueStore> {
    pub controller: TaskEditController<S>,
    pub focus: Focus,
    pub cursor_position: usize,
}

impl<S: KeyValueStore> FormScreen<S> {
    fn new(controller: TaskEditController<S>) -> Self {
        let cursor_position = controller.form().title.chars().count();
        Self {
            controller,
            focus: Focus::Title,
            cursor_position,
        }
    }

    pub fn focused_text(&self) -> &str {
        let form = self.controller.form();
        match self.focus {
            Focus::Title => &form.title,
            Focus::Description => &form.description,
        }
    }

    fn focused_text_mut(&mut self) -> &mut String {
        let form = self.controller.form_mut();
        match self.focus {
            Focus::Title => &mut form.title,
            Focus::Description => &mut form.description,
        }
    }
}

pub struct App<S: KeyValueStore> {
    store: TaskStore<S>,
    pub nav: Navigator,
    pub list: TaskListController<S>,
    pub visible: TaskCollection,
    pub state: TableState,
    pub form: Option<FormScreen<S>>,
    pub status: Option<String>,
}

impl<S: KeyValueStore> App<S> {
    pub async fn new(store: TaskStore<S>) -> App<S> {
        let mut app = App {
            list: TaskListController::new(store.clone()),
            store,
            nav: Navigator::new(),
            visible: TaskCollection::new(),
            state: TableState::default(),
            form: None,
            status: None,
        };
        app.activate_list().await;
        app
    }

    pub fn on_form(&self) -> bool {
        self.form.is_some()
    }

    /// Reloads the list; runs whenever the list screen becomes active.
    async fn activate_list(&mut self) {
        self.list.activate().await;
        self.status = self.list.load_warning().map(|e| e.user_message());
        self.refresh_visible();
    }

    fn refresh_visible(&mut self) {
        self.visible = self.list.visible();
        if self.visible.is_empty() {
            self.state.select(None);
        } else {
            match self.state.selected() {
                Some(i) if i >= self.visible.len() => self.state.select(Some(self.visible.len() - 1)),
                Some(_) => {}
                None => self.state.select(Some(0)),
            }
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.state.selected().and_then(|i| self.visible.iter().nth(i))
    }

    pub fn next(&mut self) {
        if self.visible.is_empty() { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.visible.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.visible.is_empty() { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.visible.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn cycle_filter(&mut self) {
        self.list.set_filter(self.list.filter().next());
        self.state.select(None);
        self.refresh_visible();
    }

    pub async fn mark_selected_completed(&mut self) {
        let id = match self.selected_task() {
            Some(task) if TaskListController::<S>::can_mark_completed(task) => task.id.clone(),
            _ => return,
        };
        match self.list.mark_completed(&id).await {
            Ok(_) => self.status = None,
            Err(e) => self.status = Some(e.user_message()),
        }
        self.refresh_visible();
    }

    async fn navigate(&mut self, signal: NavSignal) {
        let list_activated = self.nav.apply(signal);
        self.form = match self.nav.current() {
            Route::EditTask(existing) => Some(FormScreen::new(TaskEditController::new(
                self.store.clone(),
                existing.clone(),
            ))),
            Route::TaskList => None,
        };
        if list_activated {
            self.activate_list().await;
        }
    }

    pub async fn open_add(&mut self) {
        self.status = None;
        self.navigate(NavSignal::Navigate(Route::EditTask(None))).await;
    }

    pub async fn open_edit(&mut self) {
        if let Some(task) = self.selected_task().cloned() {
            self.status = None;
            self.navigate(NavSignal::Navigate(Route::EditTask(Some(task)))).await;
        }
    }

    /// Leaves the form only when the save went through.
    pub async fn submit_form(&mut self) {
        let result = match &self.form {
            Some(form) => form.controller.commit().await,
            None => return,
        };
        match result {
            Ok(_) => {
                self.status = None;
                self.navigate(NavSignal::GoBack).await;
            }
            Err(e) => self.status = Some(e.user_message()),
        }
    }

    pub async fn cancel_form(&mut self) {
        self.status = None;
        self.navigate(NavSignal::GoBack).await;
    }

    pub fn toggle_focus(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.focus = match form.focus {
                Focus::Title => Focus::Description,
                Focus::Description => Focus::Title,
            };
            form.cursor_position = form.focused_text().chars().count();
        }
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(form) = self.form.as_mut() {
            let cursor = form.cursor_position;
            let text = form.focused_text_mut();
            let byte_index = text.chars().take(cursor).map(|c| c.len_utf8()).sum();
            text.insert(byte_index, c);
            form.cursor_position += 1;
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(form) = self.form.as_mut() {
            if form.cursor_position > 0 {
                let cursor = form.cursor_position;
                let text = form.focused_text_mut();
                let byte_index: usize = text.chars().take(cursor - 1).map(|c| c.len_utf8()).sum();
                text.remove(byte_index);
                form.cursor_position -= 1;
            }
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(form) = self.form.as_mut() {
            if form.cursor_position > 0 {
                form.cursor_position -= 1;
            }
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(form) = self.form.as_mut() {
            if form.cursor_position < form.focused_text().chars().count() {
                form.cursor_position += 1;
            }
        }
    }
}
