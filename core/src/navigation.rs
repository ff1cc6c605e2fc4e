use crate::model::task::Task;

/// The two screens of the app. `EditTask` carries the optional task being
/// edited; `None` opens the form in create mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    TaskList,
    EditTask(Option<Task>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavSignal {
    Navigate(Route),
    GoBack,
}

/// A navigation stack rooted at the task list.
///
/// [`apply`](Self::apply) reports whether the list screen became the top of
/// the stack, which is when the host must call
/// [`TaskListController::activate`](crate::controller::TaskListController::activate).
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            stack: vec![Route::TaskList],
        }
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Route {
        // The root is never popped.
        &self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns `true` when the task list screen was activated by this signal.
    pub fn apply(&mut self, signal: NavSignal) -> bool {
        match signal {
            NavSignal::Navigate(route) => {
                let activates_list = route == Route::TaskList;
                self.stack.push(route);
                activates_list
            }
            NavSignal::GoBack => {
                if self.stack.len() > 1 {
                    self.stack.pop();
                    *self.current() == Route::TaskList
                } else {
                    false
                }
            }
        }
    }
}
