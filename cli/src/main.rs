mod logging;
mod tui;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tasklist_core::controller::EMPTY_LIST_MESSAGE;
use tasklist_core::{
    AppConfig, FileKeyValueStore, FilterMode, Task, TaskEditController, TaskListController,
    TaskStore,
};

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "A small to-do list backed by local storage", long_about = None)]
struct Cli {
    /// Directory holding the task list and logs (default: ~/.tasklist)
    #[arg(long, global = true, env = "TASKLIST_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level written to <data-dir>/logs
    #[arg(long, global = true, env = "TASKLIST_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List tasks
    List {
        /// all, completed or pending
        #[arg(short, long, default_value = "all")]
        filter: FilterMode,
    },
    /// Add a new task (usage: add Buy milk --description "2%")
    Add {
        #[arg(required = true)]
        title: Vec<String>,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Change the title and/or description of a task
    Edit {
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Mark a task as completed
    Complete { id: String },
    /// Open the Terminal User Interface
    Tui,
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: short_id(&task.id).to_string(),
            status: task.status_label(),
            title: task.title.clone(),
            description: task.description.clone(),
        }
    }
}

fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Accepts a full id or a unique prefix of one, as printed by `list`.
fn resolve_id(tasks: &[&Task], id: &str) -> Result<String> {
    if let Some(task) = tasks.iter().find(|t| t.id == id) {
        return Ok(task.id.clone());
    }
    let matches: Vec<&&Task> = tasks.iter().filter(|t| t.id.starts_with(id)).collect();
    match matches.len() {
        1 => Ok(matches[0].id.clone()),
        0 => Err(anyhow!("Task with ID {} not found", id)),
        _ => Err(anyhow!("Ambiguous ID '{}' matches {} tasks", id, matches.len())),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::new(cli.data_dir, cli.log_level)?;
    let _logger = logging::init_logging(&config.log_level, &config.log_dir())?;
    let store = TaskStore::new(FileKeyValueStore::new(&config.data_dir)?);

    match cli.command {
        Some(Commands::List { filter }) => {
            let mut list = TaskListController::new(store);
            list.activate().await;
            if let Some(warning) = list.load_warning() {
                eprintln!("Warning: {}", warning.user_message());
            }
            list.set_filter(filter);

            let visible = list.visible();
            if visible.is_empty() {
                println!("{}", EMPTY_LIST_MESSAGE);
            } else {
                let rows: Vec<TaskRow> = visible.iter().map(TaskRow::from).collect();
                let mut table = Table::new(rows);
                table.with(Style::rounded());
                println!("{}", table);
            }
        }
        Some(Commands::Add { title, description }) => {
            let mut edit = TaskEditController::new(store, None);
            edit.set_title(title.join(" "));
            edit.set_description(description);
            let saved = edit.commit().await?;
            if let Some(task) = saved.iter().last() {
                println!("Task added: {} (ID: {})", task.title, task.id);
            }
        }
        Some(Commands::Edit { id, title, description }) => {
            let tasks = store.load().await?;
            let all: Vec<&Task> = tasks.iter().collect();
            let id = resolve_id(&all, &id)?;
            let task = tasks
                .get(&id)
                .cloned()
                .ok_or_else(|| anyhow!("Task with ID {} not found", id))?;

            let mut edit = TaskEditController::new(store, Some(task));
            if let Some(title) = title {
                edit.set_title(title);
            }
            if let Some(description) = description {
                edit.set_description(description);
            }
            edit.commit().await?;
            println!("Task updated: {}", edit.form().title);
        }
        Some(Commands::Complete { id }) => {
            let mut list = TaskListController::new(store);
            list.activate().await;
            let all: Vec<&Task> = list.tasks().iter().collect();
            let id = resolve_id(&all, &id)?;
            list.mark_completed(&id).await?;
            println!("Task marked as completed: {}", id);
        }
        Some(Commands::Tui) | None => {
            tui::run(store).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str) -> Task {
        Task {
            id: id.to_string(),
            title: "t".to_string(),
            description: String::new(),
            is_completed: false,
        }
    }

    #[test]
    fn test_resolve_id_by_prefix() {
        let a = task("abcd1234-0000");
        let b = task("abce9999-0000");
        let all = vec![&a, &b];
        assert_eq!(resolve_id(&all, "abcd").unwrap(), "abcd1234-0000");
        assert_eq!(resolve_id(&all, "abce9999-0000").unwrap(), "abce9999-0000");
        assert!(resolve_id(&all, "abc").is_err());
        assert!(resolve_id(&all, "zzz").is_err());
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("abcd1234-0000"), "abcd1234");
        assert_eq!(short_id("17000"), "17000");
    }
}
