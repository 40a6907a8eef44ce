//! Task management commands.

use clap::Subcommand;
use focusnotes_core::{Effort, TaskUpdate};

use crate::common::{self, CliError};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// Effort tier: easy, medium or hard
        #[arg(long, default_value = "medium")]
        effort: String,
        /// Calendar date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Time of day (HH:MM)
        #[arg(long)]
        time: Option<String>,
    },
    /// List tasks
    List {
        /// Only tasks for this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Raw JSON output
        #[arg(long)]
        json: bool,
    },
    /// Toggle completion
    Toggle {
        /// Task ID
        id: String,
    },
    /// Update a task
    Edit {
        /// Task ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New free-text notes
        #[arg(long)]
        notes: Option<String>,
        /// New effort tier
        #[arg(long)]
        effort: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// New time (HH:MM); "none" clears it
        #[arg(long)]
        time: Option<String>,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

pub async fn run(action: TaskAction) -> Result<(), CliError> {
    let app = common::open_app()?;

    match action {
        TaskAction::Add {
            title,
            effort,
            date,
            time,
        } => {
            let effort: Effort = effort.parse()?;
            let date = date.as_deref().map(common::parse_date).transpose()?;
            let time = time.as_deref().map(common::parse_time).transpose()?;
            let task = app.add_task(&title, effort, date, time).await?;
            println!("Task created: {}", task.id);
        }
        TaskAction::List { date, json } => {
            let filter = date.as_deref().map(common::parse_date).transpose()?;
            let storage = app.snapshot().await?;
            let tasks: Vec<_> = storage
                .tasks
                .iter()
                .filter(|t| filter.map_or(true, |d| t.date == d))
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                for task in tasks {
                    let mark = if task.completed { "x" } else { " " };
                    let time = task
                        .time
                        .map(|t| format!(" {}", t.format("%H:%M")))
                        .unwrap_or_default();
                    println!(
                        "[{mark}] {}  {} ({}) {}{time}",
                        task.id, task.title, task.effort, task.date
                    );
                }
            }
        }
        TaskAction::Toggle { id } => {
            let task = app.toggle_task(&id).await?;
            if task.completed {
                println!("Completed: {} (+{} xp)", task.title, task.effort.xp());
            } else {
                println!("Reopened: {} (-{} xp)", task.title, task.effort.xp());
            }
        }
        TaskAction::Edit {
            id,
            title,
            notes,
            effort,
            date,
            time,
        } => {
            let update = TaskUpdate {
                title,
                notes,
                effort: effort.as_deref().map(str::parse).transpose()?,
                date: date.as_deref().map(common::parse_date).transpose()?,
                time: match time.as_deref() {
                    None => None,
                    Some("none") => Some(None),
                    Some(s) => Some(Some(common::parse_time(s)?)),
                },
            };
            let task = app.edit_task(&id, update).await?;
            println!("Task updated: {}", task.id);
        }
        TaskAction::Delete { id } => {
            app.delete_task(&id).await?;
            println!("Task deleted: {id}");
        }
    }
    Ok(())
}
