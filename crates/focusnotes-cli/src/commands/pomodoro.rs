//! Pomodoro session commands.

use chrono::{Local, Utc};
use clap::Subcommand;

use crate::common::{self, CliError};

#[derive(Subcommand)]
pub enum PomodoroAction {
    /// Start a 25-minute session on a task
    Start {
        /// Task ID
        id: String,
        /// Skip the start sound and vibration
        #[arg(long)]
        quiet: bool,
    },
    /// Stop the running session without credit
    Stop {
        /// Task ID
        id: String,
    },
    /// Show the running session, sweeping any that expired
    Status,
}

pub async fn run(action: PomodoroAction) -> Result<(), CliError> {
    let app = common::open_app()?;

    match action {
        PomodoroAction::Start { id, quiet } => {
            let end = app.start_pomodoro(&id, quiet).await?;
            println!(
                "Pomodoro started, ends at {}",
                end.with_timezone(&Local).format("%H:%M:%S")
            );
        }
        PomodoroAction::Stop { id } => {
            app.cancel_pomodoro(&id).await?;
            println!("Pomodoro stopped, no credit.");
        }
        PomodoroAction::Status => {
            let finished = app.poll_pomodoros().await?;
            for id in &finished {
                println!("Session completed on task {id}");
            }
            let storage = app.snapshot().await?;
            match storage.tasks.iter().find(|t| t.pomodoro_active) {
                Some(task) => {
                    let remaining = task
                        .pomodoro_end_time
                        .map(|end| (end - Utc::now()).num_seconds().max(0))
                        .unwrap_or(0);
                    println!(
                        "Running on \"{}\": {}:{:02} left",
                        task.title,
                        remaining / 60,
                        remaining % 60
                    );
                }
                None => {
                    if finished.is_empty() {
                        println!("No active pomodoro.");
                    }
                }
            }
            println!(
                "Today: {} sessions, {} / 20 pomodoro xp",
                storage.stats.daily_pomodoros_completed, storage.stats.pomodoro_xp
            );
        }
    }
    Ok(())
}
