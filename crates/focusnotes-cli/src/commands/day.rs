//! Day boundary commands.

use chrono::Local;
use clap::Subcommand;
use focusnotes_core::DaySummary;

use crate::common::{self, CliError};

#[derive(Subcommand)]
pub enum DayAction {
    /// Score today, advance the streak and reset daily state
    End,
    /// Run the automatic boundary check and show where the day stands
    Status,
}

fn print_summary(summary: &DaySummary) {
    println!(
        "Day ended: {} of {} tasks completed ({} xp)",
        summary.completed_tasks, summary.total_tasks, summary.task_xp
    );
    println!("Streak: {} days", summary.streak.streak);
    if summary.streak.token_granted {
        println!("Earned a freeze token! ❄️");
    }
    if let Some(message) = summary.streak_message() {
        println!("{message}");
    }
    for badge in &summary.new_badges {
        println!("{} Badge unlocked: {}", badge.emoji, badge.title);
    }
}

pub async fn run(action: DayAction) -> Result<(), CliError> {
    let app = common::open_app()?;

    match action {
        DayAction::End => match app.end_day().await? {
            Some(summary) => print_summary(&summary),
            None => println!("Today is already scored. Come back tomorrow!"),
        },
        DayAction::Status => {
            let report = app.on_foreground().await?;
            match report.day {
                Some(summary) => print_summary(&summary),
                None => println!("No day boundary to process."),
            }
            let storage = app.snapshot().await?;
            let last = storage
                .stats
                .last_end_day
                .map(|ts| ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "never".to_string());
            println!(
                "Streak {} (tokens {}), last end of day: {last}",
                storage.stats.streak, storage.stats.freeze_tokens
            );
        }
    }
    Ok(())
}
