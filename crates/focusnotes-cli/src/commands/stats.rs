//! Progress overview.

use focusnotes_core::progression;

use crate::common::{self, CliError};

pub async fn run(json: bool) -> Result<(), CliError> {
    let app = common::open_app()?;
    let storage = app.snapshot().await?;
    let stats = &storage.stats;

    if json {
        println!("{}", serde_json::to_string_pretty(stats)?);
        return Ok(());
    }

    println!(
        "Level {} ({}) — {} xp",
        stats.level,
        progression::level_title(stats.level),
        stats.xp
    );
    println!(
        "Streak: {} days ({} freeze tokens)",
        stats.streak, stats.freeze_tokens
    );
    println!(
        "Tasks completed: {} lifetime, {} today",
        stats.tasks_completed, stats.daily_tasks_completed
    );
    println!(
        "Pomodoros: {} lifetime, {} today ({} / 20 xp)",
        stats.total_pomodoros, stats.daily_pomodoros_completed, stats.pomodoro_xp
    );
    println!("Notes created: {}", stats.notes_created);
    let earned = stats.badges.iter().filter(|b| b.earned).count();
    println!("Badges: {} of {} earned", earned, stats.badges.len());
    Ok(())
}
