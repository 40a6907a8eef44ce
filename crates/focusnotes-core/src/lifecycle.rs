//! Day-boundary detection and end-of-day processing.
//!
//! The controller has no state of its own: whether a boundary needs
//! processing is derived from `stats.last_end_day` against today's local
//! calendar date. One routine serves both the explicit "End Day" action and
//! the automatic on-foreground check; the automatic path is additionally a
//! no-op on fresh installs and when the day has not changed, so it is safe
//! to call speculatively on every foreground.
//!
//! XP is credited live (task toggle, pomodoro completion), so this pass
//! never adds XP. It advances the streak, maintains the weekend flags,
//! resets the daily accumulators, clears per-task run state and runs a
//! badge pass, then hands the mutated envelope back for one atomic persist.

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc, Weekday};

use crate::badges;
use crate::model::{Badge, Storage};
use crate::progression::{self, StreakChange};

/// Whether a day boundary has been crossed since the last processed one.
/// Date-only comparison in local time; no recorded boundary counts as new.
pub fn is_new_day(last_end_day: Option<DateTime<Utc>>, today: NaiveDate) -> bool {
    match last_end_day {
        None => true,
        Some(ts) => ts.with_timezone(&Local).date_naive() != today,
    }
}

/// Report handed back to the caller after an end-of-day pass.
#[derive(Debug, Clone)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub completed_tasks: usize,
    pub total_tasks: usize,
    /// Task XP earned over the day (already credited at toggle time).
    pub task_xp: u32,
    pub streak: StreakChange,
    /// Badges newly earned by this pass, for the achievement hook.
    pub new_badges: Vec<Badge>,
}

impl DaySummary {
    /// User-facing streak message, if the day did not qualify.
    pub fn streak_message(&self) -> Option<&'static str> {
        self.streak.message()
    }
}

/// Process the day boundary: score the day, advance the streak, reset the
/// daily accumulators and per-task run state, run a badge pass.
///
/// The caller persists the envelope afterwards in a single write; nothing
/// here touches storage directly.
pub fn end_day(storage: &mut Storage, today: NaiveDate, now: DateTime<Utc>) -> DaySummary {
    let total_tasks = storage.tasks.len();
    let completed_tasks = storage.tasks.iter().filter(|t| t.completed).count();
    let task_xp: u32 = storage
        .tasks
        .iter()
        .filter(|t| t.completed)
        .map(|t| t.effort.xp())
        .sum();

    let stats = &mut storage.stats;
    let change = progression::advance_streak(
        stats.streak,
        stats.freeze_tokens,
        completed_tasks,
        total_tasks,
    );
    stats.streak = change.streak;
    stats.freeze_tokens = change.freeze_tokens;

    match today.weekday() {
        Weekday::Mon => {
            stats.saturday_completed = false;
            stats.sunday_completed = false;
        }
        Weekday::Sat if completed_tasks > 0 => stats.saturday_completed = true,
        Weekday::Sun if completed_tasks > 0 => stats.sunday_completed = true,
        _ => {}
    }

    stats.pomodoro_xp = 0;
    stats.daily_tasks_completed = 0;
    stats.daily_pomodoros_completed = 0;
    stats.last_end_day = Some(now);
    stats.level = progression::calculate_level(stats.xp);

    let new_badges = badges::evaluate(stats, now);

    for task in &mut storage.tasks {
        task.clear_run_state();
    }

    DaySummary {
        date: today,
        completed_tasks,
        total_tasks,
        task_xp,
        streak: change,
        new_badges,
    }
}

/// Automatic boundary check for app foreground/launch. Returns `None` when
/// there is nothing to do: no boundary was ever recorded (fresh install; the
/// first explicit end-day seeds it) or the recorded one is from today.
/// A multi-day gap is processed as a single boundary, never replayed per day.
pub fn auto_end_day(
    storage: &mut Storage,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Option<DaySummary> {
    let last = storage.stats.last_end_day?;
    if !is_new_day(Some(last), today) {
        return None;
    }
    Some(end_day(storage, today, now))
}
