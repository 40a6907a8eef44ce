//! Badge engine: seeds the catalog into [`Stats`] and unlocks achievements.
//!
//! Evaluation is idempotent: a badge that is already earned is never touched
//! again, so re-running the engine on unchanged stats produces no changes.

mod catalog;

pub use catalog::{BadgeDef, CATALOG, EARLY_BIRD, PRODUCTIVITY_GURU};

use chrono::{DateTime, Utc};

use crate::model::{Badge, Stats};

/// Ensure every catalog entry is present in `stats.badges`, preserving any
/// already-earned state. Called on every load (self-healing for blobs written
/// before a catalog entry existed).
pub fn seed(stats: &mut Stats) {
    for def in CATALOG.iter() {
        if stats.badge(def.id).is_none() {
            stats.badges.push(Badge {
                id: def.id.to_string(),
                title: def.title.to_string(),
                description: def.description.to_string(),
                emoji: def.emoji.to_string(),
                earned: false,
                earned_at: None,
            });
        }
    }
}

/// Whether the Stats-based unlock condition for `id` currently holds.
///
/// `early-bird` is event-driven (awarded at task creation) and
/// `productivity-guru` depends on the other badges, so both return false
/// here and are handled separately.
fn predicate_met(id: &str, stats: &Stats) -> bool {
    match id {
        "first-step" => stats.tasks_completed >= 1,
        "note-beginner" => stats.notes_created >= 1,
        "three-day-streak" => stats.streak >= 3,
        "daily-five" => stats.daily_tasks_completed >= 5,
        "streak-hero" => stats.streak >= 5,
        "xp-earner" => stats.xp >= 100,
        "pomodoro-pro" => stats.total_pomodoros >= 10,
        "note-taker" => stats.notes_created >= 5,
        "task-master" => stats.tasks_completed >= 20,
        "hard-worker" => stats.hard_tasks_completed >= 5,
        "planner" => stats.calendar_tasks_created >= 5,
        "weekend-warrior" => stats.saturday_completed && stats.sunday_completed,
        "consistent-streak" => stats.streak >= 10,
        "xp-master" => stats.xp >= 250,
        "pomodoro-master" => stats.total_pomodoros >= 25,
        "extreme-focus" => stats.daily_pomodoros_completed >= 5,
        "organization-expert" => stats.notes_created >= 15,
        "heavy-lifter" => stats.hard_tasks_completed >= 15,
        "month-streak" => stats.streak >= 30,
        "xp-legend" => stats.xp >= 500,
        "xp-titan" => stats.xp >= 1000,
        "xp-immortal" => stats.xp >= 5000,
        "task-legend" => stats.tasks_completed >= 100,
        "ultimate-pomodoro" => stats.total_pomodoros >= 50,
        _ => false,
    }
}

/// Flip a specific badge to earned. Returns a clone of the badge when it was
/// newly earned this call, `None` if unknown or already earned.
pub fn award(stats: &mut Stats, id: &str, now: DateTime<Utc>) -> Option<Badge> {
    let badge = stats.badge_mut(id)?;
    if badge.earned {
        return None;
    }
    badge.earned = true;
    badge.earned_at = Some(now);
    Some(badge.clone())
}

/// Run one badge pass: unlock every newly-satisfied catalog predicate, then
/// the meta-badge last so it can trigger in the pass that completes the set.
/// Returns the badges earned by this pass, for the achievement-notification
/// hook.
pub fn evaluate(stats: &mut Stats, now: DateTime<Utc>) -> Vec<Badge> {
    seed(stats);

    let mut newly_earned = Vec::new();
    for def in CATALOG.iter().filter(|d| d.id != PRODUCTIVITY_GURU) {
        if predicate_met(def.id, stats) {
            if let Some(badge) = award(stats, def.id, now) {
                newly_earned.push(badge);
            }
        }
    }

    let all_others_earned = stats
        .badges
        .iter()
        .filter(|b| b.id != PRODUCTIVITY_GURU)
        .all(|b| b.earned);
    if all_others_earned {
        if let Some(badge) = award(stats, PRODUCTIVITY_GURU, now) {
            newly_earned.push(badge);
        }
    }

    newly_earned
}
