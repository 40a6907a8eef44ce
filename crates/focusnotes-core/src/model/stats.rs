//! Lifetime and daily progression accumulators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::progression;

/// An achievement flag. Badges are seeded from the static catalog and only
/// ever flip `earned` from false to true; `earned_at` is set exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub emoji: String,
    #[serde(default)]
    pub earned: bool,
    #[serde(default)]
    pub earned_at: Option<DateTime<Utc>>,
}

/// Progression state. Created once with defaults, mutated continuously,
/// never deleted. Every field is serde-defaulted so blobs written by older
/// versions load cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    /// Consecutive qualifying days.
    pub streak: u32,
    /// Consumable streak-protection credits. One is granted every 7th
    /// streak day and one is consumed per non-qualifying day.
    pub freeze_tokens: u32,
    /// Lifetime experience points.
    pub xp: u32,
    /// Level 1-10, a pure function of `xp`. Never authoritative on its own;
    /// any mismatch is corrected by `heal`.
    pub level: u8,
    /// XP credited from pomodoro sessions today. Capped at
    /// [`crate::pomodoro::DAILY_XP_CAP`] and reset at every day boundary.
    pub pomodoro_xp: u32,
    /// Lifetime fully-completed pomodoro sessions.
    pub total_pomodoros: u32,
    /// Timestamp of the last processed day boundary.
    pub last_end_day: Option<DateTime<Utc>>,
    /// Catalog-sized badge list. Seeded on load.
    pub badges: Vec<Badge>,
    pub tasks_completed: u32,
    pub hard_tasks_completed: u32,
    pub notes_created: u32,
    /// Reset at every day boundary.
    pub daily_tasks_completed: u32,
    /// Reset at every day boundary.
    pub daily_pomodoros_completed: u32,
    /// Lifetime count of tasks created for a future calendar day.
    pub calendar_tasks_created: u32,
    /// Weekend-badge tracking, reset every Monday.
    pub saturday_completed: bool,
    pub sunday_completed: bool,
}

impl Default for Stats {
    fn default() -> Self {
        Stats {
            streak: 0,
            freeze_tokens: 0,
            xp: 0,
            level: 1,
            pomodoro_xp: 0,
            total_pomodoros: 0,
            last_end_day: None,
            badges: Vec::new(),
            tasks_completed: 0,
            hard_tasks_completed: 0,
            notes_created: 0,
            daily_tasks_completed: 0,
            daily_pomodoros_completed: 0,
            calendar_tasks_created: 0,
            saturday_completed: false,
            sunday_completed: false,
        }
    }
}

impl Stats {
    /// Recompute derived state after load. The stored level is treated as a
    /// cache of `calculate_level(xp)` and corrected whenever it drifts.
    pub fn heal(&mut self) {
        self.level = progression::calculate_level(self.xp);
    }

    pub fn badge(&self, id: &str) -> Option<&Badge> {
        self.badges.iter().find(|b| b.id == id)
    }

    pub fn badge_mut(&mut self, id: &str) -> Option<&mut Badge> {
        self.badges.iter_mut().find(|b| b.id == id)
    }
}
