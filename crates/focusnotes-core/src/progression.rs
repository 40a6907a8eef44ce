//! Progression engine: levels, per-task XP deltas and the streak rule.
//!
//! Everything here is a pure function over [`Stats`] fields. Level is never
//! stored authoritatively -- it is recomputed from XP after every mutation.

use serde::{Deserialize, Serialize};

use crate::model::{Effort, Stats};

/// XP required to reach each level, index 0 = level 1.
pub const LEVEL_THRESHOLDS: [u32; 10] =
    [0, 100, 250, 500, 1000, 2000, 3000, 5000, 7500, 10_000];

/// Highest reachable level.
pub const MAX_LEVEL: u8 = 10;

/// Map lifetime XP to a level in 1..=10. Monotonic, saturates at 10.
pub fn calculate_level(xp: u32) -> u8 {
    let mut level = 1u8;
    for (i, &threshold) in LEVEL_THRESHOLDS.iter().enumerate().skip(1) {
        if xp >= threshold {
            level = (i + 1) as u8;
        }
    }
    level.min(MAX_LEVEL)
}

/// Display title for a level. Out-of-range levels return "Unknown".
pub fn level_title(level: u8) -> &'static str {
    match level {
        1 => "Beginner",
        2 => "Explorer",
        3 => "Master",
        4 => "Champion",
        5 => "Expert",
        6 => "Guru",
        7 => "Virtuoso",
        8 => "Legend",
        9 => "Titan",
        10 => "Mythic",
        _ => "Unknown",
    }
}

/// Credit a task completion: XP for the effort tier plus the lifetime and
/// daily counters. Level is recomputed from the new XP.
pub fn apply_completion(stats: &mut Stats, effort: Effort) {
    stats.xp += effort.xp();
    stats.tasks_completed += 1;
    stats.daily_tasks_completed += 1;
    if effort == Effort::Hard {
        stats.hard_tasks_completed += 1;
    }
    stats.level = calculate_level(stats.xp);
}

/// Reverse a task completion. All accumulators are floored at zero so a
/// reversal can never drive a counter negative, even against a healed blob.
pub fn apply_uncompletion(stats: &mut Stats, effort: Effort) {
    stats.xp = stats.xp.saturating_sub(effort.xp());
    stats.tasks_completed = stats.tasks_completed.saturating_sub(1);
    stats.daily_tasks_completed = stats.daily_tasks_completed.saturating_sub(1);
    if effort == Effort::Hard {
        stats.hard_tasks_completed = stats.hard_tasks_completed.saturating_sub(1);
    }
    stats.level = calculate_level(stats.xp);
}

/// Number of streak days between freeze-token grants.
pub const FREEZE_TOKEN_INTERVAL: u32 = 7;

/// What happened to the streak at a day boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakEvent {
    /// The day qualified; the streak grew by one.
    Extended,
    /// The day did not qualify but a freeze token preserved the streak.
    TokenUsed,
    /// The day did not qualify and no tokens were left.
    Reset,
}

/// Result of applying the streak rule for one day boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakChange {
    pub streak: u32,
    pub freeze_tokens: u32,
    pub event: StreakEvent,
    /// True when this extension crossed a 7-day milestone and granted a token.
    pub token_granted: bool,
}

impl StreakChange {
    /// User-facing message for non-qualifying days, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self.event {
            StreakEvent::Extended => None,
            StreakEvent::TokenUsed => {
                Some("Used a freeze token to protect your streak! ❄️")
            }
            StreakEvent::Reset => Some(
                "Your streak has been reset. Complete tasks tomorrow to start a new streak!",
            ),
        }
    }
}

/// Apply the streak rule for one elapsed day.
///
/// The day qualifies when the completion ratio reaches 90% or at least one
/// task was completed (documented policy: minimal effort keeps the streak on
/// low-task days). With no tasks at all the ratio counts as zero.
pub fn advance_streak(
    streak: u32,
    freeze_tokens: u32,
    completed_tasks: usize,
    total_tasks: usize,
) -> StreakChange {
    let ratio = if total_tasks > 0 {
        completed_tasks as f64 / total_tasks as f64
    } else {
        0.0
    };
    let threshold_met = ratio >= 0.90 || completed_tasks >= 1;

    if threshold_met {
        let new_streak = streak + 1;
        let token_granted = new_streak % FREEZE_TOKEN_INTERVAL == 0;
        StreakChange {
            streak: new_streak,
            freeze_tokens: if token_granted {
                freeze_tokens + 1
            } else {
                freeze_tokens
            },
            event: StreakEvent::Extended,
            token_granted,
        }
    } else if freeze_tokens > 0 {
        StreakChange {
            streak,
            freeze_tokens: freeze_tokens - 1,
            event: StreakEvent::TokenUsed,
            token_granted: false,
        }
    } else {
        StreakChange {
            streak: 0,
            freeze_tokens: 0,
            event: StreakEvent::Reset,
            token_granted: false,
        }
    }
}
