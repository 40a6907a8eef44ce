//! Task records and effort tiers.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task difficulty tier. Each tier maps to a fixed XP reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Easy,
    Medium,
    Hard,
}

impl Effort {
    /// XP awarded for completing a task of this tier.
    pub fn xp(self) -> u32 {
        match self {
            Effort::Easy => 5,
            Effort::Medium => 10,
            Effort::Hard => 15,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Effort::Easy => "easy",
            Effort::Medium => "medium",
            Effort::Hard => "hard",
        }
    }
}

impl Default for Effort {
    fn default() -> Self {
        Effort::Medium
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Effort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Effort::Easy),
            "medium" => Ok(Effort::Medium),
            "hard" => Ok(Effort::Hard),
            other => Err(format!("unknown effort tier: {other}")),
        }
    }
}

/// A single task in the storage envelope.
///
/// `date` is the calendar day the task belongs to; `time` is an optional
/// wall-clock HH:MM used for reminder scheduling. The pomodoro fields are
/// transient run state and are cleared together at every day boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique, stable identifier.
    pub id: String,
    pub title: String,
    /// Free-text notes attached to the task.
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub effort: Effort,
    /// Fully completed pomodoro sessions for this task today.
    #[serde(default)]
    pub pomodoro_count: u32,
    #[serde(default)]
    pub pomodoro_active: bool,
    /// Deadline of the running session. Set iff `pomodoro_active`.
    #[serde(default)]
    pub pomodoro_end_time: Option<DateTime<Utc>>,
    /// Calendar day the task belongs to.
    pub date: NaiveDate,
    /// Optional wall-clock time of day.
    #[serde(default)]
    pub time: Option<NaiveTime>,
    /// Handle of the scheduled reminder, if any.
    #[serde(default)]
    pub notification_id: Option<String>,
}

impl Task {
    /// Create a new task for the given day.
    pub fn new(title: impl Into<String>, effort: Effort, date: NaiveDate) -> Self {
        let now = Utc::now();
        Task {
            id: format!("task-{}-{}", now.timestamp(), uuid::Uuid::new_v4()),
            title: title.into(),
            notes: String::new(),
            completed: false,
            effort,
            pomodoro_count: 0,
            pomodoro_active: false,
            pomodoro_end_time: None,
            date,
            time: None,
            notification_id: None,
        }
    }

    /// Whether the task's calendar day is strictly after `today`.
    pub fn is_future(&self, today: NaiveDate) -> bool {
        self.date > today
    }

    /// Reset transient run state: completion flag, pomodoro session fields
    /// and the reminder handle. Date and time are preserved.
    pub fn clear_run_state(&mut self) {
        self.completed = false;
        self.pomodoro_count = 0;
        self.pomodoro_active = false;
        self.pomodoro_end_time = None;
        self.notification_id = None;
    }
}
