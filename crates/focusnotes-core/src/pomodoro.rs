//! Pomodoro session transitions and XP crediting.
//!
//! Sessions are wall-clock based: `start` records the deadline and the caller
//! (UI tick or app-foreground check) drives `finish`. Stopping before the
//! deadline earns nothing; reaching it credits exactly once -- a second
//! delivery of the end notification finds the task already inactive and is
//! rejected as a no-op.

use chrono::{DateTime, Duration, Utc};

use crate::error::ValidationError;
use crate::model::{Stats, Task};
use crate::progression;

/// Standard session length.
pub const SESSION_MINUTES: i64 = 25;

/// XP granted per fully completed session, before the daily cap.
pub const SESSION_XP: u32 = 5;

/// Upper bound on pomodoro XP granted per day.
pub const DAILY_XP_CAP: u32 = 20;

/// Result of a finish attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PomodoroOutcome {
    /// The deadline was reached; the session was credited.
    Credited {
        /// XP actually granted (zero once the daily cap is exhausted).
        xp_granted: u32,
    },
    /// Stopped before the deadline; run state cleared, nothing credited.
    StoppedEarly,
    /// No session was running. Guards against duplicate notification
    /// delivery and stale timer polls.
    AlreadyInactive,
}

/// Start a session on this task. Fails if one is already running here;
/// the caller is responsible for the one-active-session-per-storage rule.
pub fn start(task: &mut Task, now: DateTime<Utc>) -> Result<DateTime<Utc>, ValidationError> {
    if task.pomodoro_active {
        return Err(ValidationError::InvalidState(format!(
            "task '{}' already has an active pomodoro",
            task.title
        )));
    }
    let end_time = now + Duration::minutes(SESSION_MINUTES);
    task.pomodoro_active = true;
    task.pomodoro_end_time = Some(end_time);
    Ok(end_time)
}

/// Cancel a running session with no credit. Returns false when nothing was
/// running. Clears the end-notification handle together with the timer
/// fields so the invariant `active ⇔ end_time set` holds.
pub fn cancel(task: &mut Task) -> bool {
    if !task.pomodoro_active {
        return false;
    }
    task.pomodoro_active = false;
    task.pomodoro_end_time = None;
    task.notification_id = None;
    true
}

/// Finish the session on this task, crediting it only when the deadline has
/// passed. XP is credited here, at session completion, exactly once; the
/// day-lifecycle pass never re-adds it. The grant is bounded by the daily
/// `pomodoro_xp` accumulator cap.
pub fn finish(task: &mut Task, stats: &mut Stats, now: DateTime<Utc>) -> PomodoroOutcome {
    if !task.pomodoro_active {
        return PomodoroOutcome::AlreadyInactive;
    }
    let deadline = task.pomodoro_end_time;
    task.pomodoro_active = false;
    task.pomodoro_end_time = None;
    task.notification_id = None;

    let completed = matches!(deadline, Some(end) if now >= end);
    if !completed {
        return PomodoroOutcome::StoppedEarly;
    }

    task.pomodoro_count += 1;
    stats.total_pomodoros += 1;
    stats.daily_pomodoros_completed += 1;

    let xp_granted = SESSION_XP.min(DAILY_XP_CAP.saturating_sub(stats.pomodoro_xp));
    stats.pomodoro_xp += xp_granted;
    stats.xp += xp_granted;
    stats.level = progression::calculate_level(stats.xp);

    PomodoroOutcome::Credited { xp_granted }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Effort;
    use chrono::NaiveDate;

    fn task() -> Task {
        Task::new(
            "Deep work",
            Effort::Medium,
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        )
    }

    #[test]
    fn start_sets_deadline_25_minutes_out() {
        let mut t = task();
        let now = Utc::now();
        let end = start(&mut t, now).unwrap();
        assert_eq!(end, now + Duration::minutes(25));
        assert!(t.pomodoro_active);
        assert_eq!(t.pomodoro_end_time, Some(end));
    }

    #[test]
    fn start_rejects_double_start() {
        let mut t = task();
        start(&mut t, Utc::now()).unwrap();
        assert!(start(&mut t, Utc::now()).is_err());
    }

    #[test]
    fn cancel_clears_everything_without_credit() {
        let mut t = task();
        start(&mut t, Utc::now()).unwrap();
        t.notification_id = Some("n-9".into());

        assert!(cancel(&mut t));
        assert!(!t.pomodoro_active);
        assert!(t.pomodoro_end_time.is_none());
        assert!(t.notification_id.is_none());
        assert_eq!(t.pomodoro_count, 0);
    }

    #[test]
    fn finish_before_deadline_earns_nothing() {
        let mut t = task();
        let mut stats = Stats::default();
        let now = Utc::now();
        start(&mut t, now).unwrap();

        let outcome = finish(&mut t, &mut stats, now + Duration::minutes(10));
        assert_eq!(outcome, PomodoroOutcome::StoppedEarly);
        assert_eq!(t.pomodoro_count, 0);
        assert_eq!(stats.xp, 0);
        assert!(!t.pomodoro_active);
    }

    #[test]
    fn finish_at_deadline_credits_once() {
        let mut t = task();
        let mut stats = Stats::default();
        let now = Utc::now();
        let end = start(&mut t, now).unwrap();

        let outcome = finish(&mut t, &mut stats, end);
        assert_eq!(outcome, PomodoroOutcome::Credited { xp_granted: 5 });
        assert_eq!(t.pomodoro_count, 1);
        assert_eq!(stats.total_pomodoros, 1);
        assert_eq!(stats.daily_pomodoros_completed, 1);
        assert_eq!(stats.pomodoro_xp, 5);
        assert_eq!(stats.xp, 5);

        // Duplicate delivery of the end notification is a no-op.
        let dup = finish(&mut t, &mut stats, end);
        assert_eq!(dup, PomodoroOutcome::AlreadyInactive);
        assert_eq!(stats.total_pomodoros, 1);
    }

    #[test]
    fn daily_xp_cap_bounds_the_grant() {
        let mut stats = Stats {
            pomodoro_xp: 18,
            xp: 18,
            ..Stats::default()
        };
        let mut t = task();
        let now = Utc::now();
        let end = start(&mut t, now).unwrap();

        let outcome = finish(&mut t, &mut stats, end);
        assert_eq!(outcome, PomodoroOutcome::Credited { xp_granted: 2 });
        assert_eq!(stats.pomodoro_xp, 20);
        assert_eq!(stats.xp, 20);

        // Counters still advance after the cap, XP does not.
        let end = start(&mut t, now).unwrap();
        let outcome = finish(&mut t, &mut stats, end);
        assert_eq!(outcome, PomodoroOutcome::Credited { xp_granted: 0 });
        assert_eq!(stats.pomodoro_xp, 20);
        assert_eq!(stats.xp, 20);
        assert_eq!(stats.total_pomodoros, 2);
    }
}
