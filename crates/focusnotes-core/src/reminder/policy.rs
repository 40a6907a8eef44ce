//! Trigger policy: when a task, pomodoro or streak event becomes a
//! notification request.
//!
//! Trigger times are computed in local wall-clock terms (`NaiveDateTime`)
//! and converted to UTC only at the scheduler boundary. Everything here is
//! fire-and-forget with respect to domain state: a scheduling failure is
//! dropped, never surfaced to the storage commit.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};

use crate::model::{Badge, Task};
use crate::progression::{StreakChange, StreakEvent};
use crate::storage::NotificationSettings;

use super::{FeedbackService, NotificationContent, NotificationService, Trigger};

/// Identity of the recurring streak reminder. Rescheduling under a fixed
/// identity replaces the pending one instead of stacking duplicates.
pub const DAILY_STREAK_IDENTITY: &str = "daily-streak-reminder";

/// Streak lengths that trigger a milestone notification.
pub const STREAK_MILESTONES: [u32; 3] = [7, 14, 30];

/// Default reminder hour for tasks without a specific time.
const REMINDER_HOUR: u32 = 9;

/// Lead time before a timed task's reminder fires.
const LEAD_MINUTES: i64 = 30;

/// Minimum distance from now for a future-dated task's reminder. A reminder
/// for a day the user planned ahead for must never arrive immediately.
const MIN_LEAD_MINUTES: i64 = 2;

/// Compute the local wall-clock trigger time for a task reminder.
///
/// Future date -> 09:00 on that date, pushed out to `now + 2min` if that is
/// somehow closer. Today with a time -> 30 minutes before it. Today without
/// a time -> 09:00. `None` means no reminder: the slot already passed, or
/// the task's date did.
pub fn task_reminder_at(task: &Task, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let today = now.date();
    let nine = |date: chrono::NaiveDate| date.and_hms_opt(REMINDER_HOUR, 0, 0);

    if task.date > today {
        let at = nine(task.date)?;
        let min_at = now + Duration::minutes(MIN_LEAD_MINUTES);
        Some(if at < min_at { min_at } else { at })
    } else if task.date == today {
        let at = match task.time {
            Some(time) => today.and_time(time) - Duration::minutes(LEAD_MINUTES),
            None => nine(today)?,
        };
        (at > now).then_some(at)
    } else {
        None
    }
}

fn local_to_utc(at: NaiveDateTime) -> Option<DateTime<Utc>> {
    Local
        .from_local_datetime(&at)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Decides which notifications to request and keeps task handles current.
///
/// Every method is gated on the relevant [`NotificationSettings`] switches
/// and swallows delivery-side errors.
pub struct ReminderScheduler {
    notifications: Arc<dyn NotificationService>,
    feedback: Arc<dyn FeedbackService>,
}

impl ReminderScheduler {
    pub fn new(
        notifications: Arc<dyn NotificationService>,
        feedback: Arc<dyn FeedbackService>,
    ) -> Self {
        Self {
            notifications,
            feedback,
        }
    }

    /// Cancel whatever is pending for this task and clear its handle.
    pub fn cancel_for_task(&self, task: &mut Task) {
        if let Some(id) = task.notification_id.take() {
            let _ = self.notifications.cancel(&id);
        }
    }

    /// (Re)schedule the reminder for a task. Any previous notification for
    /// the task is cancelled first, so edits replace rather than stack.
    pub fn schedule_task_reminder(
        &self,
        task: &mut Task,
        settings: &NotificationSettings,
        now: NaiveDateTime,
    ) {
        self.cancel_for_task(task);
        if !settings.enabled {
            return;
        }
        let Some(at) = task_reminder_at(task, now) else {
            return;
        };
        let Some(at_utc) = local_to_utc(at) else {
            return;
        };
        let content = NotificationContent::new("Task reminder", task.title.clone())
            .with_data(task.id.clone());
        if let Ok(id) = self
            .notifications
            .schedule(None, content, Trigger::At(at_utc))
        {
            task.notification_id = Some(id);
        }
    }

    /// Announce a started session and schedule its end notification,
    /// storing the end handle on the task.
    ///
    /// `suppress_immediate_feedback` mutes the start cue without touching
    /// the user's sound/vibration settings (used when the start is a side
    /// effect, e.g. adding a future-dated task mid-session-flow).
    pub fn pomodoro_started(
        &self,
        task: &mut Task,
        settings: &NotificationSettings,
        suppress_immediate_feedback: bool,
        now: DateTime<Utc>,
    ) {
        self.cancel_for_task(task);

        if !suppress_immediate_feedback {
            if settings.sound {
                self.feedback.play_sound("pomodoro-start");
            }
            if settings.vibration {
                self.feedback.vibrate(&[200]);
            }
        }

        if !(settings.enabled && settings.pomodoro_notifications) {
            return;
        }

        let started = NotificationContent::new(
            "Pomodoro started",
            format!("25 minutes of focus on \"{}\"", task.title),
        )
        .silent()
        .with_data(task.id.clone());
        let _ = self
            .notifications
            .schedule(None, started, Trigger::Immediate);

        let Some(end) = task.pomodoro_end_time else {
            return;
        };
        // Never ask the platform for a trigger in the past.
        let at = end.max(now + Duration::seconds(1));
        let done = NotificationContent::new(
            "Pomodoro complete",
            format!("Session on \"{}\" is done. Take a break!", task.title),
        )
        .with_data(task.id.clone());
        if let Ok(id) = self.notifications.schedule(None, done, Trigger::At(at)) {
            task.notification_id = Some(id);
        }
    }

    /// Replace the recurring streak reminder with one at the configured
    /// time. An invalid HH:MM string or a disabled switch just cancels.
    pub fn schedule_daily_streak_reminder(&self, settings: &NotificationSettings) {
        let _ = self.notifications.cancel(DAILY_STREAK_IDENTITY);
        if !(settings.enabled && settings.daily_streak_reminders) {
            return;
        }
        let Ok(time) = NaiveTime::parse_from_str(&settings.daily_reminder_time, "%H:%M") else {
            return;
        };
        let content = NotificationContent::new(
            "Keep your streak alive! 🔥",
            "Complete at least one task today to keep your streak going.",
        );
        let _ = self.notifications.schedule(
            Some(DAILY_STREAK_IDENTITY),
            content,
            Trigger::Daily {
                hour: time.hour(),
                minute: time.minute(),
            },
        );
    }

    /// One-shot celebration when the streak extends to 7, 14 or 30 days.
    /// A freeze-token day parked at a milestone length does not re-fire.
    pub fn streak_milestone(&self, change: &StreakChange, settings: &NotificationSettings) {
        if change.event != StreakEvent::Extended {
            return;
        }
        if !(settings.enabled && settings.streak_milestones) {
            return;
        }
        let streak = change.streak;
        if !STREAK_MILESTONES.contains(&streak) {
            return;
        }
        let content = NotificationContent::new(
            format!("🔥 {streak}-day streak!"),
            format!("You've kept your streak going for {streak} days straight."),
        );
        let _ = self
            .notifications
            .schedule(None, content, Trigger::Immediate);
    }

    /// Immediate notification for a newly earned badge.
    pub fn achievement_unlocked(&self, badge: &Badge, settings: &NotificationSettings) {
        if !(settings.enabled && settings.achievements) {
            return;
        }
        let content = NotificationContent::new(
            format!("{} Badge unlocked: {}", badge.emoji, badge.title),
            badge.description.clone(),
        );
        let _ = self
            .notifications
            .schedule(None, content, Trigger::Immediate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Effort;
    use crate::pomodoro;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(date: NaiveDate, h: u32, min: u32) -> NaiveDateTime {
        date.and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn future_task_fires_at_nine() {
        let task = Task::new("Plan trip", Effort::Easy, date(2026, 3, 10));
        let now = at(date(2026, 3, 2), 15, 0);
        assert_eq!(
            task_reminder_at(&task, now),
            Some(at(date(2026, 3, 10), 9, 0))
        );
    }

    #[test]
    fn future_task_never_fires_immediately() {
        let task = Task::new("Early slot", Effort::Easy, date(2026, 3, 3));
        // Late the night before: still tomorrow 09:00, never an immediate
        // delivery.
        let now = at(date(2026, 3, 2), 23, 59);
        assert_eq!(
            task_reminder_at(&task, now),
            Some(at(date(2026, 3, 3), 9, 0))
        );
        // The minimum-lead clamp keeps any computed trigger at least two
        // minutes out.
        let computed = task_reminder_at(&task, now).unwrap();
        assert!(computed >= now + Duration::minutes(MIN_LEAD_MINUTES));
    }

    #[test]
    fn timed_today_task_fires_thirty_minutes_early() {
        let mut task = Task::new("Call the bank", Effort::Medium, date(2026, 3, 2));
        task.time = NaiveTime::from_hms_opt(14, 0, 0);
        let now = at(date(2026, 3, 2), 10, 0);
        assert_eq!(
            task_reminder_at(&task, now),
            Some(at(date(2026, 3, 2), 13, 30))
        );
    }

    #[test]
    fn past_slots_are_skipped_silently() {
        let mut timed = Task::new("Lunch", Effort::Easy, date(2026, 3, 2));
        timed.time = NaiveTime::from_hms_opt(12, 0, 0);
        assert_eq!(task_reminder_at(&timed, at(date(2026, 3, 2), 11, 45)), None);

        let untimed = Task::new("Anything", Effort::Easy, date(2026, 3, 2));
        assert_eq!(
            task_reminder_at(&untimed, at(date(2026, 3, 2), 9, 1)),
            None
        );
        assert_eq!(
            task_reminder_at(&untimed, at(date(2026, 3, 2), 8, 0)),
            Some(at(date(2026, 3, 2), 9, 0))
        );
    }

    #[test]
    fn past_dated_task_gets_no_reminder() {
        let task = Task::new("Yesterday", Effort::Easy, date(2026, 3, 1));
        assert_eq!(task_reminder_at(&task, at(date(2026, 3, 2), 10, 0)), None);
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Request {
        identity: Option<String>,
        content: NotificationContent,
        trigger: Trigger,
    }

    #[derive(Default)]
    struct Recording {
        scheduled: Mutex<Vec<Request>>,
        cancelled: Mutex<Vec<String>>,
        next_id: Mutex<u32>,
    }

    impl NotificationService for Recording {
        fn schedule(
            &self,
            identity: Option<&str>,
            content: NotificationContent,
            trigger: Trigger,
        ) -> Result<String, crate::error::NotificationError> {
            self.scheduled.lock().unwrap().push(Request {
                identity: identity.map(str::to_string),
                content,
                trigger,
            });
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            Ok(format!("n-{next}"))
        }

        fn cancel(&self, id: &str) -> Result<(), crate::error::NotificationError> {
            self.cancelled.lock().unwrap().push(id.to_string());
            Ok(())
        }

        fn list_scheduled(&self) -> Vec<String> {
            Vec::new()
        }
    }

    fn scheduler() -> (Arc<Recording>, ReminderScheduler) {
        let recording = Arc::new(Recording::default());
        let scheduler = ReminderScheduler::new(recording.clone(), Arc::new(super::super::NullFeedback));
        (recording, scheduler)
    }

    #[test]
    fn reschedule_cancels_previous_handle() {
        let (recording, scheduler) = scheduler();
        let settings = NotificationSettings::default();
        let mut task = Task::new("Plan trip", Effort::Easy, date(2026, 3, 10));
        task.notification_id = Some("stale".into());

        scheduler.schedule_task_reminder(&mut task, &settings, at(date(2026, 3, 2), 10, 0));

        assert_eq!(recording.cancelled.lock().unwrap().as_slice(), ["stale"]);
        assert_eq!(recording.scheduled.lock().unwrap().len(), 1);
        assert_eq!(task.notification_id.as_deref(), Some("n-1"));
    }

    #[test]
    fn master_switch_off_only_cancels() {
        let (recording, scheduler) = scheduler();
        let settings = NotificationSettings {
            enabled: false,
            ..NotificationSettings::default()
        };
        let mut task = Task::new("Plan trip", Effort::Easy, date(2026, 3, 10));
        task.notification_id = Some("stale".into());

        scheduler.schedule_task_reminder(&mut task, &settings, at(date(2026, 3, 2), 10, 0));

        assert!(recording.scheduled.lock().unwrap().is_empty());
        assert!(task.notification_id.is_none());
    }

    #[test]
    fn daily_streak_reminder_replaces_under_fixed_identity() {
        let (recording, scheduler) = scheduler();
        let settings = NotificationSettings {
            daily_reminder_time: "08:30".into(),
            ..NotificationSettings::default()
        };

        scheduler.schedule_daily_streak_reminder(&settings);
        scheduler.schedule_daily_streak_reminder(&settings);

        let cancelled = recording.cancelled.lock().unwrap();
        assert_eq!(
            cancelled.as_slice(),
            [DAILY_STREAK_IDENTITY, DAILY_STREAK_IDENTITY]
        );
        let scheduled = recording.scheduled.lock().unwrap();
        assert_eq!(scheduled.len(), 2);
        assert_eq!(
            scheduled[0].identity.as_deref(),
            Some(DAILY_STREAK_IDENTITY)
        );
        assert_eq!(
            scheduled[0].trigger,
            Trigger::Daily { hour: 8, minute: 30 }
        );
    }

    #[test]
    fn invalid_reminder_time_is_skipped_silently() {
        let (recording, scheduler) = scheduler();
        let settings = NotificationSettings {
            daily_reminder_time: "soonish".into(),
            ..NotificationSettings::default()
        };
        scheduler.schedule_daily_streak_reminder(&settings);
        assert!(recording.scheduled.lock().unwrap().is_empty());
    }

    fn extended_to(streak: u32) -> StreakChange {
        StreakChange {
            streak,
            freeze_tokens: 0,
            event: StreakEvent::Extended,
            token_granted: false,
        }
    }

    #[test]
    fn milestones_fire_only_at_7_14_30() {
        let (recording, scheduler) = scheduler();
        let settings = NotificationSettings::default();
        for streak in [1, 6, 7, 8, 14, 15, 29, 30, 31] {
            scheduler.streak_milestone(&extended_to(streak), &settings);
        }
        let scheduled = recording.scheduled.lock().unwrap();
        assert_eq!(scheduled.len(), 3);
        assert!(scheduled[0].content.title.contains("7-day"));
        assert!(scheduled[2].content.title.contains("30-day"));
    }

    #[test]
    fn token_protected_day_does_not_repeat_a_milestone() {
        let (recording, scheduler) = scheduler();
        let settings = NotificationSettings::default();
        let parked = StreakChange {
            streak: 7,
            freeze_tokens: 0,
            event: StreakEvent::TokenUsed,
            token_granted: false,
        };
        scheduler.streak_milestone(&parked, &settings);
        assert!(recording.scheduled.lock().unwrap().is_empty());
    }

    #[test]
    fn pomodoro_start_schedules_silent_start_and_end() {
        let (recording, scheduler) = scheduler();
        let settings = NotificationSettings::default();
        let mut task = Task::new("Deep work", Effort::Medium, date(2026, 3, 2));
        let now = Utc::now();
        let end = pomodoro::start(&mut task, now).unwrap();

        scheduler.pomodoro_started(&mut task, &settings, false, now);

        let scheduled = recording.scheduled.lock().unwrap();
        assert_eq!(scheduled.len(), 2);
        assert!(scheduled[0].content.silent);
        assert_eq!(scheduled[0].trigger, Trigger::Immediate);
        assert_eq!(scheduled[1].trigger, Trigger::At(end));
        assert_eq!(scheduled[1].content.data.as_deref(), Some(task.id.as_str()));
        assert_eq!(task.notification_id.as_deref(), Some("n-2"));
    }

    #[test]
    fn pomodoro_notifications_switch_disables_both() {
        let (recording, scheduler) = scheduler();
        let settings = NotificationSettings {
            pomodoro_notifications: false,
            ..NotificationSettings::default()
        };
        let mut task = Task::new("Deep work", Effort::Medium, date(2026, 3, 2));
        let now = Utc::now();
        pomodoro::start(&mut task, now).unwrap();

        scheduler.pomodoro_started(&mut task, &settings, false, now);
        assert!(recording.scheduled.lock().unwrap().is_empty());
        assert!(task.notification_id.is_none());
    }
}
