//! Application service: the single writer over the storage envelope.
//!
//! Every operation is lock -> load -> compute -> save -> best-effort
//! notifications. The async mutex guarantees at most one in-flight
//! read-modify-write, so a periodic pomodoro poll can never race a
//! user-initiated toggle into a lost update. Validation and persistence
//! failures surface as `Err` before any notification success is claimed;
//! scheduling failures after a committed save are swallowed.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use tokio::sync::Mutex;

use crate::badges;
use crate::error::{CoreError, ValidationError};
use crate::lifecycle::{self, DaySummary};
use crate::model::{Badge, Effort, Note, Storage, Task};
use crate::pomodoro::{self, PomodoroOutcome};
use crate::progression;
use crate::reminder::{
    FeedbackService, NotificationService, NullFeedback, NullNotifications, ReminderScheduler,
};
use crate::storage::{BlobStore, NotificationSettings};

/// Local hour before which an added task counts as an early-bird event.
const EARLY_BIRD_HOUR: u32 = 8;

/// Partial update for [`App::edit_task`]. `None` leaves a field untouched;
/// for `time`, `Some(None)` clears it.
#[derive(Debug, Default, Clone)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub notes: Option<String>,
    pub effort: Option<Effort>,
    pub date: Option<NaiveDate>,
    pub time: Option<Option<NaiveTime>>,
}

/// What an on-foreground check did.
#[derive(Debug, Clone)]
pub struct ForegroundReport {
    /// Day-boundary processing, if one was crossed.
    pub day: Option<DaySummary>,
    /// Ids of tasks whose pomodoro sessions were auto-finished.
    pub finished_pomodoros: Vec<String>,
}

/// The application core. Owns the blob store, notification settings and
/// the reminder scheduler.
pub struct App {
    store: Arc<dyn BlobStore>,
    scheduler: ReminderScheduler,
    feedback: Arc<dyn FeedbackService>,
    /// Settings double as the single-writer critical section: every
    /// storage mutation holds this lock for its full load-compute-save.
    settings: Mutex<NotificationSettings>,
}

impl App {
    pub fn new(
        store: Arc<dyn BlobStore>,
        notifications: Arc<dyn NotificationService>,
        feedback: Arc<dyn FeedbackService>,
        settings: NotificationSettings,
    ) -> Self {
        Self {
            store,
            scheduler: ReminderScheduler::new(notifications, feedback.clone()),
            feedback,
            settings: Mutex::new(settings),
        }
    }

    /// An app with no delivery backends. Notifications and feedback are
    /// discarded; everything else behaves normally.
    pub fn headless(store: Arc<dyn BlobStore>, settings: NotificationSettings) -> Self {
        Self::new(
            store,
            Arc::new(NullNotifications),
            Arc::new(NullFeedback),
            settings,
        )
    }

    fn clocks() -> (DateTime<Utc>, NaiveDateTime, NaiveDate) {
        let now = Utc::now();
        let local = now.with_timezone(&Local).naive_local();
        (now, local, local.date())
    }

    fn notify_badges(&self, settings: &NotificationSettings, earned: &[Badge]) {
        for badge in earned {
            self.scheduler.achievement_unlocked(badge, settings);
        }
    }

    /// Read-only copy of the current envelope.
    pub async fn snapshot(&self) -> Result<Storage, CoreError> {
        let _guard = self.settings.lock().await;
        Ok(self.store.load()?)
    }

    pub async fn settings(&self) -> NotificationSettings {
        self.settings.lock().await.clone()
    }

    /// Swap in new notification settings and bring the recurring streak
    /// reminder in line with them. Persisting the settings file is the
    /// caller's concern.
    pub async fn apply_settings(&self, settings: NotificationSettings) {
        let mut guard = self.settings.lock().await;
        *guard = settings;
        self.scheduler.schedule_daily_streak_reminder(&guard);
    }

    /// Create a task. Future-dated tasks count toward the planner badge
    /// and get a reminder; the add cue stays quiet for them. A task added
    /// before 08:00 local awards the early-bird badge.
    pub async fn add_task(
        &self,
        title: &str,
        effort: Effort,
        date: Option<NaiveDate>,
        time: Option<NaiveTime>,
    ) -> Result<Task, CoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingField("title").into());
        }

        let settings = self.settings.lock().await;
        let mut storage = self.store.load()?;
        let (now, now_local, today) = Self::clocks();

        let mut task = Task::new(title, effort, date.unwrap_or(today));
        task.time = time;
        let future = task.is_future(today);

        if future {
            storage.stats.calendar_tasks_created += 1;
        }
        let mut earned = Vec::new();
        if now_local.hour() < EARLY_BIRD_HOUR {
            earned.extend(badges::award(&mut storage.stats, badges::EARLY_BIRD, now));
        }
        earned.extend(badges::evaluate(&mut storage.stats, now));

        self.scheduler
            .schedule_task_reminder(&mut task, &settings, now_local);

        storage.tasks.push(task.clone());
        if let Err(e) = self.store.save(&storage) {
            // Roll back the pending reminder so a failed commit does not
            // leave a live notification claiming success.
            self.scheduler.cancel_for_task(&mut task);
            return Err(e.into());
        }

        if !future && settings.sound {
            self.feedback.play_sound("task-added");
        }
        self.notify_badges(&settings, &earned);
        Ok(task)
    }

    /// Flip a task's completion state, applying or reversing its XP.
    pub async fn toggle_task(&self, id: &str) -> Result<Task, CoreError> {
        let settings = self.settings.lock().await;
        let mut storage = self.store.load()?;
        let (now, _, _) = Self::clocks();

        let task = storage
            .task_mut(id)
            .ok_or_else(|| ValidationError::NotFound {
                kind: "task",
                id: id.to_string(),
            })?;
        task.completed = !task.completed;
        let completed = task.completed;
        let effort = task.effort;
        if completed {
            self.scheduler.cancel_for_task(task);
        }
        let updated = task.clone();

        if completed {
            progression::apply_completion(&mut storage.stats, effort);
        } else {
            progression::apply_uncompletion(&mut storage.stats, effort);
        }
        let earned = badges::evaluate(&mut storage.stats, now);

        self.store.save(&storage)?;
        self.notify_badges(&settings, &earned);
        Ok(updated)
    }

    /// Apply a partial edit. A changed date or time replaces the pending
    /// reminder; completed tasks keep none.
    pub async fn edit_task(&self, id: &str, update: TaskUpdate) -> Result<Task, CoreError> {
        if let Some(title) = &update.title {
            if title.trim().is_empty() {
                return Err(ValidationError::MissingField("title").into());
            }
        }

        let settings = self.settings.lock().await;
        let mut storage = self.store.load()?;
        let (_, now_local, _) = Self::clocks();

        let task = storage
            .task_mut(id)
            .ok_or_else(|| ValidationError::NotFound {
                kind: "task",
                id: id.to_string(),
            })?;

        if let Some(title) = update.title {
            task.title = title.trim().to_string();
        }
        if let Some(notes) = update.notes {
            task.notes = notes;
        }
        if let Some(effort) = update.effort {
            task.effort = effort;
        }
        let schedule_changed = update.date.is_some() || update.time.is_some();
        if let Some(date) = update.date {
            task.date = date;
        }
        if let Some(time) = update.time {
            task.time = time;
        }

        if schedule_changed {
            if task.completed {
                self.scheduler.cancel_for_task(task);
            } else {
                self.scheduler
                    .schedule_task_reminder(task, &settings, now_local);
            }
        }
        let updated = task.clone();

        self.store.save(&storage)?;
        Ok(updated)
    }

    /// Delete a task and cancel its pending reminder.
    pub async fn delete_task(&self, id: &str) -> Result<(), CoreError> {
        let _settings = self.settings.lock().await;
        let mut storage = self.store.load()?;

        let idx = storage
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| ValidationError::NotFound {
                kind: "task",
                id: id.to_string(),
            })?;
        let mut task = storage.tasks.remove(idx);
        self.scheduler.cancel_for_task(&mut task);

        self.store.save(&storage)?;
        Ok(())
    }

    /// Start a 25-minute session on a task. Only one session may run
    /// across the whole task list. Returns the session deadline.
    pub async fn start_pomodoro(
        &self,
        id: &str,
        suppress_feedback: bool,
    ) -> Result<DateTime<Utc>, CoreError> {
        let settings = self.settings.lock().await;
        let mut storage = self.store.load()?;
        let (now, _, _) = Self::clocks();

        if let Some(active) = storage.tasks.iter().find(|t| t.pomodoro_active) {
            return Err(ValidationError::InvalidState(format!(
                "a pomodoro is already running on '{}'",
                active.title
            ))
            .into());
        }
        let task = storage
            .task_mut(id)
            .ok_or_else(|| ValidationError::NotFound {
                kind: "task",
                id: id.to_string(),
            })?;

        let end = pomodoro::start(task, now)?;
        self.scheduler
            .pomodoro_started(task, &settings, suppress_feedback, now);

        if let Err(e) = self.store.save(&storage) {
            // Roll back the scheduled end notification so a failed commit
            // does not fire for a session that was never recorded.
            if let Some(task) = storage.task_mut(id) {
                self.scheduler.cancel_for_task(task);
            }
            return Err(e.into());
        }
        Ok(end)
    }

    /// Stop the running session on a task before its deadline. No credit.
    pub async fn cancel_pomodoro(&self, id: &str) -> Result<(), CoreError> {
        let _settings = self.settings.lock().await;
        let mut storage = self.store.load()?;

        let task = storage
            .task_mut(id)
            .ok_or_else(|| ValidationError::NotFound {
                kind: "task",
                id: id.to_string(),
            })?;
        self.scheduler.cancel_for_task(task);
        if !pomodoro::cancel(task) {
            return Err(
                ValidationError::InvalidState(format!("no pomodoro running on '{id}'")).into(),
            );
        }

        self.store.save(&storage)?;
        Ok(())
    }

    /// Finish (or early-stop) the session on a task right now.
    pub async fn finish_pomodoro(&self, id: &str) -> Result<PomodoroOutcome, CoreError> {
        let settings = self.settings.lock().await;
        let mut storage = self.store.load()?;
        let (now, _, _) = Self::clocks();

        let task = storage
            .task_mut(id)
            .ok_or_else(|| ValidationError::NotFound {
                kind: "task",
                id: id.to_string(),
            })?;
        self.scheduler.cancel_for_task(task);
        let outcome = pomodoro_finish_split(&mut storage.tasks, id, &mut storage.stats, now);
        let earned = badges::evaluate(&mut storage.stats, now);

        self.store.save(&storage)?;
        self.notify_badges(&settings, &earned);
        Ok(outcome)
    }

    /// Auto-finish every session whose deadline has passed. The 1-second
    /// countdown tick and the foreground re-check both land here.
    pub async fn poll_pomodoros(&self) -> Result<Vec<String>, CoreError> {
        let settings = self.settings.lock().await;
        let mut storage = self.store.load()?;
        let (now, _, _) = Self::clocks();

        let finished = finish_expired(&mut storage, now);
        if finished.is_empty() {
            return Ok(finished);
        }
        let earned = badges::evaluate(&mut storage.stats, now);

        self.store.save(&storage)?;
        self.notify_badges(&settings, &earned);
        Ok(finished)
    }

    /// Explicit end-of-day processing. Returns `None` without touching
    /// storage when today's boundary has already been scored, so pressing
    /// the button twice cannot burn a freeze token on the reset list.
    pub async fn end_day(&self) -> Result<Option<DaySummary>, CoreError> {
        let settings = self.settings.lock().await;
        let mut storage = self.store.load()?;
        let (now, _, today) = Self::clocks();

        if !lifecycle::is_new_day(storage.stats.last_end_day, today) {
            return Ok(None);
        }
        let summary = lifecycle::end_day(&mut storage, today, now);
        self.store.save(&storage)?;

        self.scheduler.streak_milestone(&summary.streak, &settings);
        self.notify_badges(&settings, &summary.new_badges);
        Ok(Some(summary))
    }

    /// Foreground/launch hook: process a missed day boundary if there is
    /// one, then sweep expired pomodoro sessions. Cheap no-op otherwise.
    pub async fn on_foreground(&self) -> Result<ForegroundReport, CoreError> {
        let settings = self.settings.lock().await;
        let mut storage = self.store.load()?;
        let (now, _, today) = Self::clocks();

        let day = lifecycle::auto_end_day(&mut storage, today, now);
        let finished = finish_expired(&mut storage, now);
        let mut earned = Vec::new();
        if !finished.is_empty() {
            earned = badges::evaluate(&mut storage.stats, now);
        }

        if day.is_some() || !finished.is_empty() {
            self.store.save(&storage)?;
        }

        if let Some(summary) = &day {
            self.scheduler.streak_milestone(&summary.streak, &settings);
            self.notify_badges(&settings, &summary.new_badges);
        }
        self.notify_badges(&settings, &earned);
        Ok(ForegroundReport {
            day,
            finished_pomodoros: finished,
        })
    }

    /// Create a note.
    pub async fn add_note(&self, title: &str, content: &str) -> Result<Note, CoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingField("title").into());
        }

        let settings = self.settings.lock().await;
        let mut storage = self.store.load()?;
        let (now, _, _) = Self::clocks();

        let note = Note::new(title, content);
        storage.notes.push(note.clone());
        storage.stats.notes_created += 1;
        let earned = badges::evaluate(&mut storage.stats, now);

        self.store.save(&storage)?;
        self.notify_badges(&settings, &earned);
        Ok(note)
    }

    /// Update a note's title and/or content, bumping `updated_at`.
    pub async fn edit_note(
        &self,
        id: &str,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Note, CoreError> {
        if let Some(title) = title {
            if title.trim().is_empty() {
                return Err(ValidationError::MissingField("title").into());
            }
        }

        let _settings = self.settings.lock().await;
        let mut storage = self.store.load()?;

        let note = storage
            .note_mut(id)
            .ok_or_else(|| ValidationError::NotFound {
                kind: "note",
                id: id.to_string(),
            })?;
        if let Some(title) = title {
            note.title = title.trim().to_string();
        }
        if let Some(content) = content {
            note.content = content.to_string();
        }
        note.touch();
        let updated = note.clone();

        self.store.save(&storage)?;
        Ok(updated)
    }

    pub async fn delete_note(&self, id: &str) -> Result<(), CoreError> {
        let _settings = self.settings.lock().await;
        let mut storage = self.store.load()?;

        let len = storage.notes.len();
        storage.notes.retain(|n| n.id != id);
        if storage.notes.len() == len {
            return Err(ValidationError::NotFound {
                kind: "note",
                id: id.to_string(),
            }
            .into());
        }

        self.store.save(&storage)?;
        Ok(())
    }
}

fn pomodoro_finish_split(
    tasks: &mut [Task],
    id: &str,
    stats: &mut crate::model::Stats,
    now: DateTime<Utc>,
) -> PomodoroOutcome {
    match tasks.iter_mut().find(|t| t.id == id) {
        Some(task) => pomodoro::finish(task, stats, now),
        None => PomodoroOutcome::AlreadyInactive,
    }
}

/// Finish every active session past its deadline; returns the task ids
/// that were credited.
fn finish_expired(storage: &mut Storage, now: DateTime<Utc>) -> Vec<String> {
    let mut finished = Vec::new();
    let stats = &mut storage.stats;
    for task in &mut storage.tasks {
        let expired = task.pomodoro_active
            && matches!(task.pomodoro_end_time, Some(end) if now >= end);
        if expired {
            if let PomodoroOutcome::Credited { .. } = pomodoro::finish(task, stats, now) {
                finished.push(task.id.clone());
            }
        }
    }
    finished
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{NotificationError, StorageError};
    use crate::reminder::{NotificationContent, Trigger, DAILY_STREAK_IDENTITY};
    use crate::storage::MemoryStore;
    use chrono::Duration;
    use std::sync::Mutex as StdMutex;

    fn app() -> App {
        App::headless(
            Arc::new(MemoryStore::new()),
            NotificationSettings::default(),
        )
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Captures every schedule/cancel request for assertions.
    #[derive(Default)]
    struct Recording {
        scheduled: StdMutex<Vec<(Option<String>, NotificationContent, Trigger)>>,
        cancelled: StdMutex<Vec<String>>,
    }

    impl NotificationService for Recording {
        fn schedule(
            &self,
            identity: Option<&str>,
            content: NotificationContent,
            trigger: Trigger,
        ) -> Result<String, NotificationError> {
            let mut scheduled = self.scheduled.lock().unwrap();
            let id = identity
                .map(str::to_string)
                .unwrap_or_else(|| format!("n-{}", scheduled.len() + 1));
            scheduled.push((identity.map(str::to_string), content, trigger));
            Ok(id)
        }

        fn cancel(&self, id: &str) -> Result<(), NotificationError> {
            self.cancelled.lock().unwrap().push(id.to_string());
            Ok(())
        }

        fn list_scheduled(&self) -> Vec<String> {
            Vec::new()
        }
    }

    /// Loads fine, refuses every save.
    struct FailingSaves(MemoryStore);

    impl BlobStore for FailingSaves {
        fn load(&self) -> Result<Storage, StorageError> {
            self.0.load()
        }

        fn save(&self, _storage: &Storage) -> Result<(), StorageError> {
            Err(StorageError::SaveFailed {
                path: "unwritable".into(),
                message: "disk full".into(),
            })
        }
    }

    #[tokio::test]
    async fn add_and_toggle_awards_xp_and_first_badge() {
        let app = app();
        let task = app
            .add_task("Water the plants", Effort::Easy, None, None)
            .await
            .unwrap();
        assert_eq!(task.date, today());

        let toggled = app.toggle_task(&task.id).await.unwrap();
        assert!(toggled.completed);

        let storage = app.snapshot().await.unwrap();
        assert_eq!(storage.stats.xp, 5);
        assert_eq!(storage.stats.tasks_completed, 1);
        assert_eq!(storage.stats.level, 1);
        assert!(storage.stats.badge("first-step").unwrap().earned);

        // Un-toggle reverses cleanly.
        app.toggle_task(&task.id).await.unwrap();
        let storage = app.snapshot().await.unwrap();
        assert_eq!(storage.stats.xp, 0);
        assert_eq!(storage.stats.tasks_completed, 0);
        // Earned badges are never reset.
        assert!(storage.stats.badge("first-step").unwrap().earned);
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let app = app();
        assert!(app.add_task("   ", Effort::Easy, None, None).await.is_err());
        assert!(app.add_note("", "body").await.is_err());
    }

    #[tokio::test]
    async fn future_task_counts_toward_planner() {
        let app = app();
        let future = today() + Duration::days(3);
        for i in 0..5 {
            app.add_task(&format!("Plan {i}"), Effort::Easy, Some(future), None)
                .await
                .unwrap();
        }
        let storage = app.snapshot().await.unwrap();
        assert_eq!(storage.stats.calendar_tasks_created, 5);
        assert!(storage.stats.badge("planner").unwrap().earned);
    }

    #[tokio::test]
    async fn only_one_pomodoro_across_all_tasks() {
        let app = app();
        let a = app.add_task("A", Effort::Easy, None, None).await.unwrap();
        let b = app.add_task("B", Effort::Easy, None, None).await.unwrap();

        app.start_pomodoro(&a.id, false).await.unwrap();
        let err = app.start_pomodoro(&b.id, false).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidState(_))
        ));

        app.cancel_pomodoro(&a.id).await.unwrap();
        app.start_pomodoro(&b.id, false).await.unwrap();
    }

    #[tokio::test]
    async fn cancelled_pomodoro_earns_nothing() {
        let app = app();
        let task = app.add_task("A", Effort::Easy, None, None).await.unwrap();
        app.start_pomodoro(&task.id, false).await.unwrap();
        app.cancel_pomodoro(&task.id).await.unwrap();

        let storage = app.snapshot().await.unwrap();
        assert_eq!(storage.stats.total_pomodoros, 0);
        assert_eq!(storage.stats.pomodoro_xp, 0);
        assert!(!storage.task(&task.id).unwrap().pomodoro_active);

        // Cancelling again is an error: nothing is running.
        assert!(app.cancel_pomodoro(&task.id).await.is_err());
    }

    #[tokio::test]
    async fn early_stop_via_finish_is_uncredited() {
        let app = app();
        let task = app.add_task("A", Effort::Easy, None, None).await.unwrap();
        app.start_pomodoro(&task.id, false).await.unwrap();

        let outcome = app.finish_pomodoro(&task.id).await.unwrap();
        assert_eq!(outcome, PomodoroOutcome::StoppedEarly);
        let storage = app.snapshot().await.unwrap();
        assert_eq!(storage.stats.total_pomodoros, 0);
    }

    #[tokio::test]
    async fn poll_sweeps_expired_sessions() {
        let app = app();
        let task = app.add_task("A", Effort::Easy, None, None).await.unwrap();
        app.start_pomodoro(&task.id, false).await.unwrap();

        // Rewind the deadline so the session reads as expired.
        {
            let mut storage = app.snapshot().await.unwrap();
            let t = storage.task_mut(&task.id).unwrap();
            t.pomodoro_end_time = Some(Utc::now() - Duration::seconds(1));
            app.store.save(&storage).unwrap();
        }

        let finished = app.poll_pomodoros().await.unwrap();
        assert_eq!(finished, vec![task.id.clone()]);
        let storage = app.snapshot().await.unwrap();
        assert_eq!(storage.stats.total_pomodoros, 1);
        assert_eq!(storage.stats.pomodoro_xp, 5);

        // Nothing left to sweep.
        assert!(app.poll_pomodoros().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn end_day_resets_daily_state() {
        let app = app();
        let task = app.add_task("A", Effort::Medium, None, None).await.unwrap();
        app.toggle_task(&task.id).await.unwrap();

        let summary = app.end_day().await.unwrap().expect("first end of day");
        assert_eq!(summary.completed_tasks, 1);
        assert_eq!(summary.task_xp, 10);

        let storage = app.snapshot().await.unwrap();
        assert_eq!(storage.stats.streak, 1);
        assert_eq!(storage.stats.daily_tasks_completed, 0);
        assert!(!storage.task(&task.id).unwrap().completed);
        // XP stays as credited at toggle time.
        assert_eq!(storage.stats.xp, 10);

        // Same-day foreground check is a no-op.
        let report = app.on_foreground().await.unwrap();
        assert!(report.day.is_none());
        assert!(report.finished_pomodoros.is_empty());
    }

    #[tokio::test]
    async fn on_foreground_processes_missed_boundary() {
        let app = app();
        let task = app.add_task("A", Effort::Easy, None, None).await.unwrap();
        app.toggle_task(&task.id).await.unwrap();
        {
            let mut storage = app.snapshot().await.unwrap();
            storage.stats.last_end_day = Some(Utc::now() - Duration::days(2));
            app.store.save(&storage).unwrap();
        }

        let report = app.on_foreground().await.unwrap();
        let summary = report.day.expect("boundary must be processed");
        assert_eq!(summary.streak.streak, 1);
    }

    #[tokio::test]
    async fn note_lifecycle_updates_counter() {
        let app = app();
        let note = app.add_note("Ideas", "first draft").await.unwrap();
        let storage = app.snapshot().await.unwrap();
        assert_eq!(storage.stats.notes_created, 1);
        assert!(storage.stats.badge("note-beginner").unwrap().earned);

        let edited = app
            .edit_note(&note.id, None, Some("second draft"))
            .await
            .unwrap();
        assert_eq!(edited.content, "second draft");
        assert!(edited.updated_at >= edited.created_at);

        app.delete_note(&note.id).await.unwrap();
        let storage = app.snapshot().await.unwrap();
        assert!(storage.notes.is_empty());
        // Lifetime counter survives deletion.
        assert_eq!(storage.stats.notes_created, 1);
    }

    #[tokio::test]
    async fn edit_task_replaces_fields() {
        let app = app();
        let task = app.add_task("Drafty", Effort::Easy, None, None).await.unwrap();
        let updated = app
            .edit_task(
                &task.id,
                TaskUpdate {
                    title: Some("Final".into()),
                    effort: Some(Effort::Hard),
                    date: Some(today() + Duration::days(1)),
                    ..TaskUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Final");
        assert_eq!(updated.effort, Effort::Hard);
        assert_eq!(updated.date, today() + Duration::days(1));

        let missing = app.edit_task("nope", TaskUpdate::default()).await;
        assert!(missing.is_err());
    }

    #[tokio::test]
    async fn delete_task_removes_it() {
        let app = app();
        let task = app.add_task("Gone soon", Effort::Easy, None, None).await.unwrap();
        app.delete_task(&task.id).await.unwrap();
        assert!(app.snapshot().await.unwrap().tasks.is_empty());
        assert!(app.delete_task(&task.id).await.is_err());
    }

    #[tokio::test]
    async fn same_day_end_day_is_a_no_op() {
        let app = app();
        let task = app.add_task("A", Effort::Easy, None, None).await.unwrap();
        app.toggle_task(&task.id).await.unwrap();

        assert!(app.end_day().await.unwrap().is_some());
        let storage = app.snapshot().await.unwrap();
        assert_eq!(storage.stats.streak, 1);

        // A second press the same day must not rescore the freshly reset
        // list (0 completions) and knock the streak back down.
        assert!(app.end_day().await.unwrap().is_none());
        let storage = app.snapshot().await.unwrap();
        assert_eq!(storage.stats.streak, 1);
        assert_eq!(storage.stats.freeze_tokens, 0);
    }

    #[tokio::test]
    async fn apply_settings_reschedules_daily_reminder() {
        let recording = Arc::new(Recording::default());
        let app = App::new(
            Arc::new(MemoryStore::new()),
            recording.clone(),
            Arc::new(NullFeedback),
            NotificationSettings::default(),
        );

        let settings = NotificationSettings {
            daily_reminder_time: "07:45".into(),
            ..NotificationSettings::default()
        };
        app.apply_settings(settings.clone()).await;
        assert_eq!(app.settings().await, settings);

        let scheduled = recording.scheduled.lock().unwrap();
        let (identity, _, trigger) = scheduled.last().expect("reminder rescheduled");
        assert_eq!(identity.as_deref(), Some(DAILY_STREAK_IDENTITY));
        assert_eq!(*trigger, Trigger::Daily { hour: 7, minute: 45 });
    }

    #[tokio::test]
    async fn failed_save_cancels_pomodoro_end_notification() {
        let mut seeded = Storage::default();
        let task = Task::new("Deep work", Effort::Medium, today());
        let id = task.id.clone();
        seeded.tasks.push(task);

        let recording = Arc::new(Recording::default());
        let app = App::new(
            Arc::new(FailingSaves(MemoryStore::with(seeded))),
            recording.clone(),
            Arc::new(NullFeedback),
            NotificationSettings::default(),
        );

        assert!(app.start_pomodoro(&id, true).await.is_err());
        // The start cue and end notification were scheduled, then the end
        // handle was revoked when the commit failed.
        assert_eq!(recording.scheduled.lock().unwrap().len(), 2);
        assert!(recording.cancelled.lock().unwrap().iter().any(|c| c == "n-2"));
    }
}
