//! Reminder scheduling: trigger policy plus the delivery-side traits.
//!
//! The crate never talks to a platform notification API directly. Delivery
//! goes through [`NotificationService`] and haptic/audio cues through
//! [`FeedbackService`]; both ship with null implementations so every caller
//! works headless. The policy (when to fire what) lives in [`policy`].

mod policy;

pub use policy::{task_reminder_at, ReminderScheduler, DAILY_STREAK_IDENTITY, STREAK_MILESTONES};

use chrono::{DateTime, Utc};

use crate::error::NotificationError;

/// Payload of a notification request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    /// Delivered without the platform alert sound.
    pub silent: bool,
    /// Opaque payload forwarded to the consumer (e.g. a task id).
    pub data: Option<String>,
}

impl NotificationContent {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            silent: false,
            data: None,
        }
    }

    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }
}

/// When a notification should fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Immediate,
    At(DateTime<Utc>),
    /// Repeats every day at the given wall-clock time.
    Daily { hour: u32, minute: u32 },
}

/// Platform notification scheduler.
///
/// `schedule` returns the handle used for later cancellation. An explicit
/// `identity` makes the request replace any pending notification scheduled
/// under the same identity instead of stacking a duplicate.
pub trait NotificationService: Send + Sync {
    fn schedule(
        &self,
        identity: Option<&str>,
        content: NotificationContent,
        trigger: Trigger,
    ) -> Result<String, NotificationError>;

    fn cancel(&self, id: &str) -> Result<(), NotificationError>;

    /// Handles of all currently pending notifications.
    fn list_scheduled(&self) -> Vec<String>;
}

/// Audio/haptic cues. Best effort; there is nothing useful to do on failure.
pub trait FeedbackService: Send + Sync {
    fn play_sound(&self, _name: &str) {} // default no-op

    fn vibrate(&self, _pattern: &[u64]) {} // default no-op
}

/// Discards every request. Used headless and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifications;

impl NotificationService for NullNotifications {
    fn schedule(
        &self,
        identity: Option<&str>,
        _content: NotificationContent,
        _trigger: Trigger,
    ) -> Result<String, NotificationError> {
        Ok(identity
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()))
    }

    fn cancel(&self, _id: &str) -> Result<(), NotificationError> {
        Ok(())
    }

    fn list_scheduled(&self) -> Vec<String> {
        Vec::new()
    }
}

/// No-op feedback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFeedback;

impl FeedbackService for NullFeedback {}
