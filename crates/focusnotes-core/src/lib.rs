//! # Focus Notes Core Library
//!
//! Core business logic for the Focus Notes productivity tracker. All
//! operations are available through a standalone CLI binary; any GUI is a
//! thin layer over this same library.
//!
//! ## Architecture
//!
//! - **Progression**: XP, levels and the streak/freeze-token rule as pure
//!   functions over [`Stats`]
//! - **Badges**: a static catalog of achievements, unlocked idempotently
//!   from stats predicates
//! - **Lifecycle**: day-boundary detection and end-of-day processing
//! - **Pomodoro**: wall-clock 25-minute sessions where the caller drives
//!   completion via polling
//! - **Reminder**: trigger policy plus traits abstracting the platform
//!   notification/feedback backends
//! - **Storage**: a single JSON envelope (tasks, stats, notes) and TOML
//!   notification settings
//! - **Service**: [`App`], the single serialized writer tying it together
//!
//! ## Key Components
//!
//! - [`App`]: the application service every frontend talks to
//! - [`Storage`]: the persisted envelope
//! - [`BlobStore`]: persistence seam, with file and in-memory stores

pub mod badges;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod pomodoro;
pub mod progression;
pub mod reminder;
pub mod service;
pub mod storage;

pub use error::{ConfigError, CoreError, NotificationError, StorageError, ValidationError};
pub use lifecycle::DaySummary;
pub use model::{Badge, Effort, Note, Stats, Storage, Task};
pub use pomodoro::PomodoroOutcome;
pub use reminder::{
    FeedbackService, NotificationService, NullFeedback, NullNotifications, ReminderScheduler,
};
pub use service::{App, ForegroundReport, TaskUpdate};
pub use storage::{BlobStore, JsonFileStore, MemoryStore, NotificationSettings};
