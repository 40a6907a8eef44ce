//! Note records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A free-form note. `updated_at` is bumped on every edit and never
/// precedes `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    /// Serialized text plus formatting spans. Opaque to the core.
    #[serde(default)]
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Note {
            id: format!("note-{}-{}", now.timestamp(), uuid::Uuid::new_v4()),
            title: title.into(),
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the note as edited now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
