//! Persisted record shapes: tasks, notes, stats and the storage envelope.

mod note;
mod stats;
mod task;

pub use note::Note;
pub use stats::{Badge, Stats};
pub use task::{Effort, Task};

use serde::{Deserialize, Serialize};

/// The single persisted value. Every mutation is a full
/// read-modify-write-persist of this envelope; there are no partial updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Storage {
    pub tasks: Vec<Task>,
    pub stats: Stats,
    pub notes: Vec<Note>,
}

impl Storage {
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn note_mut(&mut self, id: &str) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| n.id == id)
    }
}
