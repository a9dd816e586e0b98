//! Task domain model.
//!
//! # Responsibility
//! - Define the in-memory task record handed to screens.
//!
//! # Invariants
//! - `id` is assigned by the repository, starts at 1, and strictly
//!   increases per created task; ids of deleted tasks are never reused.

use serde::{Deserialize, Serialize};

/// Stable identifier for a task within one process lifetime.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = i64;

/// An actionable item held only in process memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Repository-assigned id, unique for the process lifetime.
    pub id: TaskId,
    /// Short display title.
    pub title: String,
    /// Free-form details, empty by default.
    #[serde(default)]
    pub description: String,
    /// Completion flag, false for new tasks.
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Creates an open task with the given identity and text fields.
    pub fn new(id: TaskId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            completed: false,
        }
    }
}
