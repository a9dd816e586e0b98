//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note record as read from storage.
//!
//! # Invariants
//! - `id` is assigned by SQLite auto-increment and never reused.
//! - `created_at` is epoch milliseconds, set once at insert time.

use serde::{Deserialize, Serialize};

/// Stable storage-assigned identifier for a note.
pub type NoteId = i64;

/// A durable note row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Storage-assigned primary key.
    pub id: NoteId,
    /// Short display title.
    pub title: String,
    /// Body text; a NULL column reads back as empty.
    #[serde(default)]
    pub content: String,
    /// Insert timestamp in epoch milliseconds.
    pub created_at: i64,
}
