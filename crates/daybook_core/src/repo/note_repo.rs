//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist notes through the four parameterized statements
//!   (select-all, insert, update, delete).
//! - Re-derive and publish the full snapshot after every mutation.
//!
//! # Invariants
//! - `refresh` is the only point where storage state becomes visible to
//!   readers; every mutating call ends with it.
//! - The connection mutex is held across each statement and its trailing
//!   reload, so mutations are serialized and the snapshot published after a
//!   mutating call returns reflects storage no earlier than that call's
//!   effect.
//! - Updates and deletes targeting a missing id complete silently.

use crate::db::DbError;
use crate::model::note::{Note, NoteId};
use crate::observe::{SnapshotCell, Subscription};
use log::debug;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

const NOTE_SELECT_SQL: &str = "SELECT id, title, content, created_at FROM notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence operations.
#[derive(Debug)]
pub enum RepoError {
    /// Storage-access failure, propagated uncaught to the caller.
    Db(DbError),
    /// Write/read-back mismatch inside a single call.
    InconsistentState(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent note state: {details}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InconsistentState(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the observable note collection.
pub trait NoteRepository {
    /// Returns the latest published note list.
    fn snapshot(&self) -> Vec<Note>;
    /// Subscribes to every subsequent published note list.
    fn subscribe(&self) -> Subscription<Note>;
    /// Reloads all rows from storage and replaces the published snapshot.
    fn refresh(&self) -> RepoResult<()>;
    /// Inserts a note with a storage-assigned id and current timestamp,
    /// refreshes, and returns the created record.
    fn add_note(&self, title: &str, content: &str) -> RepoResult<Note>;
    /// Updates title/content for the note's id, then refreshes.
    fn update_note(&self, note: &Note) -> RepoResult<()>;
    /// Deletes the row with the given id, then refreshes.
    fn delete_note(&self, id: NoteId) -> RepoResult<()>;
}

/// SQLite-backed note repository owning its connection.
pub struct SqliteNoteRepository {
    conn: Mutex<Connection>,
    published: SnapshotCell<Note>,
}

impl SqliteNoteRepository {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// The published snapshot starts empty; call [`NoteRepository::refresh`]
    /// to make existing rows visible.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        ensure_connection_ready(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            published: SnapshotCell::new(),
        })
    }

    fn lock_conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn reload_and_publish(&self, conn: &Connection) -> RepoResult<()> {
        let notes = load_all_notes(conn)?;
        self.published.publish(notes);
        Ok(())
    }
}

impl NoteRepository for SqliteNoteRepository {
    fn snapshot(&self) -> Vec<Note> {
        self.published.snapshot()
    }

    fn subscribe(&self) -> Subscription<Note> {
        self.published.subscribe()
    }

    fn refresh(&self) -> RepoResult<()> {
        let conn = self.lock_conn();
        self.reload_and_publish(&conn)
    }

    fn add_note(&self, title: &str, content: &str) -> RepoResult<Note> {
        let conn = self.lock_conn();
        let created_at = epoch_millis();
        conn.execute(
            "INSERT INTO notes (title, content, created_at) VALUES (?1, ?2, ?3);",
            params![title, content, created_at],
        )?;
        let id = conn.last_insert_rowid();

        let note = get_note(&conn, id)?.ok_or(RepoError::InconsistentState(
            "created note not found in read-back",
        ))?;
        self.reload_and_publish(&conn)?;
        debug!("event=note_add module=note_repo status=ok id={id}");
        Ok(note)
    }

    fn update_note(&self, note: &Note) -> RepoResult<()> {
        let conn = self.lock_conn();
        let changed = conn.execute(
            "UPDATE notes SET title = ?1, content = ?2 WHERE id = ?3;",
            params![note.title, note.content, note.id],
        )?;
        self.reload_and_publish(&conn)?;
        debug!(
            "event=note_update module=note_repo status={} id={}",
            if changed == 0 { "noop" } else { "ok" },
            note.id
        );
        Ok(())
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        let conn = self.lock_conn();
        let changed = conn.execute("DELETE FROM notes WHERE id = ?1;", params![id])?;
        self.reload_and_publish(&conn)?;
        debug!(
            "event=note_delete module=note_repo status={} id={id}",
            if changed == 0 { "noop" } else { "ok" }
        );
        Ok(())
    }
}

fn load_all_notes(conn: &Connection) -> RepoResult<Vec<Note>> {
    let mut stmt = conn.prepare(&format!("{NOTE_SELECT_SQL};"))?;
    let mut rows = stmt.query([])?;
    let mut notes = Vec::new();
    while let Some(row) = rows.next()? {
        notes.push(parse_note_row(row)?);
    }
    Ok(notes)
}

fn get_note(conn: &Connection, id: NoteId) -> RepoResult<Option<Note>> {
    let mut stmt = conn.prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query(params![id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_note_row(row)?));
    }
    Ok(None)
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    Ok(Note {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get::<_, Option<String>>("content")?.unwrap_or_default(),
        created_at: row.get("created_at")?,
    })
}

/// Current wall-clock time in epoch milliseconds; 0 on a pre-epoch clock.
fn epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    // Fails fast when the connection skipped migration bootstrap.
    conn.prepare(&format!("{NOTE_SELECT_SQL} LIMIT 0;"))
        .map_err(RepoError::from)?;
    Ok(())
}
