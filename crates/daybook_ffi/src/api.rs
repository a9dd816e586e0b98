//! FFI use-case API for UI-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to the UI host via FRB.
//! - Keep error semantics simple for screen integration.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - The store is constructed exactly once, explicitly, via `init_store`;
//!   every later call routes through that instance.

use daybook_core::db::open_db;
use log::info;
use daybook_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    InMemoryTaskRepository, Note, NoteRepository, SqliteNoteRepository, Task, TaskRepository,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const STORE_DB_FILE_NAME: &str = "daybook.sqlite3";

static STORE: OnceLock<Store> = OnceLock::new();

struct Store {
    tasks: InMemoryTaskRepository,
    notes: SqliteNoteRepository,
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Task record mirrored to the UI host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Note record mirrored to the UI host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: i64,
}

/// Generic action response envelope for mutation calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Id of the affected record, when one was created.
    pub id: Option<i64>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<i64>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// List response envelope for task queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    pub items: Vec<TaskItem>,
    pub message: String,
}

/// List response envelope for note queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListResponse {
    pub items: Vec<NoteItem>,
    pub message: String,
}

/// Opens the note database and constructs both repositories.
///
/// Path resolution: explicit `db_path` argument, then the
/// `DAYBOOK_DB_PATH` environment variable, then a file in the system temp
/// directory.
///
/// # FFI contract
/// - Must be called once at app startup, before any task/note call.
/// - Calling again after a successful init is a no-op reporting success.
/// - Never panics; failures are reported in the envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn init_store(db_path: Option<String>) -> ActionResponse {
    if STORE.get().is_some() {
        return ActionResponse::success("Store already initialized.", None);
    }

    let path = resolve_db_path(db_path);
    let conn = match open_db(&path) {
        Ok(conn) => conn,
        Err(err) => return ActionResponse::failure(format!("init_store failed: {err}")),
    };
    let notes = match SqliteNoteRepository::try_new(conn) {
        Ok(notes) => notes,
        Err(err) => return ActionResponse::failure(format!("init_store failed: {err}")),
    };
    if let Err(err) = notes.refresh() {
        return ActionResponse::failure(format!("init_store failed: {err}"));
    }

    let store = Store {
        tasks: InMemoryTaskRepository::new(),
        notes,
    };
    // A racing init may have won; either instance is fully constructed.
    let _ = STORE.set(store);
    info!(
        "event=store_init module=ffi status=ok db_path={}",
        path.display()
    );
    ActionResponse::success("Store initialized.", None)
}

/// Returns the latest published task list.
#[flutter_rust_bridge::frb(sync)]
pub fn list_tasks() -> TaskListResponse {
    match store() {
        Ok(store) => {
            let items = store
                .tasks
                .snapshot()
                .into_iter()
                .map(task_to_item)
                .collect::<Vec<_>>();
            let message = format!("{} task(s).", items.len());
            TaskListResponse { items, message }
        }
        Err(message) => TaskListResponse {
            items: Vec::new(),
            message,
        },
    }
}

/// Creates a task and returns its assigned id.
#[flutter_rust_bridge::frb(sync)]
pub fn add_task(title: String, description: String) -> ActionResponse {
    match store() {
        Ok(store) => {
            let task = store.tasks.add_task(title.trim(), description.trim());
            ActionResponse::success("Task created.", Some(task.id))
        }
        Err(message) => ActionResponse::failure(message),
    }
}

/// Replaces the task whose id matches; silent no-op for unknown ids.
#[flutter_rust_bridge::frb(sync)]
pub fn update_task(task: TaskItem) -> ActionResponse {
    match store() {
        Ok(store) => {
            let id = task.id;
            store.tasks.update_task(&item_to_task(task));
            ActionResponse::success("Task updated.", Some(id))
        }
        Err(message) => ActionResponse::failure(message),
    }
}

/// Deletes the task with the given id; silent no-op for unknown ids.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_task(id: i64) -> ActionResponse {
    match store() {
        Ok(store) => {
            store.tasks.delete_task(id);
            ActionResponse::success("Task deleted.", Some(id))
        }
        Err(message) => ActionResponse::failure(message),
    }
}

/// Empties the task list and resets id assignment.
#[flutter_rust_bridge::frb(sync)]
pub fn clear_tasks() -> ActionResponse {
    match store() {
        Ok(store) => {
            store.tasks.clear();
            ActionResponse::success("Tasks cleared.", None)
        }
        Err(message) => ActionResponse::failure(message),
    }
}

/// Returns the latest published note list.
#[flutter_rust_bridge::frb(sync)]
pub fn list_notes() -> NoteListResponse {
    match store() {
        Ok(store) => {
            let items = store
                .notes
                .snapshot()
                .into_iter()
                .map(note_to_item)
                .collect::<Vec<_>>();
            let message = format!("{} note(s).", items.len());
            NoteListResponse { items, message }
        }
        Err(message) => NoteListResponse {
            items: Vec::new(),
            message,
        },
    }
}

/// Reloads all notes from storage and republishes the snapshot.
#[flutter_rust_bridge::frb(sync)]
pub fn refresh_notes() -> ActionResponse {
    match store().and_then(|store| store.notes.refresh().map_err(|err| err.to_string())) {
        Ok(()) => ActionResponse::success("Notes refreshed.", None),
        Err(message) => ActionResponse::failure(format!("refresh_notes failed: {message}")),
    }
}

/// Inserts a note and returns its storage-assigned id.
#[flutter_rust_bridge::frb(sync)]
pub fn add_note(title: String, content: String) -> ActionResponse {
    let result = store().and_then(|store| {
        store
            .notes
            .add_note(title.trim(), content.trim())
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(note) => ActionResponse::success("Note created.", Some(note.id)),
        Err(message) => ActionResponse::failure(format!("add_note failed: {message}")),
    }
}

/// Updates title/content of the note whose id matches.
#[flutter_rust_bridge::frb(sync)]
pub fn update_note(note: NoteItem) -> ActionResponse {
    let id = note.id;
    let result = store().and_then(|store| {
        store
            .notes
            .update_note(&item_to_note(note))
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(()) => ActionResponse::success("Note updated.", Some(id)),
        Err(message) => ActionResponse::failure(format!("update_note failed: {message}")),
    }
}

/// Deletes the note with the given id; silent no-op for unknown ids.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_note(id: i64) -> ActionResponse {
    let result = store().and_then(|store| {
        store
            .notes
            .delete_note(id)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(()) => ActionResponse::success("Note deleted.", Some(id)),
        Err(message) => ActionResponse::failure(format!("delete_note failed: {message}")),
    }
}

fn store() -> Result<&'static Store, String> {
    STORE
        .get()
        .ok_or_else(|| "store not initialized; call init_store first".to_string())
}

fn resolve_db_path(db_path: Option<String>) -> PathBuf {
    if let Some(raw) = db_path {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    if let Ok(raw) = std::env::var("DAYBOOK_DB_PATH") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(STORE_DB_FILE_NAME)
}

fn task_to_item(task: Task) -> TaskItem {
    TaskItem {
        id: task.id,
        title: task.title,
        description: task.description,
        completed: task.completed,
    }
}

fn item_to_task(item: TaskItem) -> Task {
    Task {
        id: item.id,
        title: item.title,
        description: item.description,
        completed: item.completed,
    }
}

fn note_to_item(note: Note) -> NoteItem {
    NoteItem {
        id: note.id,
        title: note.title,
        content: note.content,
        created_at: note.created_at,
    }
}

fn item_to_note(item: NoteItem) -> Note {
    Note {
        id: item.id,
        title: item.title,
        content: item.content,
        created_at: item.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        add_note, add_task, core_version, delete_note, delete_task, init_logging, init_store,
        list_notes, list_tasks, ping, refresh_notes, update_note, update_task,
    };
    use std::path::PathBuf;
    use std::sync::OnceLock;
    use std::time::{SystemTime, UNIX_EPOCH};

    // Tests in this module share the process-wide store; each flow works
    // against records it created itself and never asserts global counts.
    fn ensure_store() {
        static DB_DIR: OnceLock<tempfile::TempDir> = OnceLock::new();
        let dir = DB_DIR.get_or_init(|| tempfile::tempdir().expect("temp dir should be created"));
        let db_path: PathBuf = dir.path().join("ffi-tests.sqlite3");
        let response = init_store(Some(db_path.to_string_lossy().into_owned()));
        assert!(response.ok, "{}", response.message);
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after unix epoch")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_store_is_idempotent() {
        ensure_store();
        let again = init_store(None);
        assert!(again.ok, "{}", again.message);
    }

    #[test]
    fn task_flow_creates_updates_and_deletes() {
        ensure_store();
        let title = unique_token("task");

        let created = add_task(title.clone(), "details".to_string());
        assert!(created.ok, "{}", created.message);
        let id = created.id.expect("created task should return id");

        let mut item = list_tasks()
            .items
            .into_iter()
            .find(|item| item.id == id)
            .expect("created task should be listed");
        assert_eq!(item.title, title);
        assert!(!item.completed);

        item.completed = true;
        let updated = update_task(item);
        assert!(updated.ok, "{}", updated.message);
        let listed = list_tasks()
            .items
            .into_iter()
            .find(|item| item.id == id)
            .expect("updated task should still be listed");
        assert!(listed.completed);

        let deleted = delete_task(id);
        assert!(deleted.ok, "{}", deleted.message);
        assert!(!list_tasks().items.iter().any(|item| item.id == id));
    }

    #[test]
    fn note_flow_creates_updates_and_deletes() {
        ensure_store();
        let title = unique_token("note");

        let created = add_note(title.clone(), "body".to_string());
        assert!(created.ok, "{}", created.message);
        let id = created.id.expect("created note should return id");

        let refreshed = refresh_notes();
        assert!(refreshed.ok, "{}", refreshed.message);

        let mut item = list_notes()
            .items
            .into_iter()
            .find(|item| item.id == id)
            .expect("created note should be listed");
        assert_eq!(item.title, title);
        assert!(item.created_at > 0);

        item.title = unique_token("renamed");
        let renamed_title = item.title.clone();
        let updated = update_note(item);
        assert!(updated.ok, "{}", updated.message);
        let listed = list_notes()
            .items
            .into_iter()
            .find(|item| item.id == id)
            .expect("updated note should still be listed");
        assert_eq!(listed.title, renamed_title);

        let deleted = delete_note(id);
        assert!(deleted.ok, "{}", deleted.message);
        assert!(!list_notes().items.iter().any(|item| item.id == id));
    }
}
