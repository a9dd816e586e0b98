//! Task repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Hold the ordered task list for the process lifetime.
//! - Publish a fresh snapshot after every committed mutation.
//!
//! # Invariants
//! - One exclusive lock guards every read-modify-publish sequence, so
//!   mutations commit one at a time and each observes the latest prior
//!   state.
//! - Ids start at 1 and strictly increase per created task; deletions never
//!   cause reuse.
//! - Tasks are kept in append order.

use crate::model::task::{Task, TaskId};
use crate::observe::{SnapshotCell, Subscription};
use log::debug;
use std::sync::Mutex;

/// Repository interface for the observable task collection.
///
/// None of these operations can fail: there is no persistence behind them,
/// and mutations aimed at a missing id are silent no-ops.
pub trait TaskRepository {
    /// Returns the latest published task list.
    fn snapshot(&self) -> Vec<Task>;
    /// Subscribes to every subsequent published task list.
    fn subscribe(&self) -> Subscription<Task>;
    /// Creates a task with a fresh id, appends it, and returns it.
    fn add_task(&self, title: &str, description: &str) -> Task;
    /// Replaces the entry whose id matches `task`, leaving others untouched.
    fn update_task(&self, task: &Task);
    /// Removes the entry with the given id, if present.
    fn delete_task(&self, id: TaskId);
}

struct TaskListState {
    items: Vec<Task>,
    next_id: TaskId,
}

/// Mutex-guarded, process-local task repository.
///
/// Data lives only in memory and is lost on restart; durability is an
/// explicit non-goal for tasks.
pub struct InMemoryTaskRepository {
    state: Mutex<TaskListState>,
    published: SnapshotCell<Task>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(TaskListState {
                items: Vec::new(),
                next_id: 1,
            }),
            published: SnapshotCell::new(),
        }
    }

    /// Empties the list and resets id assignment back to 1.
    pub fn clear(&self) {
        let mut state = self.lock_state();
        state.items.clear();
        state.next_id = 1;
        self.published.publish(Vec::new());
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, TaskListState> {
        // A poisoned lock means a writer panicked mid-mutation; the list
        // itself is still a valid snapshot, so keep serving it.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn snapshot(&self) -> Vec<Task> {
        self.published.snapshot()
    }

    fn subscribe(&self) -> Subscription<Task> {
        self.published.subscribe()
    }

    fn add_task(&self, title: &str, description: &str) -> Task {
        let mut state = self.lock_state();
        let task = Task::new(state.next_id, title, description);
        state.next_id += 1;
        state.items.push(task.clone());
        self.published.publish(state.items.clone());
        debug!(
            "event=task_add module=task_repo status=ok id={} count={}",
            task.id,
            state.items.len()
        );
        task
    }

    fn update_task(&self, task: &Task) {
        let mut state = self.lock_state();
        let Some(slot) = state.items.iter_mut().find(|item| item.id == task.id) else {
            debug!(
                "event=task_update module=task_repo status=noop id={}",
                task.id
            );
            return;
        };
        *slot = task.clone();
        self.published.publish(state.items.clone());
        debug!(
            "event=task_update module=task_repo status=ok id={}",
            task.id
        );
    }

    fn delete_task(&self, id: TaskId) {
        let mut state = self.lock_state();
        let before = state.items.len();
        state.items.retain(|item| item.id != id);
        if state.items.len() == before {
            debug!("event=task_delete module=task_repo status=noop id={id}");
            return;
        }
        self.published.publish(state.items.clone());
        debug!(
            "event=task_delete module=task_repo status=ok id={id} count={}",
            state.items.len()
        );
    }
}
