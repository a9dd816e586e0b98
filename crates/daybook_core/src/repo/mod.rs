//! Repository layer abstractions and implementations.
//!
//! # Responsibility
//! - Define the observable-collection data access contracts used by
//!   screens.
//! - Isolate storage details (memory list, SQLite statements) behind those
//!   contracts.
//!
//! # Invariants
//! - The published snapshot of either collection always reflects the most
//!   recently completed mutation; readers never observe a partially applied
//!   one.
//! - Mutations targeting a missing id complete silently as no-ops.

pub mod note_repo;
pub mod task_repo;
