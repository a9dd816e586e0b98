//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `daybook_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use daybook_core::{InMemoryTaskRepository, TaskRepository};

fn main() {
    // Tiny probe validating core wiring independently from the FFI/UI
    // runtime setup.
    println!("daybook_core ping={}", daybook_core::ping());
    println!("daybook_core version={}", daybook_core::core_version());

    let tasks = InMemoryTaskRepository::new();
    let created = tasks.add_task("smoke", "in-memory round-trip");
    println!(
        "daybook_core task_probe id={} count={}",
        created.id,
        tasks.snapshot().len()
    );
}
