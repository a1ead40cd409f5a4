//! Demo 01: Basic Board Operations
//!
//! This demo walks through the task lifecycle on the default four-column
//! board: add, update, move, live views and delete.
//!
//! Run with: cargo run --example 01_basic_board

use taskboard::{BoardConfig, NewTask, Store, TaskPatch, render_board};

fn main() {
    println!("Taskboard Basic Operations Demo");
    println!("===============================\n");

    let store = Store::new(BoardConfig::four_column());

    // Views are obtained once and re-read later
    let backlog = store.tasks_by_status("backlog");
    let done_count = store.task_count("done");

    // ADD
    println!("1. ADD - Creating a task...");
    let task = store.add_task(NewTask::new(
        "Write release notes",
        "Summarise the changes since the last tag",
        "backlog",
    ));
    println!("   Created {} ({})", task.title, task.id);
    println!("   Backlog now holds {} task(s)\n", backlog.len());

    // UPDATE
    println!("2. UPDATE - Changing the description...");
    if let Some(updated) = store.update_task(&task.id, TaskPatch::new().description("Cover every merged PR")) {
        println!("   New description: {}\n", updated.description);
    }

    // MOVE
    println!("3. MOVE - Finishing the task...");
    store.move_task(&task.id, "done");
    println!("   Backlog: {}, Done: {}\n", backlog.len(), done_count.get());

    // A second handle sees the same board
    let other = store.clone();
    println!("4. SHARE - Second handle sees {} task(s)\n", other.all_tasks().len());

    // RENDER
    println!("5. RENDER - Board after seeding sample data...\n");
    store.initialize_sample_data();
    println!("{}", render_board(&store));

    // DELETE
    println!("6. DELETE - Removing the first task...");
    let deleted = store.delete_task(&task.id);
    println!("   Deleted: {}, deleting again: {}", deleted, store.delete_task(&task.id));

    println!("\nDemo complete!");
}
