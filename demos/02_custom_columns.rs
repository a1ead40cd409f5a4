//! Demo 02: Custom Columns and Strict Statuses
//!
//! This demo loads a column set from YAML, seeds it, and shows how a strict
//! board rejects statuses that no column displays.
//!
//! Run with: cargo run --example 02_custom_columns

use eyre::Result;
use taskboard::{BoardConfig, NewTask, Renderer, StatusValidation, Store};

const BOARD_YAML: &str = r##"
columns:
  - id: ideas
    title: Ideas
    color: "#B5EAD7"
  - id: building
    title: Building
    color: "#FFE19C"
  - id: shipped
    title: Shipped
    color: "#C7CEEA"
validation: strict
"##;

fn main() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("board.yaml");
    std::fs::write(&path, BOARD_YAML)?;

    println!("Taskboard Custom Columns Demo");
    println!("=============================\n");

    let config = BoardConfig::load(&path)?;
    assert_eq!(config.validation, StatusValidation::Strict);
    let store = Store::new(config);

    store.initialize_sample_data();
    println!("{}", Renderer::plain().board(&store));

    println!("Adding a task to an unknown column...");
    match store.add_task_checked(NewTask::new("Misfiled", "", "todo")) {
        Ok(task) => println!("   Unexpectedly accepted {}", task.id),
        Err(e) => println!("   Rejected: {}", e),
    }

    let task = store.add_task_checked(NewTask::new("Dark mode", "Theme switcher", "ideas"))?;
    store.move_task_checked(&task.id, "building")?;
    println!("\nCounts per column:");
    for (column, count) in store.counts() {
        println!("   {:<10} {}", column.title, count);
    }

    println!("\nDemo complete!");
    Ok(())
}
