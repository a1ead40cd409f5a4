// Built-in seed tasks

use crate::models::{Column, NewTask};

const FOUR_COLUMN_IDS: [&str; 4] = ["backlog", "doing", "review", "done"];
const THREE_COLUMN_IDS: [&str; 3] = ["todo", "in-progress", "done"];

const FOUR_COLUMN_TASKS: [(&str, &str, &str); 8] = [
    (
        "Design database schema",
        "Create the initial database design for the project",
        "backlog",
    ),
    ("Setup project repository", "Initialize Git repo and configure CI/CD", "backlog"),
    ("Build API endpoints", "Implement RESTful API for task management", "doing"),
    ("Create UI components", "Design and implement reusable components", "review"),
    ("Write unit tests", "Add comprehensive test coverage", "review"),
    (
        "Setup development environment",
        "Configure local dev tools and dependencies",
        "done",
    ),
    ("Documentation", "Write project documentation and README", "done"),
    ("Code review process", "Establish code review guidelines", "done"),
];

const THREE_COLUMN_TASKS: [(&str, &str, &str); 3] = [
    ("Plan the sprint", "Pick the stories for the next iteration", "todo"),
    ("Implement the board", "Wire the columns to the task store", "in-progress"),
    ("Set up the project", "Create the repository and tooling", "done"),
];

fn build(rows: &[(&str, &str, &str)]) -> Vec<NewTask> {
    rows.iter()
        .map(|(title, description, status)| NewTask::new(*title, *description, *status))
        .collect()
}

fn same_ids(columns: &[Column], ids: &[&str]) -> bool {
    columns.len() == ids.len() && columns.iter().zip(ids).all(|(c, id)| c.id == *id)
}

/// The eight seed tasks of the backlog/doing/review/done board
pub fn four_column() -> Vec<NewTask> {
    build(&FOUR_COLUMN_TASKS)
}

/// One seed task per column of the todo/in-progress/done board
pub fn three_column() -> Vec<NewTask> {
    build(&THREE_COLUMN_TASKS)
}

/// Seed tasks matching a column set
///
/// The two preset boards get their own sets; any other board gets one generic
/// task per column.
pub fn for_columns(columns: &[Column]) -> Vec<NewTask> {
    if same_ids(columns, &FOUR_COLUMN_IDS) {
        return four_column();
    }
    if same_ids(columns, &THREE_COLUMN_IDS) {
        return three_column();
    }

    columns
        .iter()
        .map(|c| {
            NewTask::new(
                format!("Sample {} task", c.title),
                format!("Example card filed under {}", c.title),
                c.id.clone(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;

    fn count(tasks: &[NewTask], status: &str) -> usize {
        tasks.iter().filter(|t| t.status == status).count()
    }

    #[test]
    fn test_four_column_distribution() {
        let tasks = for_columns(&BoardConfig::four_column().columns);
        assert_eq!(tasks.len(), 8);
        assert_eq!(count(&tasks, "backlog"), 2);
        assert_eq!(count(&tasks, "doing"), 1);
        assert_eq!(count(&tasks, "review"), 2);
        assert_eq!(count(&tasks, "done"), 3);
        assert_eq!(tasks[0].title, "Design database schema");
    }

    #[test]
    fn test_three_column_one_per_column() {
        let tasks = for_columns(&BoardConfig::three_column().columns);
        assert_eq!(tasks.len(), 3);
        for status in THREE_COLUMN_IDS {
            assert_eq!(count(&tasks, status), 1);
        }
    }

    #[test]
    fn test_custom_columns_get_generic_seed() {
        let columns = vec![Column::new("ideas", "Ideas", "#111"), Column::new("shipped", "Shipped", "#222")];
        let tasks = for_columns(&columns);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].status, "ideas");
        assert_eq!(tasks[1].title, "Sample Shipped task");
    }

    #[test]
    fn test_reordered_preset_is_custom() {
        let mut columns = BoardConfig::four_column().columns;
        columns.reverse();
        assert_eq!(for_columns(&columns).len(), 4);
    }
}
