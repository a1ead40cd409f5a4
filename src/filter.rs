// Query filtering over tasks

use crate::models::{Task, TaskStatus};

/// Filter for querying tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Field to filter on
    pub field: TaskField,
    /// Comparison operator
    pub op: FilterOp,
    /// Value to compare against
    pub value: String,
}

/// Task fields a filter can look at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Id,
    Title,
    Description,
    Status,
}

impl TaskField {
    fn get(self, task: &Task) -> &str {
        match self {
            TaskField::Id => &task.id,
            TaskField::Title => &task.title,
            TaskField::Description => &task.description,
            TaskField::Status => task.status.as_str(),
        }
    }
}

/// Comparison operators for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,       // ==
    Ne,       // !=
    Contains, // case-insensitive substring
}

impl Filter {
    pub fn new(field: TaskField, op: FilterOp, value: impl Into<String>) -> Self {
        Self {
            field,
            op,
            value: value.into(),
        }
    }

    /// `status == <status>`, the filter behind per-column views
    pub fn status_eq(status: &TaskStatus) -> Self {
        Self::new(TaskField::Status, FilterOp::Eq, status.as_str())
    }

    pub fn matches(&self, task: &Task) -> bool {
        let actual = self.field.get(task);
        match self.op {
            FilterOp::Eq => actual == self.value,
            FilterOp::Ne => actual != self.value,
            FilterOp::Contains => actual.to_lowercase().contains(&self.value.to_lowercase()),
        }
    }
}

/// True when every filter matches; an empty list matches everything
pub fn matches_all(filters: &[Filter], task: &Task) -> bool {
    filters.iter().all(|f| f.matches(task))
}

impl std::fmt::Display for TaskField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskField::Id => write!(f, "id"),
            TaskField::Title => write!(f, "title"),
            TaskField::Description => write!(f, "description"),
            TaskField::Status => write!(f, "status"),
        }
    }
}

impl std::fmt::Display for FilterOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterOp::Eq => write!(f, "="),
            FilterOp::Ne => write!(f, "!="),
            FilterOp::Contains => write!(f, "~"),
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {:?}", self.field, self.op, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, status: &str) -> Task {
        Task {
            id: format!("task-{}", title.to_lowercase()),
            title: title.to_string(),
            description: "Some Description".to_string(),
            status: TaskStatus::from(status),
        }
    }

    #[test]
    fn test_filter_creation() {
        let filter = Filter::status_eq(&TaskStatus::from("doing"));

        assert_eq!(filter.field, TaskField::Status);
        assert_eq!(filter.op, FilterOp::Eq);
        assert_eq!(filter.value, "doing");
    }

    #[test]
    fn test_filter_eq_ne() {
        let t = task("Alpha", "doing");
        assert!(Filter::new(TaskField::Status, FilterOp::Eq, "doing").matches(&t));
        assert!(!Filter::new(TaskField::Status, FilterOp::Eq, "done").matches(&t));
        assert!(Filter::new(TaskField::Status, FilterOp::Ne, "done").matches(&t));
        assert!(Filter::new(TaskField::Id, FilterOp::Eq, "task-alpha").matches(&t));
    }

    #[test]
    fn test_filter_contains_ignores_case() {
        let t = task("Alpha", "doing");
        assert!(Filter::new(TaskField::Description, FilterOp::Contains, "description").matches(&t));
        assert!(Filter::new(TaskField::Title, FilterOp::Contains, "LPH").matches(&t));
        assert!(!Filter::new(TaskField::Title, FilterOp::Contains, "beta").matches(&t));
    }

    #[test]
    fn test_matches_all() {
        let t = task("Alpha", "doing");
        assert!(matches_all(&[], &t));

        let filters = vec![
            Filter::status_eq(&TaskStatus::from("doing")),
            Filter::new(TaskField::Title, FilterOp::Contains, "al"),
        ];
        assert!(matches_all(&filters, &t));

        let filters = vec![
            Filter::status_eq(&TaskStatus::from("doing")),
            Filter::new(TaskField::Title, FilterOp::Eq, "Beta"),
        ];
        assert!(!matches_all(&filters, &t));
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(FilterOp::Eq.to_string(), "=");
        assert_eq!(FilterOp::Ne.to_string(), "!=");
        let filter = Filter::status_eq(&TaskStatus::from("done"));
        assert_eq!(filter.to_string(), "status = \"done\"");
    }
}
