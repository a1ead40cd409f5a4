// Data models for the task board

use serde::{Deserialize, Serialize};
use std::fmt;

/// Column identifier a task is filed under.
///
/// The set of valid statuses is configuration (see [`crate::config::BoardConfig`]),
/// so this is an open string rather than a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskStatus(String);

impl TaskStatus {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskStatus {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TaskStatus {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for TaskStatus {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TaskStatus {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A card on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

impl Task {
    /// Merge the fields present in `patch` into this task. The id never changes.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    /// Last group of the uuid, enough to tell tasks apart on screen
    ///
    /// The leading groups of a v7 uuid are its timestamp and repeat for tasks
    /// created close together; the last group is counter and random bits.
    pub fn short_id(&self) -> &str {
        let tail = self.id.strip_prefix(crate::store::ID_PREFIX).unwrap_or(self.id.as_str());
        tail.rsplit('-').next().unwrap_or(tail)
    }
}

/// Task contents supplied by the caller of `add_task`; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

impl NewTask {
    pub fn new(title: impl Into<String>, description: impl Into<String>, status: impl Into<TaskStatus>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: status.into(),
        }
    }

    pub(crate) fn into_task(self, id: String) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
        }
    }
}

/// Subset of task fields to overwrite
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn status(mut self, status: impl Into<TaskStatus>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}

/// A status column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: TaskStatus,
    pub title: String,
    pub color: String,
}

impl Column {
    pub fn new(id: impl Into<TaskStatus>, title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            color: color.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sample_task() -> Task {
        Task {
            id: "task-0192f5a8-aaaa-7bbb-8ccc-dddddddddddd".to_string(),
            title: "Original".to_string(),
            description: "Desc".to_string(),
            status: TaskStatus::from("backlog"),
        }
    }

    #[test]
    fn test_status_serialization() {
        let status = TaskStatus::from("in-progress");
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, "\"in-progress\"");

        let back: TaskStatus = serde_json::from_str("\"review\"").unwrap();
        assert_eq!(back, "review");
    }

    #[test]
    fn test_apply_partial_patch() {
        let mut task = sample_task();
        task.apply(TaskPatch::new().title("Updated"));

        assert_eq!(task.title, "Updated");
        assert_eq!(task.description, "Desc");
        assert_eq!(task.status, "backlog");
        assert_eq!(task.id, "task-0192f5a8-aaaa-7bbb-8ccc-dddddddddddd");
    }

    #[test]
    fn test_apply_full_patch() {
        let mut task = sample_task();
        task.apply(
            TaskPatch::new()
                .title("New Title")
                .description("New Description")
                .status("done"),
        );

        assert_eq!(task.title, "New Title");
        assert_eq!(task.description, "New Description");
        assert_eq!(task.status, "done");
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut task = sample_task();
        let before = task.clone();
        assert!(TaskPatch::new().is_empty());
        task.apply(TaskPatch::new());
        assert_eq!(task, before);
    }

    #[test]
    fn test_patch_deserialization_skips_missing_fields() {
        let patch: TaskPatch = serde_json::from_str(r#"{"status":"done"}"#).unwrap();
        assert_eq!(patch, TaskPatch::new().status("done"));
    }

    #[test]
    fn test_short_id() {
        let task = sample_task();
        assert_eq!(task.short_id(), "dddddddddddd");

        let odd = Task {
            id: "abc".to_string(),
            ..sample_task()
        };
        assert_eq!(odd.short_id(), "abc");
    }

    #[test]
    fn test_short_ids_differ_for_tasks_created_together() {
        let shorts: HashSet<String> = (0..32)
            .map(|_| {
                let task = Task {
                    id: format!("{}{}", crate::store::ID_PREFIX, uuid::Uuid::now_v7()),
                    ..sample_task()
                };
                task.short_id().to_string()
            })
            .collect();

        assert_eq!(shorts.len(), 32);
        assert!(shorts.iter().all(|s| s.len() == 12));
    }

    #[test]
    fn test_task_serialization() {
        let task = sample_task();
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"status\":\"backlog\""));

        let deserialized: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, task);
    }
}
