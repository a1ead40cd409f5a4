// Board configuration: column sets and store options

use crate::models::{Column, NewTask, TaskStatus};
use crate::sample;
use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How the checked store operations treat statuses outside the column set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusValidation {
    /// Accept any status, even one no column displays
    #[default]
    Permissive,
    /// Reject statuses that are not a configured column id
    Strict,
}

/// Everything a [`crate::Store`] needs at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub columns: Vec<Column>,
    #[serde(default)]
    pub validation: StatusValidation,
    /// Seed tasks for `initialize_sample_data`; the built-in set for the columns when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_tasks: Option<Vec<NewTask>>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::four_column()
    }
}

impl BoardConfig {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            validation: StatusValidation::Permissive,
            sample_tasks: None,
        }
    }

    /// backlog / doing / review / done
    pub fn four_column() -> Self {
        Self::new(vec![
            Column::new("backlog", "Backlog", "#FF9AA2"),
            Column::new("doing", "Doing", "#FFE19C"),
            Column::new("review", "Review", "#B5EAD7"),
            Column::new("done", "Done", "#C7CEEA"),
        ])
    }

    /// todo / in-progress / done
    pub fn three_column() -> Self {
        Self::new(vec![
            Column::new("todo", "To Do", "#FF9AA2"),
            Column::new("in-progress", "In Progress", "#FFE19C"),
            Column::new("done", "Done", "#C7CEEA"),
        ])
    }

    pub fn with_validation(mut self, validation: StatusValidation) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_sample_tasks(mut self, tasks: Vec<NewTask>) -> Self {
        self.sample_tasks = Some(tasks);
        self
    }

    /// Default board file: `<config dir>/taskboard/board.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("taskboard").join("board.yaml"))
    }

    /// Load and validate a YAML board file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = ?path, "Loading board config");

        let content = fs::read_to_string(path).with_context(|| format!("Failed to read board config {}", path.display()))?;
        let config: Self =
            serde_yaml::from_str(&content).with_context(|| format!("Failed to parse board config {}", path.display()))?;
        config.validate()?;

        info!(path = ?path, columns = config.columns.len(), "Loaded board config");
        Ok(config)
    }

    /// Load an explicit file, else the default file if present, else the four-column preset
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(default) if default.exists() => Self::load(default),
            _ => {
                debug!("No board config found, using built-in columns");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(eyre!("Board config must define at least one column"));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.id.as_str().trim().is_empty() {
                return Err(eyre!("Column id cannot be empty (column titled {:?})", column.title));
            }
            if !seen.insert(column.id.as_str()) {
                return Err(eyre!("Duplicate column id: {}", column.id));
            }
        }

        Ok(())
    }

    pub fn is_known_status(&self, status: &TaskStatus) -> bool {
        self.columns.iter().any(|c| &c.id == status)
    }

    /// Seed tasks for this board
    pub fn sample_tasks(&self) -> Vec<NewTask> {
        match &self.sample_tasks {
            Some(tasks) => tasks.clone(),
            None => sample::for_columns(&self.columns),
        }
    }
}
