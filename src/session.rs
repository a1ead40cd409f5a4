// Line-oriented command interpreter driving a board

use crate::models::{NewTask, Task, TaskPatch, TaskStatus};
use crate::notify::Notifier;
use crate::render::Renderer;
use crate::store::Store;
use eyre::{Result, bail, eyre};
use tracing::{debug, warn};

pub const HELP: &str = "\
Commands:
  add <status> <title> [| <description>]   create a task
  edit <id> [title=..] [description=..] [status=..]
                                           change fields of a task
  move <id> <status>                       file a task under another column
  delete <id>                              remove a task
  show [status]                            print the board or one column
  columns                                  list columns with counts
  clear                                    remove every task
  sample                                   add the sample tasks
  help                                     this text
  quit                                     leave the session

Ids may be abbreviated to any unique prefix of the id shown in brackets.";

/// One user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(NewTask),
    Edit { id: String, patch: TaskPatch },
    Move { id: String, status: TaskStatus },
    Delete { id: String },
    Show { status: Option<TaskStatus> },
    Columns,
    Clear,
    Sample,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line; `Ok(None)` for blank lines and `#` comments
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_lowercase().as_str() {
            "add" => {
                let (status, text) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| eyre!("Usage: add <status> <title> [| <description>]"))?;
                let (title, description) = match text.split_once('|') {
                    Some((title, description)) => (title.trim(), description.trim()),
                    None => (text.trim(), ""),
                };
                if title.is_empty() {
                    bail!("Task title cannot be empty");
                }
                Command::Add(NewTask::new(title, description, status))
            }
            "edit" => {
                let (id, assignments) = match rest.split_once(char::is_whitespace) {
                    Some((id, assignments)) => (id, assignments.trim()),
                    None => (rest, ""),
                };
                if id.is_empty() {
                    bail!("Usage: edit <id> [title=..] [description=..] [status=..]");
                }
                let patch = parse_assignments(assignments)?;
                if patch.is_empty() {
                    bail!("Nothing to change: give title=, description= or status=");
                }
                Command::Edit {
                    id: id.to_string(),
                    patch,
                }
            }
            "move" => {
                let mut parts = rest.split_whitespace();
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(id), Some(status), None) => Command::Move {
                        id: id.to_string(),
                        status: TaskStatus::from(status),
                    },
                    _ => bail!("Usage: move <id> <status>"),
                }
            }
            "delete" | "rm" => {
                if rest.is_empty() || rest.contains(char::is_whitespace) {
                    bail!("Usage: delete <id>");
                }
                Command::Delete { id: rest.to_string() }
            }
            "show" | "ls" => Command::Show {
                status: (!rest.is_empty()).then(|| TaskStatus::from(rest)),
            },
            "columns" => Command::Columns,
            "clear" => Command::Clear,
            "sample" => Command::Sample,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => bail!("Unknown command: {} (try `help`)", other),
        };

        Ok(Some(command))
    }
}

/// `title=Some words description=More words status=done`
///
/// A value runs until the next `key=` token, so values may contain spaces.
fn parse_assignments(input: &str) -> Result<TaskPatch> {
    let mut patch = TaskPatch::new();
    let mut current: Option<(&str, Vec<&str>)> = None;

    for token in input.split_whitespace() {
        match token.split_once('=') {
            Some((key, value)) if !key.is_empty() && key.chars().all(|c| c.is_ascii_alphabetic()) => {
                if let Some((key, words)) = current.take() {
                    assign(&mut patch, key, words.join(" "))?;
                }
                let words = if value.is_empty() { Vec::new() } else { vec![value] };
                current = Some((key, words));
            }
            _ => match current.as_mut() {
                Some((_, words)) => words.push(token),
                None => bail!("Expected key=value, got {:?}", token),
            },
        }
    }
    if let Some((key, words)) = current {
        assign(&mut patch, key, words.join(" "))?;
    }

    Ok(patch)
}

fn assign(patch: &mut TaskPatch, key: &str, value: String) -> Result<()> {
    match key {
        "title" => patch.title = Some(value),
        "description" | "desc" => patch.description = Some(value),
        "status" => patch.status = Some(TaskStatus::from(value)),
        other => bail!("Unknown field: {} (expected title, description or status)", other),
    }
    Ok(())
}

/// What the caller should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print this text (possibly empty) and keep reading
    Continue(String),
    Quit,
}

/// A user session over a shared board and notification slot
pub struct Session {
    store: Store,
    notifier: Notifier,
    renderer: Renderer,
}

impl Session {
    pub fn new(store: Store, notifier: Notifier, renderer: Renderer) -> Self {
        Self {
            store,
            notifier,
            renderer,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Parse and run one line. Parse errors become error toasts.
    pub fn handle_line(&self, line: &str) -> Outcome {
        match Command::parse(line) {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => Outcome::Continue(String::new()),
            Err(e) => {
                debug!(error = %e, "handle_line: parse failed");
                self.notifier.error(e.to_string());
                Outcome::Continue(String::new())
            }
        }
    }

    pub fn execute(&self, command: Command) -> Outcome {
        debug!(?command, "execute");
        let output = match command {
            Command::Add(new_task) => match self.store.add_task_checked(new_task) {
                Ok(task) => {
                    self.notifier.success(format!("Created \"{}\" [{}]", task.title, task.short_id()));
                    self.warn_if_unassigned(&task);
                    String::new()
                }
                Err(e) => {
                    self.notifier.error(e.to_string());
                    String::new()
                }
            },
            Command::Edit { id, patch } => {
                self.with_task(&id, |store, full_id| store.update_task_checked(full_id, patch), "Updated")
            }
            Command::Move { id, status } => self.with_task(
                &id,
                |store, full_id| store.move_task_checked(full_id, status),
                "Moved",
            ),
            Command::Delete { id } => {
                match self.resolve_id(&id) {
                    Ok(full_id) => {
                        let title = self.store.get_task(&full_id).map(|t| t.title).unwrap_or_default();
                        if self.store.delete_task(&full_id) {
                            self.notifier.success(format!("Deleted \"{}\"", title));
                        } else {
                            self.notifier.error(format!("Task not found: {}", id));
                        }
                    }
                    Err(e) => self.notifier.error(e.to_string()),
                }
                String::new()
            }
            Command::Show { status: None } => self.renderer.board(&self.store),
            Command::Show { status: Some(status) } => match self.store.column(&status) {
                Some(column) => self.renderer.column(&self.store, column),
                None => {
                    self.notifier.error(format!("No column named {}", status));
                    String::new()
                }
            },
            Command::Columns => self.renderer.columns(&self.store),
            Command::Clear => {
                let removed = self.store.len();
                self.store.clear_all_tasks();
                self.notifier.info(format!("Cleared {} task(s)", removed));
                String::new()
            }
            Command::Sample => {
                let before = self.store.len();
                self.store.initialize_sample_data();
                self.notifier
                    .success(format!("Added {} sample task(s)", self.store.len() - before));
                String::new()
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Outcome::Quit,
        };

        Outcome::Continue(output)
    }

    /// Resolve `id` to a full task id
    ///
    /// Accepts the full id, a unique prefix of the short id shown in brackets,
    /// or a unique prefix of the full id.
    pub fn resolve_id(&self, id: &str) -> Result<String> {
        if self.store.get_task(id).is_some() {
            return Ok(id.to_string());
        }

        let needle = id.strip_prefix(crate::store::ID_PREFIX).unwrap_or(id);
        let matches: Vec<Task> = self
            .store
            .all_tasks()
            .get()
            .into_iter()
            .filter(|t| {
                let full = t.id.strip_prefix(crate::store::ID_PREFIX).unwrap_or(t.id.as_str());
                t.short_id().starts_with(needle) || full.starts_with(needle)
            })
            .collect();

        match matches.as_slice() {
            [task] => Ok(task.id.clone()),
            [] => Err(eyre!("Task not found: {}", id)),
            _ => Err(eyre!("Ambiguous id {}: matches {} tasks", id, matches.len())),
        }
    }

    fn with_task<F>(&self, id: &str, op: F, verb: &str) -> String
    where
        F: FnOnce(&Store, &str) -> Result<Option<Task>>,
    {
        let result = self
            .resolve_id(id)
            .and_then(|full_id| op(&self.store, &full_id)?.ok_or_else(|| eyre!("Task not found: {}", id)));

        match result {
            Ok(task) => {
                self.notifier.success(format!("{} \"{}\" ({})", verb, task.title, task.status));
                self.warn_if_unassigned(&task);
            }
            Err(e) => self.notifier.error(e.to_string()),
        }
        String::new()
    }

    fn warn_if_unassigned(&self, task: &Task) {
        if !self.store.is_known_status(&task.status) {
            warn!(id = %task.id, status = %task.status, "Task status matches no column");
            self.notifier.warning(format!(
                "\"{}\" is filed under {}, which no column shows",
                task.title, task.status
            ));
        }
    }
}
