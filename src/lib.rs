// Taskboard - In-memory Kanban task board with configurable status columns

pub mod config;
pub mod filter;
pub mod models;
pub mod notify;
pub mod render;
pub mod sample;
pub mod session;
pub mod store;

// Re-export main types for convenience
pub use config::{BoardConfig, StatusValidation};
pub use filter::{Filter, FilterOp, TaskField};
pub use models::{Column, NewTask, Task, TaskPatch, TaskStatus};
pub use notify::{Notifier, Severity, ToastState};
pub use render::{Renderer, render_board};
pub use session::{Command, Outcome, Session};
pub use store::{Store, TaskCount, TaskView};
