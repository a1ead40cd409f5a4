// Transient notifications shown after user actions

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

pub const DEFAULT_TIMEOUT_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Success,
    Error,
    Info,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// The single notification slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastState {
    pub visible: bool,
    pub message: String,
    pub severity: Severity,
    /// Auto-dismiss delay; 0 keeps the toast until `hide`
    pub timeout_ms: u64,
    pub shown_at: Option<DateTime<Utc>>,
}

impl Default for ToastState {
    fn default() -> Self {
        Self {
            visible: false,
            message: String::new(),
            severity: Severity::Success,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            shown_at: None,
        }
    }
}

impl ToastState {
    fn expired_at(&self, now: DateTime<Utc>) -> bool {
        match (self.timeout_ms, self.shown_at) {
            (0, _) | (_, None) => false,
            (timeout, Some(shown)) => {
                let timeout = i64::try_from(timeout).ok().and_then(Duration::try_milliseconds);
                timeout.is_some_and(|timeout| now - shown >= timeout)
            }
        }
    }
}

/// Shared handle to the notification slot
///
/// Clones share the slot the same way [`crate::Store`] clones share a board.
/// Showing a toast replaces whatever was there.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    state: Rc<RefCell<ToastState>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&self, message: impl Into<String>, severity: Severity, timeout_ms: u64) {
        self.show_at(message, severity, timeout_ms, Utc::now());
    }

    pub fn show_at(&self, message: impl Into<String>, severity: Severity, timeout_ms: u64, now: DateTime<Utc>) {
        let message = message.into();
        debug!(%severity, timeout_ms, message = %message, "show toast");

        *self.state.borrow_mut() = ToastState {
            visible: true,
            message,
            severity,
            timeout_ms,
            shown_at: Some(now),
        };
    }

    pub fn hide(&self) {
        self.state.borrow_mut().visible = false;
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, Severity::Success, DEFAULT_TIMEOUT_MS);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, Severity::Error, DEFAULT_TIMEOUT_MS);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(message, Severity::Info, DEFAULT_TIMEOUT_MS);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.show(message, Severity::Warning, DEFAULT_TIMEOUT_MS);
    }

    /// Raw slot contents, visible or not
    pub fn state(&self) -> ToastState {
        self.state.borrow().clone()
    }

    /// The toast on screen at `now`, if any
    pub fn current_at(&self, now: DateTime<Utc>) -> Option<ToastState> {
        let state = self.state.borrow();
        (state.visible && !state.expired_at(now)).then(|| state.clone())
    }

    pub fn current(&self) -> Option<ToastState> {
        self.current_at(Utc::now())
    }
}
