// Text rendering of a board

use crate::models::{Column, Task};
use crate::notify::{Severity, ToastState};
use crate::store::Store;
use colored::{Color, ColoredString, Colorize};
use std::fmt;

const EMPTY_STATE: &str = "(no tasks)";
const UNASSIGNED_TITLE: &str = "Unassigned";

/// Parse a `#RRGGBB` token, falling back to named colours ("red", "bright blue")
pub fn parse_color(token: &str) -> Option<Color> {
    if let Some(hex) = token.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        return Some(Color::TrueColor {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        });
    }
    token.parse::<Color>().ok()
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub color: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self { color: true }
    }
}

impl Renderer {
    pub fn plain() -> Self {
        Self { color: false }
    }

    fn paint(&self, text: &str, color: Option<Color>) -> ColoredString {
        match (self.color, color) {
            (true, Some(color)) => text.color(color).bold(),
            (true, None) => text.bold(),
            (false, _) => text.normal(),
        }
    }

    fn header(&self, title: &str, color_token: &str, count: usize) -> String {
        let label = format!("{} ({})", title, count);
        self.paint(&label, parse_color(color_token)).to_string()
    }

    /// One column: header with running count, then its tasks or the empty state
    pub fn column(&self, store: &Store, column: &Column) -> String {
        ColumnSection {
            renderer: *self,
            column,
            tasks: store.tasks_by_status(column.id.clone()).get(),
        }
        .to_string()
    }

    /// Every column in order, plus tasks filed under statuses no column shows
    pub fn board(&self, store: &Store) -> String {
        BoardText { renderer: *self, store }.to_string()
    }

    pub fn columns(&self, store: &Store) -> String {
        ColumnsTable { renderer: *self, store }.to_string()
    }

    pub fn toast(&self, toast: &ToastState) -> String {
        let tag = format!("[{}]", toast.severity);
        let color = match toast.severity {
            Severity::Success => Color::Green,
            Severity::Error => Color::Red,
            Severity::Info => Color::Cyan,
            Severity::Warning => Color::Yellow,
        };
        format!("{} {}", self.paint(&tag, Some(color)), toast.message)
    }
}

struct ColumnSection<'a> {
    renderer: Renderer,
    column: &'a Column,
    tasks: Vec<Task>,
}

impl fmt::Display for ColumnSection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.renderer;
        writeln!(f, "{}", r.header(&self.column.title, &self.column.color, self.tasks.len()))?;

        if self.tasks.is_empty() {
            if r.color {
                return writeln!(f, "  {}", EMPTY_STATE.dimmed());
            }
            return writeln!(f, "  {}", EMPTY_STATE);
        }

        for task in &self.tasks {
            writeln!(f, "  [{}] {}", task.short_id(), task.title)?;
            if !task.description.is_empty() {
                writeln!(f, "{:17}{}", "", task.description)?;
            }
        }
        Ok(())
    }
}

struct BoardText<'a> {
    renderer: Renderer,
    store: &'a Store,
}

impl fmt::Display for BoardText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, column) in self.store.columns().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", self.renderer.column(self.store, column))?;
        }

        let orphans = self.store.unassigned();
        if !orphans.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.renderer.header(UNASSIGNED_TITLE, "", orphans.len()))?;
            for task in &orphans {
                writeln!(f, "  [{}] {} ({})", task.short_id(), task.title, task.status)?;
            }
        }
        Ok(())
    }
}

struct ColumnsTable<'a> {
    renderer: Renderer,
    store: &'a Store,
}

impl fmt::Display for ColumnsTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (column, count) in self.store.counts() {
            let swatch = self.renderer.paint(column.id.as_str(), parse_color(&column.color));
            writeln!(f, "{:<12} {:<14} {:<8} {}", swatch, column.title, column.color, count)?;
        }
        Ok(())
    }
}

/// Plain-text board, for logs and tests
pub fn render_board(store: &Store) -> String {
    Renderer::plain().board(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;
    use crate::models::NewTask;

    #[test]
    fn test_parse_color() {
        assert_eq!(
            parse_color("#FF9AA2"),
            Some(Color::TrueColor {
                r: 0xFF,
                g: 0x9A,
                b: 0xA2
            })
        );
        assert_eq!(parse_color("red"), Some(Color::Red));
        assert_eq!(parse_color("#FFF"), None);
        assert_eq!(parse_color("#GGGGGG"), None);
        assert_eq!(parse_color("not-a-colour"), None);
    }

    #[test]
    fn test_empty_board_shows_empty_state_per_column() {
        let store = Store::new(BoardConfig::four_column());
        let out = render_board(&store);

        assert!(out.contains("Backlog (0)"));
        assert!(out.contains("Done (0)"));
        assert_eq!(out.matches(EMPTY_STATE).count(), 4);
        assert!(!out.contains(UNASSIGNED_TITLE));
    }

    #[test]
    fn test_board_lists_tasks_under_their_column() {
        let store = Store::new(BoardConfig::three_column());
        let task = store.add_task(NewTask::new("Write docs", "README and guides", "in-progress"));

        let out = render_board(&store);
        assert!(out.contains("In Progress (1)"));
        assert!(out.contains(&format!("[{}] Write docs", task.short_id())));
        assert!(out.contains("README and guides"));
        assert_eq!(out.matches(EMPTY_STATE).count(), 2);

        let in_progress = out.find("In Progress").unwrap();
        let done = out.find("Done (0)").unwrap();
        let title = out.find("Write docs").unwrap();
        assert!(in_progress < title && title < done);
    }

    #[test]
    fn test_sample_board_shows_distinct_ids_and_aligned_descriptions() {
        let store = Store::new(BoardConfig::four_column());
        store.initialize_sample_data();

        let out = render_board(&store);
        let id_lines: Vec<&str> = out.lines().filter(|l| l.starts_with("  [")).collect();
        assert_eq!(id_lines.len(), 8);

        let shown: std::collections::HashSet<&str> =
            id_lines.iter().filter_map(|l| l[3..].split(']').next()).collect();
        assert_eq!(shown.len(), 8);

        let title_line = out.lines().position(|l| l.ends_with("] Build API endpoints")).unwrap();
        let description = out.lines().nth(title_line + 1).unwrap();
        let title_col = out.lines().nth(title_line).unwrap().find("Build").unwrap();
        assert_eq!(description.find("Implement").unwrap(), title_col);
        assert_eq!(out.matches(EMPTY_STATE).count(), 0);
    }

    #[test]
    fn test_unknown_status_lands_in_unassigned() {
        let store = Store::new(BoardConfig::three_column());
        store.add_task(NewTask::new("Lost", "", "archived"));

        let out = render_board(&store);
        assert!(out.contains("Unassigned (1)"));
        assert!(out.contains("Lost (archived)"));
    }

    #[test]
    fn test_columns_listing() {
        let store = Store::new(BoardConfig::four_column());
        store.add_task(NewTask::new("A", "", "review"));

        let out = Renderer::plain().columns(&store);
        assert_eq!(out.lines().count(), 4);
        let review = out.lines().find(|l| l.starts_with("review")).unwrap();
        assert!(review.contains("#B5EAD7"));
        assert!(review.trim_end().ends_with('1'));
    }

    #[test]
    fn test_toast_line() {
        let toast = ToastState {
            visible: true,
            message: "Task deleted".to_string(),
            severity: Severity::Warning,
            ..ToastState::default()
        };
        assert_eq!(Renderer::plain().toast(&toast), "[warning] Task deleted");
    }
}
