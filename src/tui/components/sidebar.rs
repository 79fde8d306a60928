//! # Sidebar Component
//!
//! Brand, "New conversation" button, date-grouped history and the
//! Settings / Help nav entries.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SidebarState` lives in `TuiState` (keyboard cursor, click regions)
//! - `Sidebar` is created each frame with borrowed state and props
//!
//! The sidebar never changes app state itself. Activating a row (Enter,
//! Space or a click) yields a [`SidebarEntry`] the event loop maps to an
//! `Action`.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::action::Action;
use crate::core::conversation::{ConversationId, DateGroup};
use crate::core::view::{NavTarget, Section};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Columns taken by the sidebar when it is open.
pub const SIDEBAR_WIDTH: u16 = 30;

/// An activatable sidebar row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarEntry {
    Collapse,
    NewConversation,
    History(ConversationId),
    Nav(NavTarget),
}

impl SidebarEntry {
    pub fn action(self) -> Action {
        match self {
            SidebarEntry::Collapse => Action::ToggleSidebar,
            SidebarEntry::NewConversation => Action::NewConversation,
            SidebarEntry::History(id) => Action::LoadConversation(id),
            SidebarEntry::Nav(target) => Action::Navigate(target),
        }
    }
}

/// Keyboard-reachable rows, top to bottom.
pub fn entries(groups: &[DateGroup<'_>]) -> Vec<SidebarEntry> {
    let mut entries = vec![SidebarEntry::NewConversation];
    entries.extend(
        groups
            .iter()
            .flat_map(|g| g.conversations.iter())
            .map(|c| SidebarEntry::History(c.id)),
    );
    entries.push(SidebarEntry::Nav(NavTarget::Settings));
    entries.push(SidebarEntry::Nav(NavTarget::Help));
    entries
}

/// Shorten `text` to `max_width` display columns, ending with `…` if cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

pub struct SidebarState {
    pub entries: Vec<SidebarEntry>,
    pub cursor: usize,
    /// Screen rectangles of the rows drawn last frame.
    hit_regions: Vec<(Rect, SidebarEntry)>,
}

impl SidebarState {
    pub fn new(entries: Vec<SidebarEntry>) -> Self {
        Self {
            entries,
            cursor: 0,
            hit_regions: Vec::new(),
        }
    }

    /// Replace the row list, keeping the cursor in range.
    pub fn set_entries(&mut self, entries: Vec<SidebarEntry>) {
        self.cursor = self.cursor.min(entries.len().saturating_sub(1));
        self.entries = entries;
    }

    /// Move the cursor onto `entry` if it is a keyboard-reachable row.
    pub fn select(&mut self, entry: SidebarEntry) {
        if let Some(index) = self.entries.iter().position(|e| *e == entry) {
            self.cursor = index;
        }
    }

    pub fn selected(&self) -> Option<SidebarEntry> {
        self.entries.get(self.cursor).copied()
    }

    /// Row under a mouse click, if any.
    pub fn hit(&self, column: u16, row: u16) -> Option<SidebarEntry> {
        let position = Position::new(column, row);
        self.hit_regions
            .iter()
            .find(|(rect, _)| rect.contains(position))
            .map(|(_, entry)| *entry)
    }

    /// Forget click regions (the sidebar is hidden).
    pub fn clear_hit_regions(&mut self) {
        self.hit_regions.clear();
    }
}

impl EventHandler for SidebarState {
    type Event = SidebarEntry;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                if !self.entries.is_empty() {
                    self.cursor = (self.cursor + 1).min(self.entries.len() - 1);
                }
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.entries.len().saturating_sub(1);
                None
            }
            TuiEvent::Submit | TuiEvent::InputChar(' ') => self.selected(),
            _ => None,
        }
    }
}

/// Transient render wrapper.
pub struct Sidebar<'a> {
    pub state: &'a mut SidebarState,
    pub brand: &'a str,
    pub groups: &'a [DateGroup<'a>],
    pub active: Option<ConversationId>,
    pub section: Section,
    pub focused: bool,
}

impl<'a> Sidebar<'a> {
    fn row_style(&self, entry: SidebarEntry, active: bool) -> Style {
        let is_cursor = self.focused && self.state.selected() == Some(entry);
        let mut style = if active {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        if is_cursor {
            style = style.bg(Color::DarkGray);
        }
        style
    }

    fn draw_row(&mut self, frame: &mut Frame, rect: Rect, line: Line<'_>, entry: Option<SidebarEntry>) {
        frame.render_widget(Paragraph::new(line), rect);
        if let Some(entry) = entry {
            self.state.hit_regions.push((rect, entry));
        }
    }
}

impl<'a> Component for Sidebar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.hit_regions.clear();

        let block = Block::new()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 || inner.width < 4 {
            return;
        }

        let width = inner.width as usize;
        let row = |y: u16| Rect::new(inner.x, y, inner.width, 1);
        let nav_rows = 3; // separator + two entries
        let history_bottom = inner.bottom().saturating_sub(nav_rows);
        let mut y = inner.y;

        // Brand + collapse control
        let brand = truncate_to_width(self.brand, width.saturating_sub(3));
        let pad = width.saturating_sub(brand.width() + 1);
        self.draw_row(
            frame,
            row(y),
            Line::from(vec![
                Span::styled(brand, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" ".repeat(pad)),
                Span::styled("«", Style::default().fg(Color::DarkGray)),
            ]),
            None,
        );
        self.state
            .hit_regions
            .push((Rect::new(inner.right() - 1, y, 1, 1), SidebarEntry::Collapse));
        y += 2;

        if y < history_bottom {
            let style = self
                .row_style(SidebarEntry::NewConversation, false)
                .add_modifier(Modifier::REVERSED);
            let label = format!(" + New conversation{}", " ".repeat(width.saturating_sub(19)));
            self.draw_row(
                frame,
                row(y),
                Line::styled(label, style),
                Some(SidebarEntry::NewConversation),
            );
            y += 2;
        }

        if y < history_bottom {
            self.draw_row(
                frame,
                row(y),
                Line::styled(
                    "RECENTS",
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
                ),
                None,
            );
            y += 1;
        }

        let groups = self.groups;
        'groups: for group in groups {
            if y >= history_bottom {
                break;
            }
            self.draw_row(
                frame,
                row(y),
                Line::styled(
                    format!(" {}", group.label.to_uppercase()),
                    Style::default().fg(Color::DarkGray),
                ),
                None,
            );
            y += 1;
            for conversation in &group.conversations {
                if y >= history_bottom {
                    break 'groups;
                }
                let entry = SidebarEntry::History(conversation.id);
                let active = self.active == Some(conversation.id);
                let title = truncate_to_width(&conversation.title, width.saturating_sub(4));
                let marker = if active { "▍" } else { " " };
                let style = self.row_style(entry, active);
                let fill = " ".repeat(width.saturating_sub(title.width() + 3));
                self.draw_row(
                    frame,
                    row(y),
                    Line::from(vec![
                        Span::styled(marker, Style::default().fg(Color::Green)),
                        Span::styled(format!("  {title}{fill}"), style),
                    ]),
                    Some(entry),
                );
                y += 1;
            }
        }

        // Nav entries pinned to the bottom
        let mut y = history_bottom;
        if y >= inner.y + 2 {
            self.draw_row(
                frame,
                row(y),
                Line::styled("─".repeat(width), Style::default().fg(Color::DarkGray)),
                None,
            );
            y += 1;
            for (target, label) in [
                (NavTarget::Settings, "⚙ Settings"),
                (NavTarget::Help, "? Help & Docs"),
            ] {
                let entry = SidebarEntry::Nav(target);
                let style = self.row_style(entry, self.section.is_target(target));
                let fill = " ".repeat(width.saturating_sub(label.width() + 1));
                self.draw_row(
                    frame,
                    row(y),
                    Line::styled(format!(" {label}{fill}"), style),
                    Some(entry),
                );
                y += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conversation::{group_by_date, sample_history};
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn entries_follow_display_order() {
        let history = sample_history();
        let groups = group_by_date(&history);
        let entries = entries(&groups);
        assert_eq!(entries.len(), 1 + 6 + 2);
        assert_eq!(entries[0], SidebarEntry::NewConversation);
        assert_eq!(entries[1], SidebarEntry::History(ConversationId(1)));
        assert_eq!(entries[6], SidebarEntry::History(ConversationId(6)));
        assert_eq!(entries[8], SidebarEntry::Nav(NavTarget::Help));
    }

    #[test]
    fn entries_map_to_actions() {
        assert_eq!(SidebarEntry::Collapse.action(), Action::ToggleSidebar);
        assert_eq!(
            SidebarEntry::History(ConversationId(3)).action(),
            Action::LoadConversation(ConversationId(3))
        );
        assert_eq!(
            SidebarEntry::Nav(NavTarget::Settings).action(),
            Action::Navigate(NavTarget::Settings)
        );
    }

    #[test]
    fn cursor_moves_within_bounds_and_activates() {
        let history = sample_history();
        let groups = group_by_date(&history);
        let mut state = SidebarState::new(entries(&groups));

        assert_eq!(state.handle_event(&TuiEvent::CursorUp), None);
        assert_eq!(state.cursor, 0);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(SidebarEntry::History(ConversationId(1)))
        );
        state.handle_event(&TuiEvent::CursorEnd);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar(' ')),
            Some(SidebarEntry::Nav(NavTarget::Help))
        );
    }

    #[test]
    fn truncation_adds_ellipsis() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("Python script for data parsing", 10), "Python sc…");
        assert_eq!(truncate_to_width("anything", 0), "");
    }

    #[test]
    fn render_groups_and_records_click_regions() {
        let history = sample_history();
        let groups = group_by_date(&history);
        let mut state = SidebarState::new(entries(&groups));
        let backend = TestBackend::new(SIDEBAR_WIDTH, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| {
                Sidebar {
                    state: &mut state,
                    brand: "Assistant",
                    groups: &groups,
                    active: Some(ConversationId(2)),
                    section: Section::Settings,
                    focused: false,
                }
                .render(f, f.area());
            })
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Assistant"));
        assert!(text.contains("New conversation"));
        assert!(text.contains("YESTERDAY"));
        assert!(text.contains("FEB 19"));
        assert!(text.contains("Settings"));
        assert!(text.contains("Help & Docs"));

        // Brand row, blank, button: the button sits on row 2
        assert_eq!(state.hit(5, 2), Some(SidebarEntry::NewConversation));
        // Nav entries are the last two rows
        assert_eq!(state.hit(3, 23), Some(SidebarEntry::Nav(NavTarget::Help)));
        assert_eq!(state.hit(3, 22), Some(SidebarEntry::Nav(NavTarget::Settings)));
        assert_eq!(state.hit(SIDEBAR_WIDTH - 2, 0), Some(SidebarEntry::Collapse));
    }
}
