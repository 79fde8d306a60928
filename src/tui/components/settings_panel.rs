//! # Settings Panel Component
//!
//! Preference switches grouped into cards, plus the "Clear all" row.
//!
//! `SettingsPanelState` holds the keyboard cursor and the click regions
//! recorded on the last frame. `SettingsPanel` is the per-frame wrapper.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::action::Action;
use crate::core::view::{Preference, Preferences};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const PANEL_TITLE: &str = "Settings";
pub const PANEL_SUBTITLE: &str = "Manage your preferences and customize your experience.";
const CLEAR_LABEL: &str = "Clear conversation history";
const CLEAR_DESCRIPTION: &str = "Permanently delete all past chats";
const CLEAR_BUTTON: &str = "[ Clear all ]";

/// Rows each take a label line and a description line.
const ROW_HEIGHT: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    Toggle(Preference),
    ClearHistory,
}

impl SettingsRow {
    pub fn action(self) -> Action {
        match self {
            SettingsRow::Toggle(preference) => Action::TogglePreference(preference),
            SettingsRow::ClearHistory => Action::ClearHistory,
        }
    }

    fn label(self) -> &'static str {
        match self {
            SettingsRow::Toggle(p) => p.label(),
            SettingsRow::ClearHistory => CLEAR_LABEL,
        }
    }

    fn description(self) -> &'static str {
        match self {
            SettingsRow::Toggle(p) => p.description(),
            SettingsRow::ClearHistory => CLEAR_DESCRIPTION,
        }
    }
}

pub static SETTINGS_GROUPS: [(&str, &[SettingsRow]); 3] = [
    (
        "Interface",
        &[
            SettingsRow::Toggle(Preference::Compact),
            SettingsRow::Toggle(Preference::Suggestions),
        ],
    ),
    (
        "Notifications",
        &[
            SettingsRow::Toggle(Preference::Notifications),
            SettingsRow::Toggle(Preference::Sounds),
        ],
    ),
    ("Data", &[SettingsRow::ClearHistory]),
];

/// All rows in display order.
pub fn rows() -> impl Iterator<Item = SettingsRow> {
    SETTINGS_GROUPS.iter().flat_map(|(_, rows)| rows.iter().copied())
}

#[derive(Default)]
pub struct SettingsPanelState {
    pub selected: usize,
    hit_regions: Vec<(Rect, SettingsRow)>,
}

impl SettingsPanelState {
    pub fn selected_row(&self) -> Option<SettingsRow> {
        rows().nth(self.selected)
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<SettingsRow> {
        let position = Position::new(column, row);
        self.hit_regions
            .iter()
            .find(|(rect, _)| rect.contains(position))
            .map(|(_, r)| *r)
    }

    pub fn clear_hit_regions(&mut self) {
        self.hit_regions.clear();
    }
}

impl EventHandler for SettingsPanelState {
    type Event = SettingsRow;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let last = rows().count() - 1;
        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(last);
                None
            }
            TuiEvent::Submit | TuiEvent::InputChar(' ') => self.selected_row(),
            _ => None,
        }
    }
}

fn switch(on: bool) -> Span<'static> {
    if on {
        Span::styled("[■ on ]", Style::default().fg(Color::Green))
    } else {
        Span::styled("[ off□]", Style::default().fg(Color::DarkGray))
    }
}

pub struct SettingsPanel<'a> {
    pub state: &'a mut SettingsPanelState,
    pub preferences: Preferences,
    pub focused: bool,
}

impl<'a> SettingsPanel<'a> {
    fn render_row(&mut self, frame: &mut Frame, rect: Rect, row: SettingsRow, index: usize) {
        let control = match row {
            SettingsRow::Toggle(p) => switch(self.preferences.get(p)),
            SettingsRow::ClearHistory => {
                Span::styled(CLEAR_BUTTON, Style::default().fg(Color::Red))
            }
        };
        let label_area = rect.width.saturating_sub(control.content.width() as u16 + 1);
        let highlighted = self.focused && self.state.selected == index;
        let label_style = if highlighted {
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default()
        };

        frame.render_widget(
            Paragraph::new(Line::styled(row.label(), label_style)),
            Rect::new(rect.x, rect.y, label_area, 1),
        );
        frame.render_widget(
            Paragraph::new(Line::styled(
                row.description(),
                Style::default().fg(Color::DarkGray),
            )),
            Rect::new(rect.x, rect.y + 1, label_area, 1),
        );
        frame.render_widget(
            Paragraph::new(Line::from(control).right_aligned()),
            Rect::new(rect.x, rect.y, rect.width, 1),
        );
        self.state.hit_regions.push((rect, row));
    }
}

impl<'a> Component for SettingsPanel<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.hit_regions.clear();
        let area = Rect {
            x: area.x + 1,
            width: area.width.saturating_sub(2),
            ..area
        };

        let header = vec![
            Line::styled(PANEL_TITLE, Style::default().add_modifier(Modifier::BOLD)),
            Line::styled(PANEL_SUBTITLE, Style::default().fg(Color::DarkGray)),
        ];
        frame.render_widget(Paragraph::new(header), area);

        let mut y = area.y + 3;
        let mut index = 0;
        for (label, group) in SETTINGS_GROUPS.iter() {
            let height = group.len() as u16 * ROW_HEIGHT + 2;
            if y + height > area.bottom() {
                break;
            }
            let card = Rect::new(area.x, y, area.width, height);
            let block = Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    format!(" {} ", label.to_uppercase()),
                    Style::default().fg(Color::Gray),
                ));
            let inner = block.inner(card);
            frame.render_widget(block, card);

            for (offset, row) in group.iter().enumerate() {
                let rect = Rect::new(
                    inner.x + 1,
                    inner.y + offset as u16 * ROW_HEIGHT,
                    inner.width.saturating_sub(2),
                    ROW_HEIGHT,
                );
                self.render_row(frame, rect, *row, index);
                index += 1;
            }
            y += height + 1;
        }
    }
}
