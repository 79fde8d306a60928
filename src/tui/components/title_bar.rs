//! # TitleBar Component
//!
//! Single-line top bar of the main pane.
//!
//! Stateless: every field is a prop supplied by the parent each frame.
//! The left side shows an open-sidebar hint (only while the sidebar is
//! closed) followed by the section title. The status message, if any, is
//! right-aligned.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::core::state::App;
use crate::core::view::Section;
use crate::tui::component::Component;

pub const SETTINGS_TITLE: &str = "Settings";
pub const HELP_TITLE: &str = "Help & Documentation";
pub const NEW_CONVERSATION_TITLE: &str = "New conversation";
pub const OPEN_SIDEBAR_HINT: &str = "☰ Ctrl+B";

/// Title for the current section and conversation.
pub fn section_title(app: &App) -> &str {
    match app.view.section {
        Section::Settings => SETTINGS_TITLE,
        Section::Help => HELP_TITLE,
        Section::Chat => app
            .store
            .active()
            .map_or(NEW_CONVERSATION_TITLE, |c| c.title.as_str()),
    }
}

pub struct TitleBar<'a> {
    pub title: &'a str,
    pub status_message: &'a str,
    pub sidebar_open: bool,
}

impl<'a> TitleBar<'a> {
    pub fn new(app: &'a App) -> Self {
        Self {
            title: section_title(app),
            status_message: &app.status_message,
            sidebar_open: app.view.sidebar_open,
        }
    }
}

impl<'a> Component for TitleBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        if !self.sidebar_open {
            spans.push(Span::styled(
                OPEN_SIDEBAR_HINT,
                Style::default().fg(Color::DarkGray),
            ));
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            self.title,
            Style::default().add_modifier(Modifier::BOLD),
        ));

        if !self.status_message.is_empty() {
            let used: usize = spans.iter().map(|s| s.content.width()).sum();
            let status_width = self.status_message.width();
            let pad = (area.width as usize).saturating_sub(used + status_width + 1);
            // Drop the status rather than overlap the title on narrow terminals
            if pad > 0 {
                spans.push(Span::raw(" ".repeat(pad)));
                spans.push(Span::styled(
                    self.status_message,
                    Style::default().fg(Color::Yellow),
                ));
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
