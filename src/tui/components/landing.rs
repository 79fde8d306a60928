//! # Landing Page Component
//!
//! Welcome screen shown while the active thread is empty.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub const WELCOME_HEADING: &str = "How can I help?";
pub const WELCOME_SUBTITLE: &str = "Ask me anything to get started.";

pub const PROMPT_SUGGESTIONS: [&str; 4] = [
    "Summarize a long document",
    "Draft an email to my team",
    "Explain a piece of code",
    "Brainstorm project ideas",
];

pub struct LandingPage {
    show_suggestions: bool,
}

impl LandingPage {
    pub fn new(show_suggestions: bool) -> Self {
        Self { show_suggestions }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                "✦",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(
                WELCOME_HEADING,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                WELCOME_SUBTITLE,
                Style::default().fg(Color::DarkGray),
            )),
        ];

        if self.show_suggestions {
            lines.push(Line::default());
            lines.extend(PROMPT_SUGGESTIONS.iter().map(|s| {
                Line::from(Span::styled(
                    format!("› {s}"),
                    Style::default().fg(Color::Gray),
                ))
            }));
        }
        lines
    }
}

impl Component for LandingPage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.lines();
        let [centered] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);

        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            centered,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(show_suggestions: bool) -> String {
        let backend = TestBackend::new(60, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| LandingPage::new(show_suggestions).render(f, f.area()))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn shows_welcome_text() {
        let text = render(false);
        assert!(text.contains(WELCOME_HEADING));
        assert!(text.contains(WELCOME_SUBTITLE));
        assert!(!text.contains(PROMPT_SUGGESTIONS[0]));
    }

    #[test]
    fn suggestions_follow_preference() {
        let text = render(true);
        for suggestion in PROMPT_SUGGESTIONS {
            assert!(text.contains(suggestion));
        }
    }
}
