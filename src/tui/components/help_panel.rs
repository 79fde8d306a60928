//! # Help Panel Component
//!
//! Static help cards in a vertically scrollable column.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const PANEL_TITLE: &str = "Help & Docs";
pub const PANEL_SUBTITLE: &str = "Everything you need to get the most out of your assistant.";

pub struct HelpCard {
    pub icon: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

pub const HELP_CARDS: [HelpCard; 5] = [
    HelpCard {
        icon: "⌨",
        title: "Keyboard shortcuts",
        body: "Press Enter to send. Use Shift+Enter to add a new line without sending. \
               Ctrl+B toggles the sidebar, Ctrl+N starts a new conversation, Tab moves focus \
               and Ctrl+Q quits.",
    },
    HelpCard {
        icon: "▤",
        title: "Chat history",
        body: "Conversations are listed in the sidebar by date. \
               Select any past chat to resume it.",
    },
    HelpCard {
        icon: "⇄",
        title: "Connecting your backend",
        body: "Replies are simulated after a short delay. Swap the simulated reply task \
               for a call to your LLM or backend service.",
    },
    HelpCard {
        icon: "✎",
        title: "Customizing the UI",
        body: "Set the brand name, reply delay and default preferences in \
               ~/.parley/config.toml.",
    },
    HelpCard {
        icon: "✦",
        title: "Better responses",
        body: "Be specific and detailed in your prompts. Provide context, examples, \
               and desired output format.",
    },
];

/// Vertical scroll position in rows.
#[derive(Default)]
pub struct HelpPanelState {
    pub scroll: u16,
}

impl EventHandler for HelpPanelState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp | TuiEvent::CursorUp => {
                self.scroll = self.scroll.saturating_sub(1)
            }
            TuiEvent::ScrollDown | TuiEvent::CursorDown => {
                self.scroll = self.scroll.saturating_add(1)
            }
            TuiEvent::ScrollPageUp => self.scroll = self.scroll.saturating_sub(10),
            TuiEvent::ScrollPageDown => self.scroll = self.scroll.saturating_add(10),
            TuiEvent::CursorHome => self.scroll = 0,
            _ => {}
        }
        None
    }
}

fn card_height(card: &HelpCard, width: u16) -> u16 {
    let inner = width.saturating_sub(4).max(1) as usize;
    textwrap::wrap(card.body, inner).len() as u16 + 3
}

pub struct HelpPanel<'a> {
    pub state: &'a mut HelpPanelState,
}

impl<'a> HelpPanel<'a> {
    fn content_height(width: u16) -> u16 {
        3 + HELP_CARDS.iter().map(|c| card_height(c, width)).sum::<u16>()
    }
}

impl<'a> Component for HelpPanel<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let area = Rect {
            x: area.x + 1,
            width: area.width.saturating_sub(2),
            ..area
        };
        let max_scroll = Self::content_height(area.width).saturating_sub(area.height);
        self.state.scroll = self.state.scroll.min(max_scroll);

        // Virtual rows: header, then cards stacked with a gap row each.
        let mut top: i32 = -i32::from(self.state.scroll);
        let visible = |row: i32, height: u16| {
            row >= 0 && row + i32::from(height) <= i32::from(area.height)
        };

        if visible(top, 2) {
            let header = vec![
                Line::styled(PANEL_TITLE, Style::default().add_modifier(Modifier::BOLD)),
                Line::styled(PANEL_SUBTITLE, Style::default().fg(Color::DarkGray)),
            ];
            frame.render_widget(Paragraph::new(header), Rect::new(area.x, area.y, area.width, 2));
        }
        top += 3;

        for card in &HELP_CARDS {
            let height = card_height(card, area.width);
            let box_height = height - 1;
            if visible(top, box_height) {
                let rect = Rect::new(area.x, area.y + top as u16, area.width, box_height);
                let block = Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(Line::styled(
                        format!(" {} {} ", card.icon, card.title),
                        Style::default().add_modifier(Modifier::BOLD),
                    ));
                let inner = block.inner(rect);
                frame.render_widget(block, rect);
                frame.render_widget(
                    Paragraph::new(card.body)
                        .style(Style::default().fg(Color::Gray))
                        .wrap(Wrap { trim: true }),
                    Rect {
                        x: inner.x + 1,
                        width: inner.width.saturating_sub(2),
                        ..inner
                    },
                );
            }
            top += i32::from(height);
        }
    }
}
