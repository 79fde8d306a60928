use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::conversation::{Message, Role};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Bubbles never take more than this share of the thread width.
const MAX_BUBBLE_PERCENT: u16 = 80;
/// Narrowest bubble that still fits its role and time labels.
const MIN_BUBBLE_WIDTH: u16 = 14;

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "you",
        Role::Assistant => "✦ assistant",
    }
}

pub fn role_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::Green),
        Role::Assistant => Style::default().fg(Color::Blue),
    }
}

fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Width of the bubbles for a thread `area_width` columns wide.
fn max_bubble_width(area_width: u16) -> u16 {
    let share = area_width * MAX_BUBBLE_PERCENT / 100;
    share.max(MIN_BUBBLE_WIDTH).min(area_width)
}

/// A stateless chat bubble.
///
/// User bubbles hug the right edge, assistant bubbles the left. The block
/// shrinks to fit short messages. The role sits in the top border and the
/// timestamp in the bottom border.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub message: &'a Message,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    /// Bubble `(width, height)` inside a thread `area_width` columns wide.
    ///
    /// Heights are predicted with `textwrap` using options that match
    /// ratatui's `Paragraph` wrapping, so the list can lay out the scroll
    /// canvas before rendering anything.
    pub fn measure(message: &Message, area_width: u16) -> (u16, u16) {
        let max_width = max_bubble_width(area_width);
        let content_width = max_width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Degenerate case: terminal too narrow for borders + padding.
            return (area_width, 1);
        }

        let content = message.text.trim();
        if content.is_empty() {
            return (MIN_BUBBLE_WIDTH.min(max_width), VERTICAL_OVERHEAD);
        }

        let lines = textwrap::wrap(content, wrap_options(content_width));
        let widest = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
        let labels = role_label(message.role).width().max(message.time.width()) as u16 + 2;
        let width = (widest.max(labels) + HORIZONTAL_OVERHEAD).clamp(MIN_BUBBLE_WIDTH.min(max_width), max_width);

        // Ensure at least 1 content line even if textwrap returns empty
        let height = (lines.len() as u16).max(1) + VERTICAL_OVERHEAD;
        (width, height)
    }

    /// Rectangle the bubble occupies within a full-width row `area`.
    pub fn placement(message: &Message, area: Rect) -> Rect {
        let (width, height) = Self::measure(message, area.width);
        let x = match message.role {
            Role::User => area.x + area.width.saturating_sub(width),
            Role::Assistant => area.x,
        };
        Rect::new(x, area.y, width, height.min(area.height))
    }
}

impl<'a> Widget for MessageBubble<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = role_style(self.message.role);
        let border_style = style.add_modifier(Modifier::DIM);
        let bubble = Self::placement(self.message, area);

        let time = Line::from(format!(" {} ", self.message.time));
        let time = match self.message.role {
            Role::User => time.right_aligned(),
            Role::Assistant => time.left_aligned(),
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(format!(" {} ", role_label(self.message.role)))
            .title_style(style)
            .title_bottom(time)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner = block.inner(bubble);
        block.render(bubble, buf);

        Paragraph::new(self.message.text.trim())
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

impl<'a> Component for MessageBubble<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

/// Placeholder bubble shown while a reply is pending.
#[derive(Clone, Copy)]
pub struct TypingIndicator {
    pub frame_index: usize,
}

impl TypingIndicator {
    pub const HEIGHT: u16 = 3;
    const WIDTH: u16 = 11;

    /// Three dots with the bright one cycling left to right.
    pub fn dots(frame_index: usize) -> String {
        let lit = frame_index % 3;
        (0..3)
            .map(|i| if i == lit { "●" } else { "○" })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Widget for TypingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = role_style(Role::Assistant);
        let bubble = Rect::new(
            area.x,
            area.y,
            Self::WIDTH.min(area.width),
            Self::HEIGHT.min(area.height),
        );
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style.add_modifier(Modifier::DIM))
            .padding(Padding::horizontal(CONTENT_PAD_H));
        let inner = block.inner(bubble);
        block.render(bubble, buf);
        Paragraph::new(Self::dots(self.frame_index))
            .style(style)
            .render(inner, buf);
    }
}
