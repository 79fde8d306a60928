//! # InputBox Component
//!
//! The composer: a multi-line text field that submits on Enter.
//!
//! ## Responsibilities
//!
//! - Capture text input
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Emit `Submit` on Enter, unless disabled or blank
//! - Show a placeholder when empty and a waiting title while disabled
//!
//! ## State Management
//!
//! The buffer is internal state. `disabled` and `focused` are props synced
//! from the app every frame. The buffer is only cleared when the parent
//! calls [`InputBox::clear`] after the core accepted the message.

mod layout;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use layout::{
    MAX_VISIBLE_LINES, Row, TEXT_OFFSET_X, TEXT_OFFSET_Y, VERTICAL_OVERHEAD, inner_width, locate,
    next_char_boundary, offset_at_column, prev_char_boundary, wrap_rows,
};

pub const PLACEHOLDER: &str = "Message your assistant…";
pub const INPUT_HINT: &str = "Enter to send · Shift+Enter for new line";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User pressed Enter on a non-blank buffer
    Submit(String),
    /// Text or cursor changed
    ContentChanged,
}

/// Multi-line composer.
///
/// # Props
///
/// - `disabled`: a reply is pending, Enter does nothing
/// - `focused`: the main pane has keyboard focus
pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    pub disabled: bool,
    pub focused: bool,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
    /// First visible row when the content is taller than the box
    scroll_offset: u16,
    /// Inner text width from the last render, used for vertical movement
    last_width: u16,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    const DEFAULT_WIDTH: u16 = 76;

    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            disabled: false,
            focused: true,
            cursor: 0,
            scroll_offset: 0,
            last_width: Self::DEFAULT_WIDTH,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    /// Height needed for the current buffer at `outer_width`, clamped to
    /// `[1, MAX_VISIBLE_LINES]` rows plus borders.
    pub fn calculate_height(&self, outer_width: u16) -> u16 {
        let rows = wrap_rows(&self.buffer, inner_width(outer_width)).len();
        let visible = rows.clamp(1, usize::from(MAX_VISIBLE_LINES));
        u16::try_from(visible).unwrap_or(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn rows(&self) -> Vec<Row> {
        wrap_rows(&self.buffer, self.last_width)
    }

    fn move_vertically(&mut self, down: bool) -> bool {
        let rows = self.rows();
        let (row, col) = locate(&self.buffer, &rows, self.cursor);
        let target = if down {
            row + 1
        } else if row > 0 {
            row - 1
        } else {
            return false;
        };
        let Some(&target_row) = rows.get(target) else {
            return false;
        };
        self.cursor = offset_at_column(&self.buffer, target_row, col);
        true
    }

    fn keep_cursor_visible(&mut self, rows: &[Row]) {
        let (row, _) = locate(&self.buffer, rows, self.cursor);
        let visible = usize::from(MAX_VISIBLE_LINES);
        let offset = usize::from(self.scroll_offset);
        let offset = if rows.len() <= visible {
            0
        } else if row < offset {
            row
        } else if row >= offset + visible {
            row + 1 - visible
        } else {
            offset
        };
        // Rows past u16::MAX cannot be drawn anyway
        self.scroll_offset = u16::try_from(offset).unwrap_or(u16::MAX);
    }

    fn insert(&mut self, text: &str) -> Option<InputEvent> {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
        Some(InputEvent::ContentChanged)
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.last_width = inner_width(area.width);
        let rows = self.rows();
        self.keep_cursor_visible(&rows);

        let title = if self.disabled {
            " Waiting for reply… "
        } else {
            " Message "
        };
        let border_style = if self.focused && !self.disabled {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title)
            .padding(Padding::horizontal(1));

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            let lines: Vec<Line> = rows
                .iter()
                .skip(self.scroll_offset as usize)
                .take(MAX_VISIBLE_LINES as usize)
                .map(|r| Line::raw(&self.buffer[r.start..r.end]))
                .collect();
            Paragraph::new(lines)
        };
        frame.render_widget(paragraph.block(block), area);

        if self.focused && !self.disabled {
            let (row, col) = locate(&self.buffer, &rows, self.cursor);
            let visible_row = u16::try_from(row.saturating_sub(usize::from(self.scroll_offset)))
                .unwrap_or(u16::MAX)
                .min(MAX_VISIBLE_LINES - 1);
            let x = (area.x + TEXT_OFFSET_X + col).min(area.right().saturating_sub(2));
            let y = (area.y + TEXT_OFFSET_Y).saturating_add(visible_row);
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut utf8 = [0u8; 4];
                self.insert(c.encode_utf8(&mut utf8))
            }
            TuiEvent::Paste(text) => self.insert(text),
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorUp => self
                .move_vertically(false)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::CursorDown => self
                .move_vertically(true)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::Submit => {
                if self.disabled || self.buffer.trim().is_empty() {
                    None
                } else {
                    Some(InputEvent::Submit(self.buffer.clone()))
                }
            }
            _ => None,
        }
    }
}
