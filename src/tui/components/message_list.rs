//! # MessageList Component
//!
//! Scrollable view of the active thread.
//!
//! ## Responsibilities
//!
//! - Display the messages of the active conversation
//! - Show the typing indicator while a reply is pending
//! - Follow new content unless the user scrolled up
//! - Cache bubble heights between frames
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the message slice (props).

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::conversation::{Message, MessageId};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::{MessageBubble, TypingIndicator};
use crate::tui::event::TuiEvent;

/// Scroll state and layout cache for the thread.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::default(),
            stick_to_bottom: true, // Start attached to bottom
            viewport_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.layout.total_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    /// Re-engage auto-scroll once the user has scrolled back to the end.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }
}

/// Scrolling is the only interaction, so the list emits no events.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Per-message row heights, keyed by message id.
///
/// Messages never change after creation, so a cached height stays valid as
/// long as the id at that position, the width and the spacing are the same.
#[derive(Default)]
pub struct LayoutCache {
    ids: Vec<MessageId>,
    pub heights: Vec<u16>,
    width: u16,
    gap: u16,
}

impl LayoutCache {
    /// Number of leading entries that can be kept for this frame.
    pub fn reusable_count(&self, messages: &[Message], width: u16, gap: u16) -> usize {
        if width != self.width || gap != self.gap {
            return 0;
        }
        self.ids
            .iter()
            .zip(messages)
            .take_while(|(id, m)| **id == m.id)
            .count()
    }

    pub fn update(&mut self, messages: &[Message], width: u16, gap: u16) {
        let keep = self.reusable_count(messages, width, gap);
        self.ids.truncate(keep);
        self.heights.truncate(keep);
        for message in &messages[keep..] {
            let (_, height) = MessageBubble::measure(message, width);
            self.ids.push(message.id);
            self.heights.push(height + gap);
        }
        self.width = width;
        self.gap = gap;
    }

    pub fn total_height(&self) -> u16 {
        self.heights.iter().sum()
    }
}

/// Scrollable thread component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [Message],
    pub typing: bool,
    pub compact: bool,
    pub frame_index: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        messages: &'a [Message],
        typing: bool,
        compact: bool,
        frame_index: usize,
    ) -> Self {
        Self {
            state,
            messages,
            typing,
            compact,
            frame_index,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area
        let gap = if self.compact { 0 } else { 1 };

        // 1. Update Layout Cache
        self.state.layout.update(self.messages, content_width, gap);
        let messages_height = self.state.layout.total_height();
        let typing_height = if self.typing {
            TypingIndicator::HEIGHT + gap
        } else {
            0
        };
        let canvas_height = messages_height + typing_height;

        // 2. Clamp scroll offset to prevent overscrolling past content.
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        // 3. Render bubbles into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (message, &height) in self.messages.iter().zip(&self.state.layout.heights) {
            let rect = Rect::new(0, y_offset, content_width, height - gap);
            scroll_view.render_widget(MessageBubble::new(message), rect);
            y_offset += height;
        }
        if self.typing {
            let rect = Rect::new(0, y_offset, content_width, TypingIndicator::HEIGHT);
            scroll_view.render_widget(
                TypingIndicator {
                    frame_index: self.frame_index,
                },
                rect,
            );
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
