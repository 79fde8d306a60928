//! # Application State
//!
//! Core business state for Parley. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── brand: String                 // sidebar heading
//! ├── view: ViewState               // section, sidebar, preferences
//! ├── store: ConversationStore      // history + active thread
//! ├── reply: ReplySettings          // delay range, delivery policy, text
//! ├── pending: Option<ReplyTicket>  // Some = typing indicator shown
//! └── status_message: String        // transient status text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::ResolvedConfig;
use crate::core::conversation::{ConversationId, ConversationStore};
use crate::core::reply::{ReplySettings, ReplyTicket};
use crate::core::view::ViewState;

pub const DEFAULT_BRAND: &str = "Assistant";

pub struct App {
    pub brand: String,
    pub view: ViewState,
    pub store: ConversationStore,
    pub reply: ReplySettings,
    /// Reply currently being "typed".
    pub pending: Option<ReplyTicket>,
    pub status_message: String,
    next_ticket: u64,
}

impl Default for App {
    fn default() -> Self {
        Self::new(ReplySettings::default())
    }
}

impl App {
    pub fn new(reply: ReplySettings) -> Self {
        Self {
            brand: DEFAULT_BRAND.to_string(),
            view: ViewState::default(),
            store: ConversationStore::default(),
            reply,
            pending: None,
            status_message: String::new(),
            next_ticket: 1,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut app = Self::new(config.reply.clone());
        app.brand = config.brand.clone();
        app.view.sidebar_open = config.sidebar_open;
        app.view.preferences = config.preferences;
        app
    }

    pub fn is_typing(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn issue_ticket(&mut self, conversation: ConversationId) -> ReplyTicket {
        let ticket = ReplyTicket {
            id: self.next_ticket,
            conversation,
        };
        self.next_ticket += 1;
        ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{ParleyConfig, resolve};
    use crate::core::view::Section;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.brand, DEFAULT_BRAND);
        assert_eq!(app.view.section, Section::Chat);
        assert!(app.view.sidebar_open);
        assert!(!app.is_typing());
        assert!(app.store.messages().is_empty());
        assert_eq!(app.store.list_conversations().len(), 6);
    }

    #[test]
    fn from_config_applies_overrides() {
        let mut config = resolve(&ParleyConfig::default(), &Default::default());
        config.brand = "Helper".to_string();
        config.sidebar_open = false;
        config.preferences.compact = true;

        let app = App::from_config(&config);
        assert_eq!(app.brand, "Helper");
        assert!(!app.view.sidebar_open);
        assert!(app.view.preferences.compact);
    }

    #[test]
    fn tickets_are_unique() {
        let mut app = test_app();
        let a = app.issue_ticket(ConversationId(1));
        let b = app.issue_ticket(ConversationId(1));
        assert_ne!(a, b);
    }
}
