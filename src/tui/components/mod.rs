//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as props:
//! - `TitleBar`: section title, sidebar hint and status line
//! - `MessageBubble` / `TypingIndicator`: one entry of the thread
//! - `LandingPage`: welcome screen for an empty thread
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components whose state lives in `TuiState` and that emit events:
//! - `InputBox`: the composer
//! - `MessageList`: scrollable thread with layout caching
//! - `Sidebar`: history and navigation, keyboard cursor and click regions
//! - `SettingsPanel`: preference switches
//! - `HelpPanel`: scrollable help cards
//!
//! Components never mutate `App`. Events they emit are mapped to
//! `core::action::Action`s by the event loop.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs       (Top bar)
//! ├── sidebar.rs         (History + nav)
//! ├── message.rs         (Bubble and typing indicator)
//! ├── message_list.rs    (Scrollable thread)
//! ├── landing.rs         (Welcome screen)
//! ├── settings_panel.rs  (Preferences)
//! ├── help_panel.rs      (Help cards)
//! └── input_box/         (Composer)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod help_panel;
pub mod input_box;
pub mod landing;
pub mod message;
pub mod message_list;
pub mod settings_panel;
pub mod sidebar;

pub use help_panel::{HelpPanel, HelpPanelState};
pub use input_box::{InputBox, InputEvent};
pub use landing::LandingPage;
pub use message_list::{MessageList, MessageListState};
pub use settings_panel::{SettingsPanel, SettingsPanelState};
pub use sidebar::{Sidebar, SidebarState};
