//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Flow
//!
//! ```text
//! crossterm Event ─map_event─▶ TuiEvent ─route_event─▶ Action ─apply─▶ update() ─▶ Effect
//!                                                        ▲                            │
//!                             reply timer task ──mpsc────┘        ScheduleReply ◀─────┘
//! ```
//!
//! ## Redraw Strategy
//!
//! - **Animating** (reply pending): draws every ~80ms so the typing dots move.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::{Write, stdout};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::layout::{Position, Rect};
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::reply::{ReplyTicket, simulate_reply};
use crate::core::state::App;
use crate::core::view::{NavTarget, Section};
use crate::tui::component::EventHandler;
use crate::tui::components::settings_panel::SettingsRow;
use crate::tui::components::sidebar::{self, SidebarEntry};
use crate::tui::components::{
    HelpPanelState, InputBox, InputEvent, MessageListState, SettingsPanelState, SidebarState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Milliseconds per typing-indicator step.
const TYPING_FRAME_MS: u128 = 250;

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Cursor over sidebar rows. Typing auto-switches to Main.
    Sidebar,
    /// Composer, settings rows or help scroll, depending on the section.
    Main,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub sidebar: SidebarState,
    pub settings: SettingsPanelState,
    pub help: HelpPanelState,
    pub focus: Focus,
    /// Composer rectangle from the last frame (chat section only)
    pub composer_area: Option<Rect>,
}

impl TuiState {
    pub fn new(app: &App) -> Self {
        let mut tui = Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            sidebar: SidebarState::new(Vec::new()),
            settings: SettingsPanelState::default(),
            help: HelpPanelState::default(),
            focus: Focus::Main, // User expects to type immediately
            composer_area: None,
        };
        tui.sync(app);
        tui
    }

    /// Sync component props with App state.
    pub fn sync(&mut self, app: &App) {
        if !app.view.sidebar_open {
            self.focus = Focus::Main;
        }
        self.sidebar
            .set_entries(sidebar::entries(&app.store.grouped()));
        self.input_box.disabled = app.is_typing();
        self.input_box.focused = self.focus == Focus::Main && app.view.section == Section::Chat;
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Enable Kitty keyboard protocol unconditionally (allows Shift+Enter detection)
        // Detection via supports_keyboard_enhancement() fails in WSL, but the protocol
        // is harmlessly ignored by terminals that don't support it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!(
            "Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)"
        );
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Owns the running reply timer, if any.
struct ReplyTimer {
    tx: mpsc::Sender<Action>,
    handle: Option<AbortHandle>,
}

impl ReplyTimer {
    fn new(tx: mpsc::Sender<Action>) -> Self {
        Self { tx, handle: None }
    }

    fn schedule(&mut self, ticket: ReplyTicket, delay: Duration) {
        self.cancel();
        self.handle = Some(spawn_reply(ticket, delay, self.tx.clone()));
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

fn spawn_reply(ticket: ReplyTicket, delay: Duration, tx: mpsc::Sender<Action>) -> AbortHandle {
    info!(
        "Scheduling reply {} for {:?} in {}ms",
        ticket.id,
        ticket.conversation,
        delay.as_millis()
    );
    let handle = tokio::spawn(async move {
        let action = simulate_reply(ticket, delay).await;
        if tx.send(action).is_err() {
            warn!("Failed to deliver reply {}: receiver dropped", ticket.id);
        }
    });
    handle.abort_handle()
}

fn ring_bell() {
    let mut out = stdout();
    if let Err(e) = out.write_all(b"\x07").and_then(|()| out.flush()) {
        warn!("Failed to ring terminal bell: {}", e);
    }
}

/// Translate one input event into at most one core action.
///
/// Presentation-only events (focus changes, scrolling, cursor movement,
/// typing) are fully handled here and yield `None`.
fn route_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Resize => None,
        TuiEvent::Quit => Some(Action::Quit),
        TuiEvent::ToggleSidebar => Some(Action::ToggleSidebar),
        TuiEvent::NewConversation => Some(Action::NewConversation),
        TuiEvent::ToggleSettings => Some(Action::Navigate(NavTarget::Settings)),
        TuiEvent::ToggleHelp => Some(Action::Navigate(NavTarget::Help)),
        TuiEvent::FocusNext => {
            tui.focus = match tui.focus {
                Focus::Main if app.view.sidebar_open => Focus::Sidebar,
                _ => Focus::Main,
            };
            None
        }
        TuiEvent::MouseClick(column, row) => route_click(tui, column, row),
        // Scroll events always go to the main pane regardless of focus
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            match app.view.section {
                Section::Chat => {
                    tui.message_list.handle_event(&event);
                }
                Section::Help => {
                    tui.help.handle_event(&event);
                }
                Section::Settings => {}
            }
            None
        }
        _ => match tui.focus {
            Focus::Sidebar => route_sidebar_key(app, tui, event),
            Focus::Main => route_main_key(app, tui, event),
        },
    }
}

fn route_click(tui: &mut TuiState, column: u16, row: u16) -> Option<Action> {
    if let Some(entry) = tui.sidebar.hit(column, row) {
        tui.focus = Focus::Sidebar;
        tui.sidebar.select(entry);
        return Some(entry.action());
    }
    if let Some(setting) = tui.settings.hit(column, row) {
        tui.focus = Focus::Main;
        if let Some(index) = components::settings_panel::rows().position(|r| r == setting) {
            tui.settings.selected = index;
        }
        return Some(setting.action());
    }
    if tui
        .composer_area
        .is_some_and(|area| area.contains(Position::new(column, row)))
    {
        tui.focus = Focus::Main;
    }
    None
}

fn route_sidebar_key(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Escape => {
            tui.focus = Focus::Main;
            None
        }
        // Typing auto-switches to the composer and forwards the event
        TuiEvent::InputChar(c) if c != ' ' && app.view.section == Section::Chat => {
            tui.focus = Focus::Main;
            tui.input_box.focused = true;
            tui.input_box.handle_event(&event);
            None
        }
        TuiEvent::Paste(_) if app.view.section == Section::Chat => {
            tui.focus = Focus::Main;
            tui.input_box.focused = true;
            tui.input_box.handle_event(&event);
            None
        }
        _ => tui.sidebar.handle_event(&event).map(SidebarEntry::action),
    }
}

fn route_main_key(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    match app.view.section {
        Section::Chat => {
            if event == TuiEvent::Escape {
                if app.view.sidebar_open {
                    tui.focus = Focus::Sidebar;
                }
                return None;
            }
            match tui.input_box.handle_event(&event) {
                Some(InputEvent::Submit(text)) => Some(Action::Send(text)),
                Some(InputEvent::ContentChanged) => None,
                // Up/Down past the composer's first/last row scroll the thread
                None => {
                    let scroll = match event {
                        TuiEvent::CursorUp => Some(TuiEvent::ScrollUp),
                        TuiEvent::CursorDown => Some(TuiEvent::ScrollDown),
                        _ => None,
                    };
                    if let Some(scroll) = scroll {
                        tui.message_list.handle_event(&scroll);
                    }
                    None
                }
            }
        }
        // Esc closes the panel like its nav entry does
        Section::Settings => match event {
            TuiEvent::Escape => Some(Action::Navigate(NavTarget::Settings)),
            _ => tui.settings.handle_event(&event).map(SettingsRow::action),
        },
        Section::Help => match event {
            TuiEvent::Escape => Some(Action::Navigate(NavTarget::Help)),
            _ => {
                tui.help.handle_event(&event);
                None
            }
        },
    }
}

/// Apply an action and carry out its effect. Returns true when the app should quit.
fn apply(app: &mut App, tui: &mut TuiState, timer: &mut ReplyTimer, action: Action) -> bool {
    debug!("Applying action: {:?}", action);
    let replaces_thread = matches!(
        action,
        Action::NewConversation | Action::LoadConversation(_)
    );
    let starts_fresh = matches!(action, Action::NewConversation);

    let effect = update(app, action);
    if replaces_thread {
        tui.message_list = MessageListState::new();
    }
    if starts_fresh {
        tui.input_box.clear();
    }

    match effect {
        Effect::None => {}
        Effect::ScheduleReply(ticket) => {
            tui.input_box.clear();
            tui.message_list.stick_to_bottom = true;
            let delay = app.reply.sample_delay(&mut rand::thread_rng());
            timer.schedule(ticket, delay);
            if app.view.preferences.sounds {
                ring_bell();
            }
        }
        Effect::CancelReply => timer.cancel(),
        Effect::ReplyDelivered => {
            timer.handle = None;
            if app.view.preferences.sounds {
                ring_bell();
            }
        }
        Effect::Quit => return true,
    }

    tui.sync(app);
    false
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(&app);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard =
        TerminalModeGuard::new().inspect_err(|e| warn!("Failed to enable terminal modes: {}", e));

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut timer = ReplyTimer::new(tx);

    // Animation timer
    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        tui.sync(&app);

        let animating = app.is_typing();
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let frame_index = (start_time.elapsed().as_millis() / TYPING_FRAME_MS) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, frame_index))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = route_event(&app, &mut tui, event)
                && apply(&mut app, &mut tui, &mut timer, action)
            {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (reply timers)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            apply(&mut app, &mut tui, &mut timer, action);
        }
    }

    timer.cancel();
    ratatui::restore();
    info!("Terminal restored");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conversation::ConversationId;
    use crate::core::reply::DeliveryPolicy;
    use crate::core::view::Preference;
    use crate::test_support::{test_app, test_app_with_policy};

    fn type_text(app: &App, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            assert_eq!(route_event(app, tui, TuiEvent::InputChar(c)), None);
        }
    }

    #[test]
    fn global_shortcuts_map_to_actions() {
        let app = test_app();
        let mut tui = TuiState::new(&app);
        assert_eq!(route_event(&app, &mut tui, TuiEvent::Quit), Some(Action::Quit));
        assert_eq!(
            route_event(&app, &mut tui, TuiEvent::ToggleSettings),
            Some(Action::Navigate(NavTarget::Settings))
        );
        assert_eq!(
            route_event(&app, &mut tui, TuiEvent::ToggleHelp),
            Some(Action::Navigate(NavTarget::Help))
        );
        assert_eq!(
            route_event(&app, &mut tui, TuiEvent::NewConversation),
            Some(Action::NewConversation)
        );
        assert_eq!(
            route_event(&app, &mut tui, TuiEvent::ToggleSidebar),
            Some(Action::ToggleSidebar)
        );
    }

    #[test]
    fn typing_then_enter_sends() {
        let app = test_app();
        let mut tui = TuiState::new(&app);
        type_text(&app, &mut tui, "hello");
        assert_eq!(
            route_event(&app, &mut tui, TuiEvent::Submit),
            Some(Action::Send("hello".into()))
        );
    }

    #[test]
    fn tab_cycles_focus_only_with_open_sidebar() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        route_event(&app, &mut tui, TuiEvent::FocusNext);
        assert_eq!(tui.focus, Focus::Sidebar);
        route_event(&app, &mut tui, TuiEvent::FocusNext);
        assert_eq!(tui.focus, Focus::Main);

        update(&mut app, Action::ToggleSidebar);
        tui.sync(&app);
        route_event(&app, &mut tui, TuiEvent::FocusNext);
        assert_eq!(tui.focus, Focus::Main);
    }

    #[test]
    fn sidebar_cursor_loads_conversation() {
        let app = test_app();
        let mut tui = TuiState::new(&app);
        tui.focus = Focus::Sidebar;
        route_event(&app, &mut tui, TuiEvent::CursorDown);
        route_event(&app, &mut tui, TuiEvent::CursorDown);
        assert_eq!(
            route_event(&app, &mut tui, TuiEvent::Submit),
            Some(Action::LoadConversation(ConversationId(2)))
        );
    }

    #[test]
    fn typing_in_sidebar_switches_to_composer() {
        let app = test_app();
        let mut tui = TuiState::new(&app);
        tui.focus = Focus::Sidebar;
        route_event(&app, &mut tui, TuiEvent::InputChar('h'));
        assert_eq!(tui.focus, Focus::Main);
        assert_eq!(tui.input_box.buffer, "h");
    }

    #[test]
    fn settings_keys_toggle_and_escape_closes() {
        let mut app = test_app();
        update(&mut app, Action::Navigate(NavTarget::Settings));
        let mut tui = TuiState::new(&app);
        assert_eq!(
            route_event(&app, &mut tui, TuiEvent::InputChar(' ')),
            Some(Action::TogglePreference(Preference::Compact))
        );
        assert_eq!(
            route_event(&app, &mut tui, TuiEvent::Escape),
            Some(Action::Navigate(NavTarget::Settings))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn accepted_send_clears_composer_and_schedules_reply() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        let (tx, rx) = mpsc::channel();
        let mut timer = ReplyTimer::new(tx);

        type_text(&app, &mut tui, "hello");
        let action = route_event(&app, &mut tui, TuiEvent::Submit).unwrap();
        assert!(!apply(&mut app, &mut tui, &mut timer, action));
        assert!(tui.input_box.buffer.is_empty());
        assert!(tui.input_box.disabled);
        assert!(timer.handle.is_some());

        tokio::time::sleep(Duration::from_millis(1800)).await;
        let reply = rx.try_recv().expect("reply should have fired");
        assert!(matches!(reply, Action::ReplyReady(_)));

        apply(&mut app, &mut tui, &mut timer, reply);
        assert!(!tui.input_box.disabled);
        assert!(timer.handle.is_none());
        assert_eq!(app.store.messages().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_send_keeps_composer_text() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        let (tx, _rx) = mpsc::channel();
        let mut timer = ReplyTimer::new(tx);

        apply(&mut app, &mut tui, &mut timer, Action::Send("first".into()));
        type_text(&app, &mut tui, "second");
        // Composer is disabled while the reply is pending
        assert_eq!(route_event(&app, &mut tui, TuiEvent::Submit), None);
        assert_eq!(tui.input_box.buffer, "second");
    }

    #[test]
    fn new_conversation_discards_draft() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        let (tx, _rx) = mpsc::channel();
        let mut timer = ReplyTimer::new(tx);

        apply(&mut app, &mut tui, &mut timer, Action::LoadConversation(ConversationId(2)));
        type_text(&app, &mut tui, "half a thought");
        apply(&mut app, &mut tui, &mut timer, Action::NewConversation);
        assert!(tui.input_box.buffer.is_empty());
        assert!(app.store.messages().is_empty());

        // The fresh composer accepts input from the start
        type_text(&app, &mut tui, "hi");
        assert_eq!(tui.input_box.buffer, "hi");
    }

    #[tokio::test(start_paused = true)]
    async fn navigation_aborts_timer_under_origin_policy() {
        let mut app = test_app_with_policy(DeliveryPolicy::Origin);
        let mut tui = TuiState::new(&app);
        let (tx, rx) = mpsc::channel();
        let mut timer = ReplyTimer::new(tx);

        apply(&mut app, &mut tui, &mut timer, Action::Send("hello".into()));
        apply(&mut app, &mut tui, &mut timer, Action::NewConversation);
        assert!(timer.handle.is_none());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
        assert!(app.store.messages().is_empty());
    }
}
