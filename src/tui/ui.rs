use crate::core::state::App;
use crate::core::view::Section;
use crate::tui::component::Component;
use crate::tui::components::input_box::INPUT_HINT;
use crate::tui::components::sidebar::SIDEBAR_WIDTH;
use crate::tui::components::{
    HelpPanel, LandingPage, MessageList, SettingsPanel, Sidebar, TitleBar,
};
use crate::tui::{Focus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

/// Split the screen into the optional sidebar column and the main pane.
pub fn split_screen(area: Rect, sidebar_open: bool) -> (Option<Rect>, Rect) {
    use Constraint::{Length, Min};
    if !sidebar_open || area.width <= SIDEBAR_WIDTH {
        return (None, area);
    }
    let [sidebar, main] = Layout::horizontal([Length(SIDEBAR_WIDTH), Min(0)]).areas(area);
    (Some(sidebar), main)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, frame_index: usize) {
    use Constraint::{Length, Min};
    let (sidebar_area, main_area) = split_screen(frame.area(), app.view.sidebar_open);

    match sidebar_area {
        Some(area) => {
            let groups = app.store.grouped();
            Sidebar {
                state: &mut tui.sidebar,
                brand: &app.brand,
                groups: &groups,
                active: app.store.active_id(),
                section: app.view.section,
                focused: tui.focus == Focus::Sidebar,
            }
            .render(frame, area);
        }
        None => tui.sidebar.clear_hit_regions(),
    }

    let [title_area, body_area] = Layout::vertical([Length(1), Min(0)]).areas(main_area);
    TitleBar::new(app).render(frame, title_area);

    if app.view.section != Section::Settings {
        tui.settings.clear_hit_regions();
    }
    tui.composer_area = None;

    match app.view.section {
        Section::Chat => draw_chat(frame, app, tui, body_area, frame_index),
        Section::Settings => SettingsPanel {
            state: &mut tui.settings,
            preferences: app.view.preferences,
            focused: tui.focus == Focus::Main,
        }
        .render(frame, body_area),
        Section::Help => HelpPanel {
            state: &mut tui.help,
        }
        .render(frame, body_area),
    }
}

fn draw_chat(frame: &mut Frame, app: &App, tui: &mut TuiState, area: Rect, frame_index: usize) {
    use Constraint::{Length, Min};
    let input_height = tui.input_box.calculate_height(area.width);
    let [thread_area, input_area, hint_area] =
        Layout::vertical([Min(0), Length(input_height), Length(1)]).areas(area);

    let messages = app.store.messages();
    let typing = app.is_typing();
    if messages.is_empty() && !typing {
        LandingPage::new(app.view.preferences.suggestions).render(frame, thread_area);
    } else {
        MessageList::new(
            &mut tui.message_list,
            messages,
            typing,
            app.view.preferences.compact,
            frame_index,
        )
        .render(frame, thread_area);
    }

    tui.input_box.render(frame, input_area);
    tui.composer_area = Some(input_area);

    frame.render_widget(
        Paragraph::new(Line::styled(INPUT_HINT, Style::default().fg(Color::DarkGray)).centered()),
        hint_area,
    );
}
