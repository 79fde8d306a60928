//! # View Controller
//!
//! Which top-level section is shown, whether the sidebar is expanded, and the
//! four preference switches. Every change goes through
//! [`ViewState::transition`], a pure `(state, event) -> state` function.

/// Mutually exclusive top-level views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Chat,
    Settings,
    Help,
}

/// Sidebar navigation entries that open a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Settings,
    Help,
}

impl Section {
    /// Nav entries act as show/hide switches for their own section.
    ///
    /// | current  | target   | next     |
    /// |----------|----------|----------|
    /// | Settings | Settings | Chat     |
    /// | Help     | Help     | Chat     |
    /// | *        | Settings | Settings |
    /// | *        | Help     | Help     |
    pub fn navigate(self, target: NavTarget) -> Section {
        match (self, target) {
            (Section::Settings, NavTarget::Settings) => Section::Chat,
            (Section::Help, NavTarget::Help) => Section::Chat,
            (_, NavTarget::Settings) => Section::Settings,
            (_, NavTarget::Help) => Section::Help,
        }
    }

    /// Whether the nav entry for `target` should render as active.
    pub fn is_target(self, target: NavTarget) -> bool {
        matches!(
            (self, target),
            (Section::Settings, NavTarget::Settings) | (Section::Help, NavTarget::Help)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    Notifications,
    Sounds,
    Compact,
    Suggestions,
}

impl Preference {
    pub fn label(self) -> &'static str {
        match self {
            Preference::Compact => "Compact mode",
            Preference::Suggestions => "Show suggestions",
            Preference::Notifications => "Enable notifications",
            Preference::Sounds => "Sound effects",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Preference::Compact => "Reduce spacing between messages",
            Preference::Suggestions => "Show prompt suggestions on new chats",
            Preference::Notifications => "Get notified when responses arrive",
            Preference::Sounds => "Play a sound on message send/receive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub notifications: bool,
    pub sounds: bool,
    pub compact: bool,
    pub suggestions: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            notifications: true,
            sounds: false,
            compact: false,
            suggestions: true,
        }
    }
}

impl Preferences {
    pub fn get(&self, preference: Preference) -> bool {
        match preference {
            Preference::Notifications => self.notifications,
            Preference::Sounds => self.sounds,
            Preference::Compact => self.compact,
            Preference::Suggestions => self.suggestions,
        }
    }

    pub fn toggle(mut self, preference: Preference) -> Self {
        let flag = match preference {
            Preference::Notifications => &mut self.notifications,
            Preference::Sounds => &mut self.sounds,
            Preference::Compact => &mut self.compact,
            Preference::Suggestions => &mut self.suggestions,
        };
        *flag = !*flag;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    ToggleSidebar,
    Navigate(NavTarget),
    ShowChat,
    TogglePreference(Preference),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub sidebar_open: bool,
    pub section: Section,
    pub preferences: Preferences,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            sidebar_open: true,
            section: Section::Chat,
            preferences: Preferences::default(),
        }
    }
}

impl ViewState {
    pub fn transition(self, event: ViewEvent) -> ViewState {
        match event {
            ViewEvent::ToggleSidebar => ViewState {
                sidebar_open: !self.sidebar_open,
                ..self
            },
            ViewEvent::Navigate(target) => ViewState {
                section: self.section.navigate(target),
                ..self
            },
            ViewEvent::ShowChat => ViewState {
                section: Section::Chat,
                ..self
            },
            ViewEvent::TogglePreference(preference) => ViewState {
                preferences: self.preferences.toggle(preference),
                ..self
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Preference; 4] = [
        Preference::Notifications,
        Preference::Sounds,
        Preference::Compact,
        Preference::Suggestions,
    ];

    #[test]
    fn defaults_match_initial_screen() {
        let view = ViewState::default();
        assert!(view.sidebar_open);
        assert_eq!(view.section, Section::Chat);
        assert!(view.preferences.notifications);
        assert!(!view.preferences.sounds);
        assert!(!view.preferences.compact);
        assert!(view.preferences.suggestions);
    }

    #[test]
    fn clicking_settings_twice_returns_to_chat() {
        let view = ViewState::default()
            .transition(ViewEvent::Navigate(NavTarget::Settings));
        assert_eq!(view.section, Section::Settings);
        let view = view.transition(ViewEvent::Navigate(NavTarget::Settings));
        assert_eq!(view.section, Section::Chat);
    }

    #[test]
    fn settings_then_help_switches_directly() {
        let view = ViewState::default()
            .transition(ViewEvent::Navigate(NavTarget::Settings))
            .transition(ViewEvent::Navigate(NavTarget::Help));
        assert_eq!(view.section, Section::Help);
        assert_eq!(Section::Help.navigate(NavTarget::Settings), Section::Settings);
    }

    #[test]
    fn transition_table_is_total() {
        for section in [Section::Chat, Section::Settings, Section::Help] {
            for target in [NavTarget::Settings, NavTarget::Help] {
                let next = section.navigate(target);
                if section.is_target(target) {
                    assert_eq!(next, Section::Chat);
                } else {
                    assert!(next.is_target(target));
                }
            }
        }
    }

    #[test]
    fn show_chat_forces_chat() {
        let view = ViewState::default()
            .transition(ViewEvent::Navigate(NavTarget::Help))
            .transition(ViewEvent::ShowChat);
        assert_eq!(view.section, Section::Chat);
    }

    #[test]
    fn toggle_sidebar_flips_only_sidebar() {
        let before = ViewState::default();
        let after = before.transition(ViewEvent::ToggleSidebar);
        assert!(!after.sidebar_open);
        assert_eq!(after.section, before.section);
        assert_eq!(after.preferences, before.preferences);
        assert!(after.transition(ViewEvent::ToggleSidebar).sidebar_open);
    }

    #[test]
    fn toggling_a_preference_leaves_the_others() {
        for target in ALL {
            let before = Preferences::default();
            let after = before.toggle(target);
            for other in ALL {
                if other == target {
                    assert_ne!(after.get(other), before.get(other), "{other:?} should flip");
                } else {
                    assert_eq!(after.get(other), before.get(other), "{other:?} should not change");
                }
            }
        }
    }
}
