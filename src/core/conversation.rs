//! # Conversation Store
//!
//! In-memory conversation history and the active thread.
//!
//! ```text
//! ConversationStore
//! ├── history: Vec<Conversation>      // static seed list, never mutated
//! ├── active: Option<Conversation>    // thread shown in the chat section
//! ├── messages: Vec<Message>          // messages of the active thread
//! └── last_id: u64                    // time-based id generator
//! ```
//!
//! Nothing here is persisted. A conversation created by sending a message
//! lives only as `active` and is not added to `history`.

use chrono::Utc;

/// Maximum title length (in characters) for conversations created on send.
pub const TITLE_MAX_CHARS: usize = 40;

/// Date label used for conversations created during this session.
pub const TODAY_LABEL: &str = "Today";

/// Assistant text shown when opening a conversation from the history.
pub const LOADED_PLACEHOLDER: &str = "Sure! Here's what I found regarding that topic. \
    This is a placeholder, connect your backend to load real conversation history.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConversationId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: ConversationId,
    pub title: String,
    /// Display grouping label ("Today", "Yesterday", "Feb 20"), not a real date.
    pub date: String,
}

impl Conversation {
    fn seed(id: u64, title: &str, date: &str) -> Self {
        Self {
            id: ConversationId(id),
            title: title.to_string(),
            date: date.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub text: String,
    /// Preformatted display timestamp.
    pub time: String,
}

/// The static sidebar history, in display order.
pub fn sample_history() -> Vec<Conversation> {
    vec![
        Conversation::seed(1, "Project brainstorming session", "Today"),
        Conversation::seed(2, "Help with quarterly report", "Today"),
        Conversation::seed(3, "Python script for data parsing", "Yesterday"),
        Conversation::seed(4, "Email draft to stakeholders", "Yesterday"),
        Conversation::seed(5, "Marketing copy ideas", "Feb 20"),
        Conversation::seed(6, "API integration questions", "Feb 19"),
    ]
}

/// Conversations sharing one date label.
#[derive(Debug, PartialEq, Eq)]
pub struct DateGroup<'a> {
    pub label: &'a str,
    pub conversations: Vec<&'a Conversation>,
}

/// Group conversations by their `date` label.
///
/// Groups appear in the order their label is first seen and keep the
/// insertion order of their members. Labels are never parsed or sorted.
pub fn group_by_date(conversations: &[Conversation]) -> Vec<DateGroup<'_>> {
    let mut groups: Vec<DateGroup<'_>> = Vec::new();
    for conversation in conversations {
        match groups.iter_mut().find(|g| g.label == conversation.date) {
            Some(group) => group.conversations.push(conversation),
            None => groups.push(DateGroup {
                label: &conversation.date,
                conversations: vec![conversation],
            }),
        }
    }
    groups
}

/// First `TITLE_MAX_CHARS` characters of `text`.
pub fn derive_title(text: &str) -> String {
    text.chars().take(TITLE_MAX_CHARS).collect()
}

pub struct ConversationStore {
    history: Vec<Conversation>,
    active: Option<Conversation>,
    messages: Vec<Message>,
    last_id: u64,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(sample_history())
    }
}

impl ConversationStore {
    pub fn new(history: Vec<Conversation>) -> Self {
        Self {
            history,
            active: None,
            messages: Vec::new(),
            last_id: 0,
        }
    }

    pub fn list_conversations(&self) -> &[Conversation] {
        &self.history
    }

    pub fn grouped(&self) -> Vec<DateGroup<'_>> {
        group_by_date(&self.history)
    }

    pub fn active(&self) -> Option<&Conversation> {
        self.active.as_ref()
    }

    pub fn active_id(&self) -> Option<ConversationId> {
        self.active.as_ref().map(|c| c.id)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Open a history entry with its two synthetic messages.
    ///
    /// Returns `None` (and changes nothing) if `id` is not in the history.
    pub fn load(&mut self, id: ConversationId) -> Option<&Conversation> {
        let conversation = self.history.iter().find(|c| c.id == id)?.clone();

        let user = self.make_message(Role::User, conversation.title.clone(), conversation.date.clone());
        let assistant = self.make_message(
            Role::Assistant,
            LOADED_PLACEHOLDER.to_string(),
            conversation.date.clone(),
        );
        self.messages = vec![user, assistant];
        self.active = Some(conversation);
        self.active.as_ref()
    }

    pub fn start_new(&mut self) {
        self.active = None;
        self.messages.clear();
    }

    /// Append a user message, creating the active conversation if needed.
    ///
    /// Returns the id of the conversation the message landed in, or `None`
    /// if `text` is blank.
    pub fn send(&mut self, text: &str, time: String) -> Option<ConversationId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if self.active.is_none() {
            let id = ConversationId(self.next_id());
            self.active = Some(Conversation {
                id,
                title: derive_title(text),
                date: TODAY_LABEL.to_string(),
            });
        }

        let message = self.make_message(Role::User, text.to_string(), time);
        self.messages.push(message);
        self.active_id()
    }

    /// Append an assistant message to the active thread.
    pub fn push_reply(&mut self, text: &str, time: String) {
        let message = self.make_message(Role::Assistant, text.to_string(), time);
        self.messages.push(message);
    }

    fn make_message(&mut self, role: Role, text: String, time: String) -> Message {
        Message {
            id: MessageId(self.next_id()),
            role,
            text,
            time,
        }
    }

    /// Millisecond clock, bumped so ids stay unique within a burst.
    fn next_id(&mut self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.last_id = now.max(self.last_id + 1);
        self.last_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels<'a>(groups: &[DateGroup<'a>]) -> Vec<&'a str> {
        groups.iter().map(|g| g.label).collect()
    }

    #[test]
    fn seed_history_groups_in_insertion_order() {
        let history = sample_history();
        let groups = group_by_date(&history);

        assert_eq!(labels(&groups), vec!["Today", "Yesterday", "Feb 20", "Feb 19"]);
        let sizes: Vec<usize> = groups.iter().map(|g| g.conversations.len()).collect();
        assert_eq!(sizes, vec![2, 2, 1, 1]);
        assert_eq!(groups[0].conversations[0].title, "Project brainstorming session");
        assert_eq!(groups[0].conversations[1].title, "Help with quarterly report");
    }

    #[test]
    fn grouping_does_not_sort_labels() {
        let history = vec![
            Conversation::seed(1, "a", "Feb 19"),
            Conversation::seed(2, "b", "Today"),
            Conversation::seed(3, "c", "Feb 19"),
        ];
        let groups = group_by_date(&history);
        assert_eq!(labels(&groups), vec!["Feb 19", "Today"]);
        let ids: Vec<u64> = groups[0].conversations.iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn load_yields_user_then_assistant_stamped_with_date() {
        let mut store = ConversationStore::default();
        store.load(ConversationId(3)).expect("seed exists");

        let messages = store.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].text, "Python script for data parsing");
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].text, LOADED_PLACEHOLDER);
        assert!(messages.iter().all(|m| m.time == "Yesterday"));
        assert_eq!(store.active_id(), Some(ConversationId(3)));
    }

    #[test]
    fn load_replaces_previous_thread() {
        let mut store = ConversationStore::default();
        store.send("hello", "10:00".into());
        store.send("again", "10:01".into());
        store.load(ConversationId(1));
        assert_eq!(store.messages().len(), 2);
    }

    #[test]
    fn load_unknown_id_changes_nothing() {
        let mut store = ConversationStore::default();
        store.load(ConversationId(2));
        assert!(store.load(ConversationId(999)).is_none());
        assert_eq!(store.active_id(), Some(ConversationId(2)));
        assert_eq!(store.messages().len(), 2);
    }

    #[test]
    fn blank_send_is_a_no_op() {
        let mut store = ConversationStore::default();
        assert_eq!(store.send("", "10:00".into()), None);
        assert_eq!(store.send("   \n\t", "10:00".into()), None);
        assert!(store.messages().is_empty());
        assert!(store.active().is_none());
    }

    #[test]
    fn first_send_creates_conversation_with_truncated_title() {
        let mut store = ConversationStore::default();
        let id = store
            .send("Plan my trip to Japan for two weeks in the spring ", "10:00".into())
            .expect("accepted");

        let active = store.active().expect("active conversation");
        assert_eq!(active.id, id);
        assert_eq!(active.title, "Plan my trip to Japan for two weeks in t");
        assert_eq!(active.title.chars().count(), TITLE_MAX_CHARS);
        assert_eq!(active.date, TODAY_LABEL);
        assert_eq!(store.messages()[0].text, "Plan my trip to Japan for two weeks in the spring");
        // Not added to the sidebar history
        assert_eq!(store.list_conversations().len(), 6);
    }

    #[test]
    fn send_into_loaded_conversation_keeps_it() {
        let mut store = ConversationStore::default();
        store.load(ConversationId(5));
        let id = store.send("more ideas please", "09:30".into());
        assert_eq!(id, Some(ConversationId(5)));
        assert_eq!(store.messages().len(), 3);
        assert_eq!(store.messages()[2].role, Role::User);
    }

    #[test]
    fn derive_title_respects_char_boundaries() {
        let text = "é".repeat(50);
        let title = derive_title(&text);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS);
        assert_eq!(derive_title("short"), "short");
    }

    #[test]
    fn start_new_clears_thread_but_not_history() {
        let mut store = ConversationStore::default();
        store.load(ConversationId(1));
        store.start_new();
        assert!(store.active().is_none());
        assert!(store.messages().is_empty());
        assert_eq!(store.list_conversations().len(), 6);
    }

    #[test]
    fn message_ids_are_strictly_increasing() {
        let mut store = ConversationStore::default();
        for i in 0..5 {
            store.send(&format!("msg {i}"), "10:00".into());
        }
        let ids: Vec<u64> = store.messages().iter().map(|m| m.id.0).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}
