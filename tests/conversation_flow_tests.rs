use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use parley::core::action::{Action, Effect, NEW_REPLY_STATUS, update};
use parley::core::conversation::{ConversationId, LOADED_PLACEHOLDER, Role};
use parley::core::reply::{DeliveryPolicy, REPLY_PLACEHOLDER, ReplySettings, ReplyTicket, simulate_reply};
use parley::core::state::App;
use parley::core::view::{NavTarget, Preference, Section};

// ============================================================================
// Helper Functions
// ============================================================================

fn app_with(delivery: DeliveryPolicy) -> App {
    App::new(ReplySettings {
        delivery,
        ..Default::default()
    })
}

/// Sends `text` and returns the ticket of the scheduled reply
fn send(app: &mut App, text: &str) -> ReplyTicket {
    match update(app, Action::Send(text.to_string())) {
        Effect::ScheduleReply(ticket) => ticket,
        other => panic!("expected ScheduleReply, got {other:?}"),
    }
}

/// Runs the reply timer to completion the way the TUI does and applies the result.
/// The delay is sampled from a generator seeded with the ticket id.
async fn fire(app: &mut App, ticket: ReplyTicket) -> Effect {
    let mut rng = StdRng::seed_from_u64(ticket.id);
    let delay = app.reply.sample_delay(&mut rng);

    let started = tokio::time::Instant::now();
    let action = simulate_reply(ticket, delay).await;
    let elapsed = started.elapsed();
    assert!(
        app.reply.min_delay <= elapsed && elapsed < app.reply.max_delay,
        "reply took {elapsed:?}"
    );
    update(app, action)
}

// ============================================================================
// Conversation Flow
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_first_message_creates_conversation_and_gets_reply() {
    let mut app = app_with(DeliveryPolicy::Origin);
    assert!(app.store.active().is_none());

    let ticket = send(&mut app, "Plan a team offsite for next spring in Lisbon please");
    let active = app.store.active().expect("conversation created");
    assert_eq!(active.title, "Plan a team offsite for next spring in L");
    assert_eq!(active.date, "Today");
    assert!(app.is_typing());

    let started = tokio::time::Instant::now();
    assert_eq!(fire(&mut app, ticket).await, Effect::ReplyDelivered);
    assert!(started.elapsed() >= Duration::from_millis(1200));

    let messages = app.store.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(messages[1].text, REPLY_PLACEHOLDER);
    assert_eq!(app.status_message, NEW_REPLY_STATUS);
    assert!(!app.is_typing());
}

#[tokio::test(start_paused = true)]
async fn test_follow_up_stays_in_same_conversation() {
    let mut app = app_with(DeliveryPolicy::Origin);
    let first = send(&mut app, "hello");
    fire(&mut app, first).await;
    let id = app.store.active_id();

    let second = send(&mut app, "and another thing");
    assert_eq!(second.conversation, first.conversation);
    fire(&mut app, second).await;

    assert_eq!(app.store.active_id(), id);
    assert_eq!(app.store.messages().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_loaded_conversation_continues() {
    let mut app = app_with(DeliveryPolicy::Origin);
    update(&mut app, Action::LoadConversation(ConversationId(5)));
    assert_eq!(app.store.messages()[1].text, LOADED_PLACEHOLDER);
    assert_eq!(app.store.messages()[0].time, "Feb 20");

    let ticket = send(&mut app, "make it punchier");
    assert_eq!(ticket.conversation, ConversationId(5));
    fire(&mut app, ticket).await;
    assert_eq!(app.store.messages().len(), 4);
    assert_eq!(app.store.active().map(|c| c.title.as_str()), Some("Marketing copy ideas"));
}

// ============================================================================
// Delivery Policy
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_origin_reply_is_dropped_after_switching_threads() {
    let mut app = app_with(DeliveryPolicy::Origin);
    let ticket = send(&mut app, "hello");

    assert_eq!(
        update(&mut app, Action::LoadConversation(ConversationId(1))),
        Effect::CancelReply
    );
    assert!(!app.is_typing());

    // A timer that escaped cancellation must not leak into the new thread
    assert_eq!(fire(&mut app, ticket).await, Effect::None);
    assert_eq!(app.store.messages().len(), 2);
    assert!(app.store.messages().iter().all(|m| m.text != REPLY_PLACEHOLDER));
}

#[tokio::test(start_paused = true)]
async fn test_active_reply_follows_the_user() {
    let mut app = app_with(DeliveryPolicy::Active);
    let ticket = send(&mut app, "hello");

    assert_eq!(update(&mut app, Action::NewConversation), Effect::None);
    assert!(app.is_typing());

    assert_eq!(fire(&mut app, ticket).await, Effect::ReplyDelivered);
    let messages = app.store.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, Role::Assistant);
}

#[tokio::test(start_paused = true)]
async fn test_panels_do_not_cancel_pending_reply() {
    let mut app = app_with(DeliveryPolicy::Origin);
    let ticket = send(&mut app, "hello");

    update(&mut app, Action::Navigate(NavTarget::Settings));
    update(&mut app, Action::Navigate(NavTarget::Help));
    assert_eq!(app.view.section, Section::Help);
    assert!(app.is_typing());

    assert_eq!(fire(&mut app, ticket).await, Effect::ReplyDelivered);
    assert_eq!(app.store.messages().len(), 2);
}

// ============================================================================
// Preferences
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_notifications_off_keeps_status_quiet() {
    let mut app = app_with(DeliveryPolicy::Origin);
    update(&mut app, Action::TogglePreference(Preference::Notifications));
    let ticket = send(&mut app, "hello");
    fire(&mut app, ticket).await;
    assert!(app.status_message.is_empty());
}
