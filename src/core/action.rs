//! # Actions
//!
//! Everything that can happen in Parley becomes an `Action`.
//! User presses Enter? That's `Action::Send(text)`.
//! The reply timer fires? That's `Action::ReplyReady(ticket)`.
//!
//! The `update()` function applies an action to the current state and
//! returns the `Effect` the adapter has to carry out. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use chrono::Local;
use log::{debug, info, warn};

use crate::core::conversation::ConversationId;
use crate::core::reply::{DeliveryPolicy, ReplyTicket};
use crate::core::state::App;
use crate::core::view::{NavTarget, Preference, ViewEvent};

pub const CLEAR_HISTORY_UNAVAILABLE: &str = "Clearing history is not available in this preview";
pub const NEW_REPLY_STATUS: &str = "New reply received";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ToggleSidebar,
    Navigate(NavTarget),
    TogglePreference(Preference),
    NewConversation,
    LoadConversation(ConversationId),
    Send(String),
    ReplyReady(ReplyTicket),
    ClearHistory,
    Quit,
}

/// Side effects requested by `update()`, performed by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Start the latency timer for this ticket.
    ScheduleReply(ReplyTicket),
    /// Drop the running timer, its reply is no longer wanted.
    CancelReply,
    /// A reply was appended to the active thread.
    ReplyDelivered,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::ToggleSidebar => {
            app.view = app.view.transition(ViewEvent::ToggleSidebar);
            Effect::None
        }
        Action::Navigate(target) => {
            app.view = app.view.transition(ViewEvent::Navigate(target));
            Effect::None
        }
        Action::TogglePreference(preference) => {
            app.view = app.view.transition(ViewEvent::TogglePreference(preference));
            Effect::None
        }
        Action::NewConversation => {
            app.store.start_new();
            app.view = app.view.transition(ViewEvent::ShowChat);
            app.status_message.clear();
            cancel_on_navigation(app)
        }
        Action::LoadConversation(id) => {
            if app.store.load(id).is_none() {
                warn!("Ignoring load of unknown conversation {:?}", id);
                return Effect::None;
            }
            app.view = app.view.transition(ViewEvent::ShowChat);
            app.status_message.clear();
            cancel_on_navigation(app)
        }
        Action::Send(text) => {
            if app.pending.is_some() {
                debug!("Send ignored: a reply is still pending");
                return Effect::None;
            }
            let time = Local::now().format("%H:%M").to_string();
            let Some(conversation) = app.store.send(&text, time) else {
                return Effect::None;
            };
            let ticket = app.issue_ticket(conversation);
            app.pending = Some(ticket);
            app.status_message.clear();
            info!("Message sent to {:?}, reply ticket {}", conversation, ticket.id);
            Effect::ScheduleReply(ticket)
        }
        Action::ReplyReady(ticket) => deliver_reply(app, ticket),
        Action::ClearHistory => {
            info!("Clear history requested (not implemented)");
            app.status_message = CLEAR_HISTORY_UNAVAILABLE.to_string();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Under `Origin`, leaving a thread abandons its pending reply.
fn cancel_on_navigation(app: &mut App) -> Effect {
    if app.reply.delivery != DeliveryPolicy::Origin {
        return Effect::None;
    }
    match app.pending.take() {
        Some(ticket) => {
            info!("Cancelled pending reply {}", ticket.id);
            Effect::CancelReply
        }
        None => Effect::None,
    }
}

fn deliver_reply(app: &mut App, ticket: ReplyTicket) -> Effect {
    if app.pending != Some(ticket) {
        debug!("Dropping stale reply {}", ticket.id);
        return Effect::None;
    }
    app.pending = None;

    if app.reply.delivery == DeliveryPolicy::Origin
        && app.store.active_id() != Some(ticket.conversation)
    {
        warn!(
            "Dropping reply {}: {:?} is no longer active",
            ticket.id, ticket.conversation
        );
        return Effect::None;
    }

    let time = Local::now().format("%H:%M").to_string();
    app.store.push_reply(&app.reply.text, time);
    if app.view.preferences.notifications {
        app.status_message = NEW_REPLY_STATUS.to_string();
    }
    Effect::ReplyDelivered
}
