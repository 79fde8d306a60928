//! # Reply Simulator
//!
//! Stands in for a backend: every accepted message is answered with a fixed
//! placeholder after a randomized delay.
//!
//! ```text
//! Idle ──(accepted send)──▶ Pending(ticket) ──(ReplyReady(ticket))──▶ Idle
//! ```
//!
//! The reducer hands out a [`ReplyTicket`] and the TUI adapter turns it into
//! a timer task via [`simulate_reply`]. Which thread the reply lands in is
//! governed by [`DeliveryPolicy`].

use std::ops::Range;
use std::time::Duration;

use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::action::Action;
use crate::core::conversation::ConversationId;

pub const DEFAULT_MIN_DELAY_MS: u64 = 1200;
pub const DEFAULT_MAX_DELAY_MS: u64 = 1800;

pub const REPLY_PLACEHOLDER: &str = "Thanks for your message! This is a placeholder response. \
    Connect me to your backend to get real AI responses.";

/// Where a reply goes if the user navigates while it is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryPolicy {
    /// Bound to the conversation it was sent from; navigating away cancels it.
    #[default]
    Origin,
    /// Appended to whichever thread is active when the timer fires.
    Active,
}

impl DeliveryPolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "origin" => Some(DeliveryPolicy::Origin),
            "active" => Some(DeliveryPolicy::Active),
            _ => None,
        }
    }
}

/// Identifies one pending reply and the conversation it was sent from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyTicket {
    pub id: u64,
    pub conversation: ConversationId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplySettings {
    /// Lower bound of the simulated latency (inclusive).
    pub min_delay: Duration,
    /// Upper bound of the simulated latency (exclusive).
    pub max_delay: Duration,
    pub delivery: DeliveryPolicy,
    pub text: String,
}

impl Default for ReplySettings {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(DEFAULT_MIN_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
            delivery: DeliveryPolicy::default(),
            text: REPLY_PLACEHOLDER.to_string(),
        }
    }
}

impl ReplySettings {
    fn delay_range_ms(&self) -> Range<u64> {
        let min = self.min_delay.as_millis() as u64;
        let max = (self.max_delay.as_millis() as u64).max(min + 1);
        min..max
    }

    /// Sample a latency uniformly from `[min_delay, max_delay)`.
    pub fn sample_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        Duration::from_millis(rng.gen_range(self.delay_range_ms()))
    }
}

/// Wait out the simulated latency, then produce the action that delivers the reply.
pub async fn simulate_reply(ticket: ReplyTicket, delay: Duration) -> Action {
    tokio::time::sleep(delay).await;
    Action::ReplyReady(ticket)
}
