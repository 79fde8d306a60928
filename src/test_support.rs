//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::reply::{DeliveryPolicy, ReplySettings};
use crate::core::state::App;

/// Creates a test App with default reply settings.
pub fn test_app() -> App {
    App::default()
}

/// Creates a test App with the given delivery policy.
pub fn test_app_with_policy(delivery: DeliveryPolicy) -> App {
    App::new(ReplySettings {
        delivery,
        ..Default::default()
    })
}

/// Flattens a ratatui test buffer into a single string of symbols.
pub fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect()
}
