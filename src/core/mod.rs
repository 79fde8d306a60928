//! # Core Application Logic
//!
//! This module contains Parley's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No terminal. No I/O.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`view`]: Section transitions, sidebar visibility, preferences
//! - [`conversation`]: Seed history, active thread, date grouping
//! - [`reply`]: The simulated assistant reply and its delivery policy
//! - [`config`]: Config file, env and CLI resolution

pub mod action;
pub mod config;
pub mod conversation;
pub mod reply;
pub mod state;
pub mod view;
