//! # Core Application Logic
//!
//! This module contains Parley's client logic.
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
//!                    └───────────┬─────────────┘
//!                                │
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌────────────┐                ┌────────────┐
//!          │    TUI     │                │  Headless  │
//!          │  Adapter   │                │  (--prompt)│
//!          │ (ratatui)  │                │            │
//!          └────────────┘                └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct — all client state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`conversation`]: Transcript and the send state machine
//! - [`status`]: Health probe result
//! - [`examples`]: Example prompts
//! - [`locale`]: Fixed texts per language
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod conversation;
pub mod examples;
pub mod locale;
pub mod state;
pub mod status;
