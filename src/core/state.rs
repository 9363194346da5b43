//! # Application State
//!
//! Core client state. No TUI-specific types live here; presentation state is
//! kept in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn AgentBackend>   // remote agent service
//! ├── locale: Locale                   // selects the fixed-text table
//! ├── status: StatusMonitor            // health probe result
//! ├── examples: ExampleProvider        // example prompts
//! ├── conversation: Conversation       // transcript, input, send state
//! └── started: bool                    // startup fetches already issued
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::api::AgentBackend;
use crate::core::config::ResolvedConfig;
use crate::core::conversation::Conversation;
use crate::core::examples::ExampleProvider;
use crate::core::locale::{Locale, Strings};
use crate::core::status::StatusMonitor;

pub struct App {
    pub backend: Arc<dyn AgentBackend>,
    pub locale: Locale,
    pub status: StatusMonitor,
    pub examples: ExampleProvider,
    pub conversation: Conversation,
    pub started: bool,
}

impl App {
    pub fn new(backend: Arc<dyn AgentBackend>, locale: Locale) -> Self {
        let strings = locale.strings();
        Self {
            backend,
            locale,
            status: StatusMonitor::new(strings),
            examples: ExampleProvider::new(),
            conversation: Conversation::new(strings),
            started: false,
        }
    }

    pub fn from_config(backend: Arc<dyn AgentBackend>, config: &ResolvedConfig) -> Self {
        Self::new(backend, config.locale)
    }

    pub fn strings(&self) -> &'static Strings {
        self.locale.strings()
    }
}
