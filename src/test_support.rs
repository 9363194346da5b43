//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::{AgentBackend, ApiError, HealthState, ServerStatus};
use crate::core::locale::Locale;
use crate::core::state::App;

/// A backend that answers from a script instead of the network.
///
/// Replies are consumed in order; once the script runs out every send fails
/// with a network error.
pub struct ScriptedBackend {
    health: Mutex<Option<Result<ServerStatus, ApiError>>>,
    examples: Mutex<Option<Result<Vec<String>, ApiError>>>,
    replies: Mutex<VecDeque<Result<String, ApiError>>>,
    sent: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            health: Mutex::new(None),
            examples: Mutex::new(None),
            replies: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn with_health(self, health: Result<ServerStatus, ApiError>) -> Self {
        *self.health.lock().unwrap() = Some(health);
        self
    }

    pub fn with_examples(self, examples: Result<Vec<String>, ApiError>) -> Self {
        *self.examples.lock().unwrap() = Some(examples);
        self
    }

    pub fn with_reply(self, reply: Result<String, ApiError>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    /// Texts passed to `send_message`, in call order.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn check_health(&self) -> Result<ServerStatus, ApiError> {
        self.health.lock().unwrap().clone().unwrap_or(Ok(ServerStatus {
            status: HealthState::Ok,
            message: "ready".to_string(),
            agent_id: None,
            region: None,
        }))
    }

    async fn fetch_examples(&self) -> Result<Vec<String>, ApiError> {
        self.examples.lock().unwrap().clone().unwrap_or(Ok(Vec::new()))
    }

    async fn send_message(&self, text: &str) -> Result<String, ApiError> {
        self.sent.lock().unwrap().push(text.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("script exhausted".to_string())))
    }
}

/// Creates a test App with an empty ScriptedBackend.
pub fn test_app() -> App {
    App::new(Arc::new(ScriptedBackend::new()), Locale::En)
}
