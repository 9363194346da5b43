use async_trait::async_trait;

use super::error::ApiError;
use super::types::ServerStatus;

/// The remote agent service, as seen by the client core.
///
/// One network call per invocation. No retries, no caching.
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// Returns a short name for logging.
    fn name(&self) -> &str;

    /// Probes backend availability.
    async fn check_health(&self) -> Result<ServerStatus, ApiError>;

    /// Fetches the example prompts, in display order.
    async fn fetch_examples(&self) -> Result<Vec<String>, ApiError>;

    /// Sends one user message and returns the agent's reply text.
    async fn send_message(&self, text: &str) -> Result<String, ApiError>;
}
