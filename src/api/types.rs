use serde::{Deserialize, Serialize};

/// Reported health of the agent backend.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Ok,
    Error,
}

/// Body of `GET /health`, or a synthesized stand-in when the probe fails.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ServerStatus {
    pub status: HealthState,
    pub message: String,
    /// The backend sends `agent_id`; `agentId` is accepted too.
    #[serde(
        rename = "agentId",
        alias = "agent_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub agent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl ServerStatus {
    /// A degraded status carrying only a human-readable message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: HealthState::Error,
            message: message.into(),
            agent_id: None,
            region: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == HealthState::Ok
    }
}

/// Body of `GET /examples`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExamplesResponse {
    pub examples: Vec<String>,
}

/// Body of `POST /chat`.
#[derive(Serialize, Debug)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Reply to `POST /chat`.
#[derive(Deserialize, Debug)]
pub struct ChatResponse {
    pub response: String,
}
