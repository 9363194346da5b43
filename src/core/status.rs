//! # Status Monitor
//!
//! Holds the result of the one-shot health probe. Until the probe lands the
//! status is [`StatusSlot::Unknown`], which the UI shows as a loading state.

use log::{info, warn};

use crate::api::{AgentBackend, ApiError, ServerStatus};
use crate::core::locale::Strings;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum StatusSlot {
    #[default]
    Unknown,
    Known(ServerStatus),
}

pub struct StatusMonitor {
    slot: StatusSlot,
    strings: &'static Strings,
}

impl StatusMonitor {
    pub fn new(strings: &'static Strings) -> Self {
        Self {
            slot: StatusSlot::Unknown,
            strings,
        }
    }

    pub fn slot(&self) -> &StatusSlot {
        &self.slot
    }

    pub fn status(&self) -> Option<&ServerStatus> {
        match &self.slot {
            StatusSlot::Known(status) => Some(status),
            StatusSlot::Unknown => None,
        }
    }

    /// Stores the probe outcome. Failures become a degraded status with the
    /// fixed "server unreachable" text. Only the first outcome is kept.
    pub fn apply(&mut self, outcome: Result<ServerStatus, ApiError>) {
        if let StatusSlot::Known(_) = self.slot {
            warn!("Health result arrived after status was already set; ignoring");
            return;
        }
        let status = match outcome {
            Ok(status) => {
                info!(
                    "Server status: {:?} ({}), agent_id={:?}, region={:?}",
                    status.status, status.message, status.agent_id, status.region
                );
                status
            }
            Err(e) => {
                warn!("Health probe failed: {e}");
                ServerStatus::error(self.strings.server_unreachable)
            }
        };
        self.slot = StatusSlot::Known(status);
    }

    /// Runs the probe against `backend` and stores the outcome.
    pub async fn probe(&mut self, backend: &dyn AgentBackend) {
        let outcome = backend.check_health().await;
        self.apply(outcome);
    }
}
