//! # Agent API
//!
//! Typed access to the agent backend's three REST endpoints:
//!
//! ```text
//! GET  /health    → ServerStatus
//! GET  /examples  → { examples: [..] }
//! POST /chat      → { response: ".." }
//! ```
//!
//! The core talks to the backend only through the [`AgentBackend`] trait, so
//! tests can swap the HTTP client for a scripted one.

pub mod backend;
pub mod client;
pub mod error;
pub mod types;

pub use backend::AgentBackend;
pub use client::{DEFAULT_BASE_URL, HttpAgentClient};
pub use error::ApiError;
pub use types::{ChatRequest, ChatResponse, ExamplesResponse, HealthState, ServerStatus};
