//! # Example Provider
//!
//! The example prompts fetched once at startup. A failed fetch leaves the list
//! empty and is only logged.

use log::{info, warn};

use crate::api::{AgentBackend, ApiError};

#[derive(Debug, Default)]
pub struct ExampleProvider {
    examples: Vec<String>,
    loaded: bool,
}

impl ExampleProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.examples.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Stores the fetch outcome, keeping order. Only the first outcome counts.
    pub fn apply(&mut self, outcome: Result<Vec<String>, ApiError>) {
        if self.loaded {
            warn!("Examples arrived twice; ignoring the second result");
            return;
        }
        self.loaded = true;
        match outcome {
            Ok(examples) => {
                info!("Loaded {} example prompts", examples.len());
                self.examples = examples;
            }
            Err(e) => warn!("Failed to load examples: {e}"),
        }
    }

    /// Fetches the examples from `backend` and stores them.
    pub async fn load(&mut self, backend: &dyn AgentBackend) {
        let outcome = backend.fetch_examples().await;
        self.apply(outcome);
    }
}
