//! # Actions
//!
//! Everything that can happen in Parley becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! The backend answers? That's `Action::ResponseReceived { .. }`.
//!
//! `update()` applies an action to the state and returns an `Effect` telling
//! the caller which I/O to start. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::debug;

use crate::api::{ApiError, ServerStatus};
use crate::core::conversation::PendingSend;
use crate::core::state::App;

#[derive(Debug)]
pub enum Action {
    /// Issue the one-shot health probe and example fetch.
    Startup,
    InputChar(char),
    Paste(String),
    Backspace,
    Submit,
    /// Copy the example at this index into the input buffer.
    UseExample(usize),
    Clear,
    HealthChecked(Result<ServerStatus, ApiError>),
    ExamplesLoaded(Result<Vec<String>, ApiError>),
    ResponseReceived {
        pending: PendingSend,
        outcome: Result<String, ApiError>,
    },
    Quit,
}

/// I/O the caller must perform after an update.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    /// Run the health probe and the example fetch, independently.
    FetchStartup,
    /// Send this message to the agent and report back with `ResponseReceived`.
    SpawnSend(PendingSend),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Startup => {
            if app.started {
                return Effect::None;
            }
            app.started = true;
            Effect::FetchStartup
        }
        Action::InputChar(c) => {
            app.conversation.push_char(c);
            Effect::None
        }
        Action::Paste(text) => {
            // The input box is a single line; a line break would be sent unseen
            let flattened = text.replace("\r\n", " ").replace(['\r', '\n'], " ");
            app.conversation.push_str(&flattened);
            Effect::None
        }
        Action::Backspace => {
            app.conversation.backspace();
            Effect::None
        }
        Action::Submit => match app.conversation.begin_submit() {
            Some(pending) => Effect::SpawnSend(pending),
            None => Effect::None,
        },
        Action::UseExample(index) => {
            if let Some(example) = app.examples.get(index) {
                let example = example.to_string();
                app.conversation.use_example(&example);
            }
            Effect::None
        }
        Action::Clear => {
            app.conversation.clear();
            Effect::None
        }
        Action::HealthChecked(outcome) => {
            app.status.apply(outcome);
            Effect::None
        }
        Action::ExamplesLoaded(outcome) => {
            app.examples.apply(outcome);
            Effect::None
        }
        Action::ResponseReceived { pending, outcome } => {
            app.conversation.resolve(pending, outcome);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
