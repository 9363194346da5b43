//! # Conversation Controller
//!
//! Owns the transcript, the input buffer and the send state machine.
//!
//! ```text
//!            begin_submit()              resolve(ticket, outcome)
//!   Idle ────────────────────▶ Sending ───────────────────────────▶ Idle
//!    ▲  (appends user message,           (appends agent or error      │
//!    │   clears input)                    message, unless discarded)  │
//!    └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A submit is split into two halves so the event loop can run the network
//! call in the background: `begin_submit` hands out a [`PendingSend`] ticket
//! and `resolve` consumes it. [`Conversation::submit`] glues both halves around
//! an awaited [`AgentBackend::send_message`] for callers that can block.
//!
//! Each ticket remembers the transcript epoch and the position of the user
//! message it answers. `clear()` advances the epoch, so a reply arriving for a
//! cleared message is dropped instead of landing in an unrelated transcript.

use log::{debug, info, warn};
use serde::Serialize;

use crate::api::{AgentBackend, ApiError};
use crate::core::locale::Strings;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Agent,
    Error,
}

/// One transcript entry. Its identity is its index.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::User,
            content: content.into(),
        }
    }

    pub fn agent(content: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Agent,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SendState {
    #[default]
    Idle,
    Sending,
}

/// An outstanding send: the text to deliver and where its answer belongs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    pub text: String,
    epoch: u64,
    user_index: usize,
}

/// What `resolve` did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// An agent message was appended.
    Answered,
    /// An error message was appended.
    Failed,
    /// The user message was cleared meanwhile; nothing was appended.
    Discarded,
    /// No send was outstanding; the outcome was ignored.
    Stale,
}

pub struct Conversation {
    transcript: Vec<Message>,
    input: String,
    state: SendState,
    epoch: u64,
    strings: &'static Strings,
}

impl Conversation {
    pub fn new(strings: &'static Strings) -> Self {
        Self {
            transcript: Vec::new(),
            input: String::new(),
            state: SendState::Idle,
            epoch: 0,
            strings,
        }
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn state(&self) -> SendState {
        self.state
    }

    pub fn is_sending(&self) -> bool {
        self.state == SendState::Sending
    }

    /// True when a submit would start a send cycle.
    pub fn can_submit(&self) -> bool {
        self.state == SendState::Idle && !self.input.trim().is_empty()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn push_str(&mut self, s: &str) {
        self.input.push_str(s);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Copies an example prompt into the input buffer. Allowed in any state.
    pub fn use_example(&mut self, example: &str) {
        debug!("Using example prompt ({} bytes)", example.len());
        self.input = example.to_string();
    }

    /// Empties the transcript. An outstanding send is not cancelled, but its
    /// resolution will be discarded.
    pub fn clear(&mut self) {
        info!(
            "Clearing conversation ({} messages, state={:?})",
            self.transcript.len(),
            self.state
        );
        self.transcript.clear();
        self.epoch += 1;
    }

    /// First half of a submit: validates, echoes the user message and enters
    /// `Sending`. Returns `None` (and changes nothing) when the trimmed input
    /// is empty or a send is already outstanding.
    pub fn begin_submit(&mut self) -> Option<PendingSend> {
        if self.state == SendState::Sending {
            debug!("Submit ignored: a send is already outstanding");
            return None;
        }
        let text = self.input.trim();
        if text.is_empty() {
            debug!("Submit ignored: empty input");
            return None;
        }
        let text = text.to_string();

        self.state = SendState::Sending;
        self.transcript.push(Message::user(text.clone()));
        self.input.clear();

        let pending = PendingSend {
            text,
            epoch: self.epoch,
            user_index: self.transcript.len() - 1,
        };
        info!(
            "Send started (epoch={}, index={})",
            pending.epoch, pending.user_index
        );
        Some(pending)
    }

    /// Second half of a submit: appends exactly one resolution message for
    /// `pending` (if it still has a place in the transcript) and returns to
    /// `Idle`.
    pub fn resolve(
        &mut self,
        pending: PendingSend,
        outcome: Result<String, ApiError>,
    ) -> Resolution {
        if self.state != SendState::Sending {
            warn!("Resolution arrived with no send outstanding; ignoring");
            return Resolution::Stale;
        }
        self.state = SendState::Idle;

        let still_there = pending.epoch == self.epoch
            && self
                .transcript
                .get(pending.user_index)
                .is_some_and(|m| m.kind == MessageKind::User && m.content == pending.text);

        if !still_there {
            match &outcome {
                Ok(_) => info!("Discarding reply: its message was cleared"),
                Err(e) => info!("Discarding failure ({e}): its message was cleared"),
            }
            return Resolution::Discarded;
        }

        match outcome {
            Ok(response) => {
                debug!("Agent reply appended ({} bytes)", response.len());
                self.transcript.push(Message::agent(response));
                Resolution::Answered
            }
            Err(e) => {
                warn!("Send failed: {e}");
                self.transcript.push(Message::error(self.strings.agent_unreachable));
                Resolution::Failed
            }
        }
    }

    /// Full submit cycle against `backend`. A no-op when `begin_submit` refuses.
    pub async fn submit(&mut self, backend: &dyn AgentBackend) -> Option<Resolution> {
        let pending = self.begin_submit()?;
        let outcome = backend.send_message(&pending.text).await;
        Some(self.resolve(pending, outcome))
    }
}
