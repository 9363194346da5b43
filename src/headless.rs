//! # Headless Mode
//!
//! One submit cycle without the terminal UI: probe the backend, send one
//! prompt, then print the status and transcript. Drives the same core types
//! as the TUI, awaiting each call in place.

use std::fmt::Write;

use log::info;

use crate::core::conversation::{Message, MessageKind};
use crate::core::locale::Strings;
use crate::core::state::App;
use crate::core::status::StatusSlot;

/// Runs the startup fetches and a single submit of `prompt`.
pub async fn run_once(app: &mut App, prompt: &str) {
    let backend = app.backend.clone();
    info!("Headless run via {} backend", backend.name());

    // Independent of each other; both finish before the send starts
    let (health, examples) = tokio::join!(backend.check_health(), backend.fetch_examples());
    app.status.apply(health);
    app.examples.apply(examples);
    app.started = true;

    app.conversation.set_input(prompt);
    app.conversation.submit(backend.as_ref()).await;
}

/// Plain-text rendering of the server status and the transcript.
pub fn render(app: &App) -> String {
    let strings = app.strings();
    let mut out = String::new();

    match app.status.slot() {
        StatusSlot::Unknown => {
            let _ = writeln!(out, "{}: {}", strings.server_status_title, strings.loading);
        }
        StatusSlot::Known(status) => {
            let state = if status.is_ok() { "ok" } else { "error" };
            let _ = writeln!(
                out,
                "{}: {} ({})",
                strings.server_status_title, state, status.message
            );
            if let Some(agent_id) = &status.agent_id {
                let _ = writeln!(out, "{}: {}", strings.agent_id_label, agent_id);
            }
            if let Some(region) = &status.region {
                let _ = writeln!(out, "{}: {}", strings.region_label, region);
            }
        }
    }

    for message in app.conversation.transcript() {
        let _ = writeln!(out, "\n{}", render_message(message, strings));
    }
    out
}

fn render_message(message: &Message, strings: &Strings) -> String {
    let label = match message.kind {
        MessageKind::User => strings.user_label,
        MessageKind::Agent => strings.agent_label,
        MessageKind::Error => strings.error_label,
    };
    format!("{}: {}", label, message.content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::api::{ApiError, HealthState, ServerStatus};
    use crate::core::locale::{EN, Locale};
    use crate::test_support::ScriptedBackend;

    #[tokio::test]
    async fn test_run_once_success() {
        let backend = ScriptedBackend::new()
            .with_health(Ok(ServerStatus {
                status: HealthState::Ok,
                message: "ready".to_string(),
                agent_id: Some("abc123".to_string()),
                region: Some("us-east-1".to_string()),
            }))
            .with_reply(Ok("Hi there!".to_string()));
        let mut app = App::new(Arc::new(backend), Locale::En);

        run_once(&mut app, "  Hello ").await;
        let text = render(&app);
        assert_eq!(
            text,
            concat!(
                "Server Status: ok (ready)\nAgent ID: abc123\nRegion: us-east-1\n",
                "\nYou: Hello\n",
                "\nAgent: Hi there!\n"
            )
        );
    }

    #[tokio::test]
    async fn test_run_once_with_unreachable_server() {
        let backend = ScriptedBackend::new()
            .with_health(Err(ApiError::Network("refused".to_string())))
            .with_examples(Err(ApiError::Network("refused".to_string())))
            .with_reply(Err(ApiError::Network("refused".to_string())));
        let mut app = App::new(Arc::new(backend), Locale::En);

        run_once(&mut app, "Hello").await;
        let text = render(&app);
        assert!(text.starts_with("Server Status: error (Cannot connect to server)"));
        assert!(text.ends_with(&format!("Error: {}\n", EN.agent_unreachable)));
        assert!(!text.contains("refused"));
    }

    #[test]
    fn test_render_before_probe() {
        let app = crate::test_support::test_app();
        assert_eq!(render(&app), "Server Status: Loading...\n");
    }
}
