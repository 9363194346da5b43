//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! All state lives on the loop thread. Network calls run as tokio tasks and
//! report back through an `mpsc` channel as `Action`s, which are applied with
//! `update()` one at a time between input polls.

mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::api::{AgentBackend, HttpAgentClient};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::conversation::PendingSend;
use crate::core::state::App;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core client logic)
pub struct TuiState {
    /// Highlighted entry in the example list
    pub selected_example: usize,
    /// First transcript row shown; clamped on every draw
    pub scroll_offset: usize,
    /// Transcript rows visible at the last draw
    pub viewport_height: u16,
    /// Follow new messages until the user scrolls up
    pub stick_to_bottom: bool,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            selected_example: 0,
            scroll_offset: 0,
            viewport_height: 0,
            stick_to_bottom: true,
        }
    }

    fn page(&self) -> usize {
        usize::from(self.viewport_height.max(1))
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Translates a TUI event into a core action, handling TUI-local events in place.
/// Returns `None` for events that don't reach the core.
fn dispatch(event: TuiEvent, app: &App, tui: &mut TuiState) -> Option<Action> {
    let sending = app.conversation.is_sending();
    match event {
        TuiEvent::Quit => Some(Action::Quit),
        TuiEvent::Submit => Some(Action::Submit),
        TuiEvent::ClearConversation => {
            tui.stick_to_bottom = true;
            tui.scroll_offset = 0;
            Some(Action::Clear)
        }
        // The input box is disabled while a send is outstanding
        TuiEvent::InputChar(_) | TuiEvent::Paste(_) | TuiEvent::Backspace if sending => None,
        TuiEvent::InputChar(c) => Some(Action::InputChar(c)),
        TuiEvent::Paste(text) => Some(Action::Paste(text)),
        TuiEvent::Backspace => Some(Action::Backspace),
        TuiEvent::UseExample => {
            (!app.examples.is_empty()).then_some(Action::UseExample(tui.selected_example))
        }
        TuiEvent::ExamplePrev => {
            tui.selected_example = tui.selected_example.saturating_sub(1);
            None
        }
        TuiEvent::ExampleNext => {
            if tui.selected_example + 1 < app.examples.len() {
                tui.selected_example += 1;
            }
            None
        }
        TuiEvent::ScrollUp => {
            tui.stick_to_bottom = false;
            tui.scroll_offset = tui.scroll_offset.saturating_sub(1);
            None
        }
        TuiEvent::ScrollDown => {
            tui.scroll_offset = tui.scroll_offset.saturating_add(1);
            None
        }
        TuiEvent::ScrollPageUp => {
            tui.stick_to_bottom = false;
            tui.scroll_offset = tui.scroll_offset.saturating_sub(tui.page());
            None
        }
        TuiEvent::ScrollPageDown => {
            tui.scroll_offset = tui.scroll_offset.saturating_add(tui.page());
            None
        }
        TuiEvent::ScrollToBottom => {
            tui.stick_to_bottom = true;
            None
        }
        TuiEvent::Resize => None,
    }
}

/// Performs the I/O an update asked for. Returns true when the app should quit.
fn run_effect(effect: Effect, app: &App, tui: &mut TuiState, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::FetchStartup => {
            spawn_startup(app.backend.clone(), tx.clone());
            false
        }
        Effect::SpawnSend(pending) => {
            tui.stick_to_bottom = true;
            spawn_send(app.backend.clone(), pending, tx.clone());
            false
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    info!("Using agent backend at {}", config.base_url);
    let backend: Arc<dyn AgentBackend> = Arc::new(HttpAgentClient::new(config.base_url.clone()));
    let mut app = App::from_config(backend, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let effect = update(&mut app, Action::Startup);
    run_effect(effect, &app, &mut tui, &tx);

    let mut needs_redraw = true;
    let mut should_quit = false;

    while !should_quit {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Poll briefly so background results show up promptly
        let first_event = poll_event_timeout(Duration::from_millis(100));
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            needs_redraw = true;
            if let Some(action) = dispatch(event, &app, &mut tui) {
                let effect = update(&mut app, action);
                if run_effect(effect, &app, &mut tui, &tx) {
                    should_quit = true;
                    break;
                }
            }
        }

        // Handle background task actions
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if run_effect(effect, &app, &mut tui, &tx) {
                should_quit = true;
            }
        }
    }

    ratatui::restore();
    info!("Parley shutting down");
    Ok(())
}

/// Fires the health probe and the example fetch as two independent tasks.
fn spawn_startup(backend: Arc<dyn AgentBackend>, tx: mpsc::Sender<Action>) {
    info!("Spawning startup fetches via {} backend", backend.name());

    let health_backend = backend.clone();
    let health_tx = tx.clone();
    tokio::spawn(async move {
        let outcome = health_backend.check_health().await;
        if health_tx.send(Action::HealthChecked(outcome)).is_err() {
            warn!("Failed to deliver health result: receiver dropped");
        }
    });

    tokio::spawn(async move {
        let outcome = backend.fetch_examples().await;
        if tx.send(Action::ExamplesLoaded(outcome)).is_err() {
            warn!("Failed to deliver examples: receiver dropped");
        }
    });
}

fn spawn_send(backend: Arc<dyn AgentBackend>, pending: PendingSend, tx: mpsc::Sender<Action>) {
    info!("Spawning send request ({} bytes)", pending.text.len());
    tokio::spawn(async move {
        let outcome = backend.send_message(&pending.text).await;
        if tx.send(Action::ResponseReceived { pending, outcome }).is_err() {
            warn!("Failed to deliver agent response: receiver dropped");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::locale::Locale;
    use crate::core::status::StatusSlot;
    use crate::test_support::{ScriptedBackend, test_app};

    fn with_examples(app: &mut App) {
        update(
            app,
            Action::ExamplesLoaded(Ok(vec![
                "Tell me a joke".to_string(),
                "Summarize this text".to_string(),
            ])),
        );
    }

    #[test]
    fn test_example_cursor_is_clamped() {
        let mut app = test_app();
        with_examples(&mut app);
        let mut tui = TuiState::new();

        dispatch(TuiEvent::ExamplePrev, &app, &mut tui);
        assert_eq!(tui.selected_example, 0);
        dispatch(TuiEvent::ExampleNext, &app, &mut tui);
        dispatch(TuiEvent::ExampleNext, &app, &mut tui);
        assert_eq!(tui.selected_example, 1);
    }

    #[test]
    fn test_tab_uses_selected_example() {
        let mut app = test_app();
        with_examples(&mut app);
        let mut tui = TuiState::new();
        dispatch(TuiEvent::ExampleNext, &app, &mut tui);

        let action = dispatch(TuiEvent::UseExample, &app, &mut tui).unwrap();
        update(&mut app, action);
        assert_eq!(app.conversation.input(), "Summarize this text");
    }

    #[test]
    fn test_tab_without_examples_does_nothing() {
        let app = test_app();
        let mut tui = TuiState::new();
        assert!(dispatch(TuiEvent::UseExample, &app, &mut tui).is_none());
    }

    #[test]
    fn test_typing_disabled_while_sending() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        app.conversation.set_input("Hello");
        update(&mut app, Action::Submit);

        assert!(dispatch(TuiEvent::InputChar('x'), &app, &mut tui).is_none());
        assert!(dispatch(TuiEvent::Backspace, &app, &mut tui).is_none());
        // Clearing and quitting stay available
        assert!(matches!(
            dispatch(TuiEvent::ClearConversation, &app, &mut tui),
            Some(Action::Clear)
        ));
        assert!(matches!(dispatch(TuiEvent::Quit, &app, &mut tui), Some(Action::Quit)));
    }

    #[test]
    fn test_scroll_up_releases_bottom() {
        let app = test_app();
        let mut tui = TuiState::new();
        dispatch(TuiEvent::ScrollPageUp, &app, &mut tui);
        assert!(!tui.stick_to_bottom);
        dispatch(TuiEvent::ScrollToBottom, &app, &mut tui);
        assert!(tui.stick_to_bottom);
    }

    #[test]
    fn test_page_scroll_moves_by_viewport() {
        let app = test_app();
        let mut tui = TuiState::new();
        tui.viewport_height = 20;
        tui.scroll_offset = 50;
        dispatch(TuiEvent::ScrollPageUp, &app, &mut tui);
        assert_eq!(tui.scroll_offset, 30);
        dispatch(TuiEvent::ScrollUp, &app, &mut tui);
        assert_eq!(tui.scroll_offset, 29);
        dispatch(TuiEvent::ScrollPageDown, &app, &mut tui);
        assert_eq!(tui.scroll_offset, 49);
        dispatch(TuiEvent::ClearConversation, &app, &mut tui);
        assert_eq!(tui.scroll_offset, 0);
        assert!(tui.stick_to_bottom);
    }

    #[test]
    fn test_quit_effect() {
        let app = test_app();
        let mut tui = TuiState::new();
        let (tx, _rx) = mpsc::channel();
        assert!(run_effect(Effect::Quit, &app, &mut tui, &tx));
        assert!(!run_effect(Effect::None, &app, &mut tui, &tx));
    }

    #[tokio::test]
    async fn test_send_result_comes_back_as_action() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        let (tx, rx) = mpsc::channel();

        app.conversation.set_input("Hello");
        let effect = update(&mut app, Action::Submit);
        assert!(!run_effect(effect, &app, &mut tui, &tx));

        // The scripted backend has no replies, so the send fails
        let action = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
            .await
            .unwrap()
            .unwrap();
        update(&mut app, action);
        assert_eq!(app.conversation.transcript().len(), 2);
        assert!(!app.conversation.is_sending());
    }

    #[tokio::test]
    async fn test_startup_results_come_back_as_actions() {
        let backend = ScriptedBackend::new().with_examples(Ok(vec![
            "Tell me a joke".to_string(),
            "Summarize this text".to_string(),
        ]));
        let mut app = App::new(Arc::new(backend), Locale::En);
        let mut tui = TuiState::new();
        let (tx, rx) = mpsc::channel();

        let effect = update(&mut app, Action::Startup);
        assert!(matches!(effect, Effect::FetchStartup));
        assert!(!run_effect(effect, &app, &mut tui, &tx));

        // Health and examples arrive as two separate actions, in either order
        let received = tokio::task::spawn_blocking(move || {
            let first = rx.recv_timeout(Duration::from_secs(5));
            let second = rx.recv_timeout(Duration::from_secs(5));
            (first, second)
        })
        .await
        .unwrap();
        let actions = [received.0.unwrap(), received.1.unwrap()];
        assert!(actions.iter().any(|a| matches!(a, Action::HealthChecked(_))));
        assert!(actions.iter().any(|a| matches!(a, Action::ExamplesLoaded(_))));

        for action in actions {
            assert!(matches!(update(&mut app, action), Effect::None));
        }
        assert!(matches!(app.status.slot(), StatusSlot::Known(status) if status.is_ok()));
        assert_eq!(
            app.examples.examples(),
            &["Tell me a joke".to_string(), "Summarize this text".to_string()]
        );
    }
}
