//! Editor websocket: one wizard session per connection.
//!
//! DESIGN
//! ======
//! On upgrade the server opens a [`WizardSession`], registers it so a
//! preview socket can find it, and enters a receive loop:
//! - Incoming text frames → parse [`EditorCommand`] → apply to the session
//! - Each applied command → [`Outcome`] → events sent back to the editor
//!
//! Command handling is pure session logic and returns an `Outcome`; the loop
//! owns all socket writes.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → `session` event with the id, then the initial `state`
//! 2. Commands → `state`, `error`, or `saved`
//! 3. `saved` or socket close → session removed and closed

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;
use wizard::session::SessionView;
use wizard::{ProjectRecord, WizardError, WizardSession};

use crate::state::AppState;

// =============================================================================
// PROTOCOL
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditorCommand {
    SetField { category: String, field: String, value: Value },
    TogglePage { page_id: String },
    Next,
    Back,
    GoTo { index: usize },
    Save,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorEvent {
    Session { session_id: Uuid },
    State(SessionView),
    Saved { project: ProjectRecord },
    Error { code: &'static str, message: String, retryable: bool },
}

impl EditorEvent {
    fn from_error(err: &WizardError) -> Self {
        Self::Error { code: err.error_code(), message: err.to_string(), retryable: err.retryable() }
    }
}

// =============================================================================
// OUTCOME
// =============================================================================

/// What a command did. The connection loop turns this into events.
#[derive(Debug)]
pub(crate) enum Outcome {
    /// State may have changed; send a fresh view.
    Changed,
    /// Project stored; the session is finished.
    Saved(ProjectRecord),
    /// Command rejected; state unchanged.
    Rejected(WizardError),
}

pub(crate) async fn apply(session: &WizardSession, command: EditorCommand) -> Outcome {
    let result = match command {
        EditorCommand::SetField { category, field, value } => session.set_field(&category, &field, value),
        EditorCommand::TogglePage { page_id } => session.toggle_page(&page_id).map(|_| ()),
        EditorCommand::Next => session.go_next().map(|_| ()),
        EditorCommand::Back => session.go_back().map(|_| ()),
        EditorCommand::GoTo { index } => session.go_to(index).map(|_| ()),
        EditorCommand::Save => {
            return match session.save().await {
                Ok(record) => Outcome::Saved(record),
                Err(e) => Outcome::Rejected(e),
            };
        }
    };
    match result {
        Ok(()) => Outcome::Changed,
        Err(e) => Outcome::Rejected(e),
    }
}

pub(crate) fn events_for(session: &WizardSession, outcome: Outcome) -> Vec<EditorEvent> {
    match outcome {
        Outcome::Changed => vec![EditorEvent::State(session.view())],
        Outcome::Saved(project) => vec![EditorEvent::Saved { project }],
        Outcome::Rejected(err) => vec![EditorEvent::from_error(&err)],
    }
}

/// Parse and apply one text frame.
pub(crate) async fn handle_text(session: &WizardSession, text: &str) -> Vec<EditorEvent> {
    match serde_json::from_str::<EditorCommand>(text) {
        Ok(command) => events_for(session, apply(session, command).await),
        Err(e) => vec![EditorEvent::Error {
            code: "E_BAD_COMMAND",
            message: format!("invalid command: {e}"),
            retryable: false,
        }],
    }
}

// =============================================================================
// CONNECTION
// =============================================================================

pub async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state))
}

async fn run_ws(mut socket: WebSocket, state: AppState) {
    let session = state.sessions.open(Arc::clone(&state.store), state.preview_debounce).await;
    let session_id = session.id();
    info!(%session_id, "editor ws: connected");

    let greeting = [EditorEvent::Session { session_id }, EditorEvent::State(session.view())];
    if send_events(&mut socket, &greeting).await.is_err() {
        state.sessions.remove(session_id).await;
        return;
    }

    while let Some(Ok(msg)) = socket.recv().await {
        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };

        let events = handle_text(&session, text.as_str()).await;
        if send_events(&mut socket, &events).await.is_err() {
            break;
        }
        if session.is_finished() {
            break;
        }
    }

    state.sessions.remove(session_id).await;
    info!(%session_id, "editor ws: disconnected");
}

async fn send_events(socket: &mut WebSocket, events: &[EditorEvent]) -> Result<(), ()> {
    for event in events {
        let json = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "editor ws: failed to serialize event");
                continue;
            }
        };
        socket.send(Message::Text(json.into())).await.map_err(|_| ())?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "editor_test.rs"]
mod tests;
