//! Preview websocket: relays debounced preview messages to a renderer.
//!
//! DESIGN
//! ======
//! The renderer connects with `?session=<uuid>`. The handler attaches a
//! [`ChannelSurface`] to that session's preview slot and asks for an
//! immediate flush so the renderer starts from the current state. The loop
//! then forwards each [`PreviewMessage`] as a JSON text frame. Nothing the
//! renderer sends is interpreted.
//!
//! EDGE CASES
//! ==========
//! A second renderer for the same session replaces the first: the first
//! socket's channel closes. On exit each socket detaches only its own
//! surface, so a late close from the old renderer leaves the newcomer
//! attached.

use std::sync::{Arc, Weak};

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;
use wizard::{ChannelSurface, PreviewMessage, PreviewSurface, WizardSession};

use crate::state::AppState;

/// Messages buffered per renderer; a flush posts two.
const PREVIEW_BUFFER: usize = 16;

#[derive(Debug, Deserialize)]
pub struct PreviewParams {
    pub session: Uuid,
}

pub async fn handle_ws(
    State(state): State<AppState>,
    Query(params): Query<PreviewParams>,
    ws: WebSocketUpgrade,
) -> Response {
    let Some(session) = state.sessions.get(params.session).await else {
        return (StatusCode::NOT_FOUND, "unknown wizard session").into_response();
    };
    ws.on_upgrade(move |socket| run_ws(socket, session))
}

/// A renderer's hold on a session's preview slot.
///
/// The surface is held weakly: the slot owns the only sender, so replacing
/// the surface closes `rx`.
pub(crate) struct Attachment {
    pub(crate) rx: mpsc::Receiver<PreviewMessage>,
    surface: Weak<dyn PreviewSurface>,
}

impl Attachment {
    /// Release the slot if this attachment still owns it.
    pub(crate) fn release(&self, session: &WizardSession) -> bool {
        self.surface
            .upgrade()
            .is_some_and(|surface| session.preview_slot().detach_if(&surface))
    }
}

/// Attach a fresh channel surface to the session and flush to it right away.
pub(crate) fn attach(session: &WizardSession) -> Attachment {
    let (tx, rx) = mpsc::channel(PREVIEW_BUFFER);
    let surface: Arc<dyn PreviewSurface> = Arc::new(ChannelSurface::new(tx));
    let weak = Arc::downgrade(&surface);
    session.preview_slot().attach(surface);
    session.request_preview();
    Attachment { rx, surface: weak }
}

async fn run_ws(mut socket: WebSocket, session: Arc<WizardSession>) {
    let session_id = session.id();
    let mut attachment = attach(&session);
    info!(%session_id, "preview ws: attached");

    let replaced = loop {
        tokio::select! {
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_)) | Err(_)) | None => break false,
                    Some(Ok(_)) => {}
                }
            }
            message = attachment.rx.recv() => {
                let Some(message) = message else { break true };
                let json = match message.to_json() {
                    Ok(json) => json,
                    Err(e) => {
                        warn!(%session_id, error = %e, "preview ws: failed to serialize message");
                        continue;
                    }
                };
                if socket.send(Message::Text(json.into())).await.is_err() {
                    break false;
                }
            }
        }
    };

    let released = attachment.release(&session);
    info!(%session_id, replaced, released, "preview ws: detached");
}

#[cfg(test)]
#[path = "preview_test.rs"]
mod tests;
