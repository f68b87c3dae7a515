//! WebSocket glue: adapts a socket into a [`SessionHandle`].
//!
//! This is the session-provider boundary. Everything behind it speaks
//! input events and output bytes; nothing in the session core knows it
//! is talking to a WebSocket.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::debug;

use super::proto::ClientMessage;
use super::AppState;
use crate::session::{Geometry, SessionHandle};
use crate::ui::{InputEvent, KeyInput};

const INPUT_QUEUE: usize = 64;
const OUTPUT_QUEUE: usize = 16;

/// WebSocket upgrade handler for `/terminal`.
pub async fn terminal_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sink, mut stream) = socket.split();

    // The client must introduce its terminal before a session exists.
    let (geometry, term) = loop {
        let text = match stream.next().await {
            Some(Ok(Message::Text(text))) => text.to_string(),
            Some(Ok(Message::Ping(data))) => {
                let _ = sink.send(Message::Pong(data)).await;
                continue;
            }
            Some(Ok(Message::Close(_))) | None => return,
            Some(Ok(_)) => continue,
            Some(Err(_)) => return,
        };
        match serde_json::from_str::<ClientMessage>(&text) {
            Ok(ClientMessage::Attach {
                width,
                height,
                term,
            }) => break (Geometry { width, height }, term),
            // Events before attach have no session to go to.
            Ok(_) => continue,
            Err(e) => {
                debug!("dropping malformed message before attach: {e}");
                continue;
            }
        }
    };

    let (input_tx, input_rx) = mpsc::channel(INPUT_QUEUE);
    let (output_tx, mut output_rx) = mpsc::channel::<Vec<u8>>(OUTPUT_QUEUE);
    let id = state.manager.attach(SessionHandle {
        geometry,
        term,
        input: input_rx,
        output: output_tx,
    });

    // Frames out. When the session's task drops its sender, close the
    // socket so the client sees the session end.
    let writer = tokio::spawn(async move {
        while let Some(bytes) = output_rx.recv().await {
            if sink.send(Message::Binary(bytes.into())).await.is_err() {
                return;
            }
        }
        let _ = sink.send(Message::Close(None)).await;
    });

    // Events in, strictly in arrival order.
    while let Some(msg) = stream.next().await {
        let text = match msg {
            Ok(Message::Text(text)) => text.to_string(),
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(_) => continue,
        };
        let event = match serde_json::from_str::<ClientMessage>(&text) {
            Ok(ClientMessage::Key { name }) => match KeyInput::from_name(&name) {
                Some(key) => InputEvent::Key(key),
                None => continue,
            },
            Ok(ClientMessage::Resize { width, height }) => InputEvent::Resize { width, height },
            // Already attached; a second attach is meaningless.
            Ok(ClientMessage::Attach { .. }) => continue,
            Err(e) => {
                debug!(session = %id, "dropping malformed message: {e}");
                continue;
            }
        };
        // The session ended (quit); stop reading.
        if input_tx.send(event).await.is_err() {
            break;
        }
    }

    let _ = input_tx.send(InputEvent::Disconnect).await;
    let _ = writer.await;
}
