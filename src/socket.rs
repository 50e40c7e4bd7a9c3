use crate::polls::{dispatch_stop, dispatch_vote};
use crate::startup::AppState;
use axum::{
    extract::{
        Extension,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

/// Commands a connected client may send. Replies only ever come back as
/// broadcasts, so there is no per-command acknowledgement.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data")]
pub enum ClientMessage {
    #[serde(rename = "vote", rename_all = "camelCase")]
    Vote { poll_id: String, option_index: i64 },
    #[serde(rename = "stopPoll")]
    StopPoll(String),
}

pub async fn socket_handler(
    ws: WebSocketUpgrade,
    Extension(app_state): Extension<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

async fn handle_socket(socket: WebSocket, app_state: AppState) {
    let connection_id = Uuid::new_v4();
    let (mut sender, mut receiver) = socket.split();
    let mut rx = app_state.broadcaster.subscribe();
    info!(
        "observer connected: {connection_id} ({} listening)",
        app_state.broadcaster.observers()
    );

    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let frame = match serde_json::to_string(&event) {
                        Ok(frame) => frame,
                        Err(e) => {
                            error!("failed to encode {} frame: {e}", event.name());
                            continue;
                        }
                    };
                    if sender.send(Message::Text(frame)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("observer {connection_id} lagged, skipped {skipped} event(s)");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let recv_state = app_state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            match message {
                Message::Text(text) => handle_frame(&recv_state, &text),
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    info!("observer disconnected: {connection_id}");
}

fn handle_frame(app_state: &AppState, text: &str) {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::Vote {
            poll_id,
            option_index,
        }) => dispatch_vote(app_state, &poll_id, option_index),
        Ok(ClientMessage::StopPoll(admin_id)) => dispatch_stop(app_state, &admin_id),
        Err(e) => debug!("dropping unreadable frame: {e}"),
    }
}
