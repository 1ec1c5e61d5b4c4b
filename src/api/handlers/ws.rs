use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;

use crate::view::ViewEvent;
use crate::AppState;

pub async fn handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Returns `false` once the client is gone.
async fn send_event(sink: &mut SplitSink<WebSocket, Message>, event: &ViewEvent) -> bool {
    match serde_json::to_string(event) {
        Ok(json) => sink.send(Message::Text(json)).await.is_ok(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize ViewEvent");
            true
        }
    }
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    tracing::info!("Panel WebSocket client connected");

    let (mut sink, mut stream) = socket.split();

    // Subscribe before taking the snapshot so no change falls in between.
    let mut rx = state.view.subscribe();
    if !send_event(&mut sink, &ViewEvent::Snapshot(state.view.snapshot())).await {
        return;
    }

    loop {
        tokio::select! {
            event = rx.recv() => {
                match event {
                    Ok(event) => {
                        if !send_event(&mut sink, &event).await {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "Panel WS client lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            client_msg = stream.next() => {
                match client_msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(Message::Ping(data))) => {
                        if sink.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(_)) => {} // clients act through the HTTP actions
                    Some(Err(_)) => break,
                }
            }
        }
    }

    tracing::info!("Panel WebSocket client disconnected");
}
