use crate::server::AppState;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tandem_core::{ClientEvent, PeerId, ServerEvent};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Upgrades `GET /ws` to a signaling socket.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.max_message_size(state.config.max_message_size)
        .on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let peer_id = PeerId::new();
    info!("New WebSocket connection: {}", peer_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    state.signaling.add_peer(peer_id.clone(), tx);
    state
        .signaling
        .send_signal(&peer_id, &ServerEvent::Welcome(peer_id.clone()));

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let relay = state.relay.clone();
        let peer_id = peer_id.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => {
                            if let Err(e) = relay.dispatch(peer_id.clone(), event).await {
                                error!("Relay died: {}", e);
                                break;
                            }
                        }
                        Err(e) => warn!("Invalid signaling event from {}: {}", peer_id, e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    // Runs on every exit path, including peers that never joined.
    if let Err(e) = state.relay.disconnect(peer_id.clone()).await {
        error!("Failed to release seat of {}: {}", peer_id, e);
    }
    state.signaling.remove_peer(&peer_id);
    info!(
        "WebSocket disconnected: {} ({} still connected)",
        peer_id,
        state.signaling.peer_count()
    );
}
