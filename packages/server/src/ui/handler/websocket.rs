//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, Stream, StreamExt},
};
use tokio::sync::{mpsc, watch};

use crate::{
    domain::{Command, ConnectionId, ConnectionIdFactory},
    infrastructure::dto::websocket::ActionRequest,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives events from the outbound queue and writes them to the WebSocket.
///
/// # Arguments
///
/// * `rx` - Outbound queue of encoded events for this connection
/// * `sender` - WebSocket sink to send messages to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionIdFactory::generate();
    let (sender, receiver) = socket.split();

    // Register the outbound queue before anything can be routed to this connection
    let (tx, rx) = mpsc::channel(state.queue_capacity);
    state.coordinator.connect(connection_id.clone(), tx).await;
    tracing::info!("Client '{}' connected", connection_id);

    let (stop_tx, stop_rx) = watch::channel(false);
    let mut recv_task = tokio::spawn(recv_loop(
        state.clone(),
        connection_id.clone(),
        receiver,
        stop_rx,
    ));
    let mut send_task = pusher_loop(rx, sender);

    // The recv loop is never aborted: an action in progress always finishes
    // before the connection is unregistered.
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => {
            stop_tx.send_replace(true);
            if let Err(e) = recv_task.await {
                tracing::error!("Receive loop of '{}' failed: {}", connection_id, e);
            }
        }
    };

    match state.coordinator.disconnect(&connection_id).await {
        Some(session) => tracing::info!(
            "Client '{}' ({}) removed from registry",
            connection_id,
            session.username
        ),
        None => tracing::info!("Anonymous client '{}' removed from registry", connection_id),
    }
}

/// Handles inbound frames one at a time, in arrival order, until the peer
/// goes away or `stop` is raised.
///
/// `stop` is only observed between frames, so an action that has started
/// always runs to completion.
async fn recv_loop<S, E>(
    state: Arc<AppState>,
    connection_id: ConnectionId,
    mut receiver: S,
    mut stop: watch::Receiver<bool>,
) where
    S: Stream<Item = Result<Message, E>> + Unpin,
    E: std::fmt::Display,
{
    loop {
        let next = tokio::select! {
            biased;
            _ = stop.wait_for(|stopped| *stopped) => break,
            next = receiver.next() => next,
        };

        let msg = match next {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                break;
            }
            None => break,
        };

        match msg {
            Message::Text(text) => {
                handle_text(&state, &connection_id, text.as_str()).await;
            }
            Message::Ping(_) => {
                tracing::debug!("Received ping");
            }
            Message::Close(_) => {
                tracing::info!("Client '{}' requested close", connection_id);
                break;
            }
            _ => {}
        }
    }
}

async fn handle_text(state: &AppState, connection_id: &ConnectionId, text: &str) {
    let request = match serde_json::from_str::<ActionRequest>(text) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Ignoring malformed frame from '{}': {}", connection_id, e);
            return;
        }
    };

    let command = Command::from(request.action);
    tracing::debug!(
        "Received {} (id={}) from '{}'",
        command.name(),
        request.id,
        connection_id
    );
    state
        .coordinator
        .handle(connection_id, request.id, command)
        .await;
}
