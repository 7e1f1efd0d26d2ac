//! Test fixtures shared by the integration tests.
//!
//! The server runs in-process on an ephemeral port with the same wiring as
//! the binary, so tests never collide on ports.

#![allow(dead_code)]

use std::{collections::VecDeque, net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use hiroba_server::{
    domain::{RoomName, Timestamp},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryRoomRepository, InMemorySessionRepository},
    },
    ui::Server,
    usecase::{GetRoomsUseCase, SessionCoordinator},
};
use hiroba_shared::time::SystemClock;
use serde_json::{Value, json};
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// Helper struct to manage the in-process server lifecycle
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server with the "general" room on 127.0.0.1 and an ephemeral port
    pub async fn start() -> Self {
        let session_repository = Arc::new(InMemorySessionRepository::new());
        let room_repository = Arc::new(InMemoryRoomRepository::with_default_room(
            RoomName::new("general").unwrap(),
            Timestamp::new(0),
        ));
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let coordinator = Arc::new(SessionCoordinator::new(
            session_repository.clone(),
            room_repository.clone(),
            message_pusher,
            Arc::new(SystemClock),
        ));
        let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(session_repository, room_repository));
        let server = Server::new(coordinator, get_rooms_usecase, 64);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local address");
        let handle = tokio::spawn(async move {
            let _ = server.serve(listener).await;
        });

        TestServer { addr, handle }
    }

    /// Get the HTTP base URL for this server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the WebSocket URL for this server
    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// WebSocket client speaking the JSON protocol
pub struct TestClient {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
    next_id: u64,
    /// Push events received while waiting for an ack
    pending: VecDeque<Value>,
}

impl TestClient {
    /// Connect and consume the initial room list
    pub async fn connect(server: &TestServer) -> Self {
        let mut client = Self::connect_raw(server).await;
        let room_list = client.recv().await;
        assert_eq!(room_list["type"], "roomList");
        client
    }

    /// Connect without consuming anything
    pub async fn connect_raw(server: &TestServer) -> Self {
        let (ws, _) = connect_async(server.ws_url())
            .await
            .expect("Failed to connect");
        TestClient {
            ws,
            next_id: 1,
            pending: VecDeque::new(),
        }
    }

    /// Send a raw text frame
    pub async fn send_text(&mut self, text: &str) {
        self.ws
            .send(Message::Text(text.to_string().into()))
            .await
            .expect("Failed to send frame");
    }

    /// Send an action and wait for its ack
    pub async fn request(&mut self, mut action: Value) -> Value {
        let id = self.next_id;
        self.next_id += 1;
        action["id"] = json!(id);
        self.send_text(&action.to_string()).await;

        loop {
            let frame = self.next_frame().await;
            if frame["type"] == "ack" && frame["id"] == id {
                return frame;
            }
            self.pending.push_back(frame);
        }
    }

    pub async fn login(&mut self, username: &str) -> Value {
        self.request(json!({"type": "login", "username": username}))
            .await
    }

    pub async fn create_room(&mut self, room_name: &str) -> Value {
        self.request(json!({"type": "createRoom", "roomName": room_name}))
            .await
    }

    pub async fn join_room(&mut self, room_name: &str) -> Value {
        self.request(json!({"type": "joinRoom", "roomName": room_name}))
            .await
    }

    pub async fn say(&mut self, text: &str) -> Value {
        self.request(json!({"type": "chatMessage", "text": text}))
            .await
    }

    /// Receive the next push event
    pub async fn recv(&mut self) -> Value {
        match self.pending.pop_front() {
            Some(frame) => frame,
            None => self.next_frame().await,
        }
    }

    /// Assert that no push event arrives within a short window
    pub async fn expect_silence(&mut self) {
        assert!(self.pending.is_empty(), "unexpected frame: {:?}", self.pending);
        let result = tokio::time::timeout(Duration::from_millis(200), self.ws.next()).await;
        assert!(result.is_err(), "unexpected frame: {:?}", result);
    }

    /// Close the connection
    pub async fn close(mut self) {
        let _ = self.ws.close(None).await;
    }

    async fn next_frame(&mut self) -> Value {
        loop {
            let msg = tokio::time::timeout(RECV_TIMEOUT, self.ws.next())
                .await
                .expect("Timed out waiting for a frame")
                .expect("Connection closed")
                .expect("WebSocket error");
            if let Message::Text(text) = msg {
                return serde_json::from_str(text.as_str()).expect("Frame is not JSON");
            }
        }
    }
}
