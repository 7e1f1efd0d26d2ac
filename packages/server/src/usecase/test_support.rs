//! ユースケースのテスト用フィクスチャ

use std::sync::Arc;

use hiroba_shared::time::FixedClock;
use tokio::sync::mpsc;

use crate::{
    domain::{
        ConnectionId, MessagePusher, RoomName, SessionRepository, Timestamp, Username,
    },
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryRoomRepository, InMemorySessionRepository},
    },
};

use super::BroadcastRouter;

/// 2023-01-01T00:00:00.000Z
pub const NOW: i64 = 1672531200000;

pub struct Fixture {
    pub session_repository: Arc<InMemorySessionRepository>,
    pub room_repository: Arc<InMemoryRoomRepository>,
    pub message_pusher: Arc<WebSocketMessagePusher>,
    pub clock: Arc<FixedClock>,
}

impl Fixture {
    /// "general" ルームのみが存在する状態
    pub fn new() -> Self {
        Self {
            session_repository: Arc::new(InMemorySessionRepository::new()),
            room_repository: Arc::new(InMemoryRoomRepository::with_default_room(
                room("general"),
                Timestamp::new(0),
            )),
            message_pusher: Arc::new(WebSocketMessagePusher::new()),
            clock: Arc::new(FixedClock::new(NOW)),
        }
    }

    pub fn router(&self) -> Arc<BroadcastRouter> {
        Arc::new(BroadcastRouter::new(
            self.session_repository.clone(),
            self.message_pusher.clone(),
        ))
    }

    /// 接続を登録し、送信キューの受信側を返す
    pub async fn connect(&self, id: &str) -> mpsc::Receiver<String> {
        let (tx, rx) = mpsc::channel(16);
        self.message_pusher.register_client(conn(id), tx).await;
        self.session_repository.register(conn(id)).await;
        rx
    }

    /// 接続してログインまで済ませる
    pub async fn login(&self, id: &str, username: &str) -> mpsc::Receiver<String> {
        let rx = self.connect(id).await;
        self.session_repository
            .login(&conn(id), user(username), Timestamp::new(NOW))
            .await
            .unwrap();
        rx
    }

    /// ログインしてルームに所属させる（通知は発生しない）
    pub async fn login_into(&self, id: &str, username: &str, room_name: &str) -> mpsc::Receiver<String> {
        let rx = self.login(id, username).await;
        self.session_repository
            .switch_room(&conn(id), room(room_name))
            .await
            .unwrap();
        rx
    }
}

pub fn conn(id: &str) -> ConnectionId {
    ConnectionId::new(id.to_string()).unwrap()
}

pub fn user(raw: &str) -> Username {
    Username::new(raw).unwrap()
}

pub fn room(raw: &str) -> RoomName {
    RoomName::new(raw).unwrap()
}

/// キューに溜まっているフレームを全て取り出して JSON として返す
pub fn drain(rx: &mut mpsc::Receiver<String>) -> Vec<serde_json::Value> {
    let mut frames = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        frames.push(serde_json::from_str(&frame).unwrap());
    }
    frames
}
