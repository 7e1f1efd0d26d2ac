//! InMemory Room Repository 実装（Room Directory）
//!
//! ルームを作成順の `Vec` で保持します。ルームは削除されないため、
//! 一度 `exists` が true を返したルームはプロセス終了まで存在し続けます。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RepositoryError, Room, RoomName, RoomRepository, Timestamp};

/// インメモリ Room Directory 実装
#[derive(Debug, Default)]
pub struct InMemoryRoomRepository {
    /// 作成順のルーム
    rooms: Mutex<Vec<Room>>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// デフォルトルームを 1 つ持つ InMemoryRoomRepository を作成
    pub fn with_default_room(name: RoomName, created_at: Timestamp) -> Self {
        Self {
            rooms: Mutex::new(vec![Room::new(name, created_at)]),
        }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn exists(&self, name: &RoomName) -> bool {
        let rooms = self.rooms.lock().await;
        rooms.iter().any(|room| &room.name == name)
    }

    async fn create(&self, name: RoomName, created_at: Timestamp) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        if rooms.iter().any(|room| room.name == name) {
            return Err(RepositoryError::RoomAlreadyExists(name));
        }
        rooms.push(Room::new(name, created_at));
        Ok(())
    }

    async fn list(&self) -> Vec<RoomName> {
        let rooms = self.rooms.lock().await;
        rooms.iter().map(|room| room.name.clone()).collect()
    }

    async fn rooms(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        rooms.clone()
    }
}
