//! InMemory Session Repository 実装（Connection Registry）
//!
//! 接続テーブルとユーザー名インデックスを 1 つの `Mutex` で保護します。
//! 重複チェックと予約が同じロックの中で行われるため、同じユーザー名での
//! 同時ログインが両方とも成功することはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, RepositoryError, RoomName, Session, SessionRepository, Timestamp, Username,
};

#[derive(Debug, Default)]
struct Registry {
    /// 接続 -> セッション（`None` の間は Anonymous）
    connections: HashMap<ConnectionId, Option<Session>>,
    /// username -> 保持している接続
    usernames: HashMap<Username, ConnectionId>,
}

/// インメモリ Connection Registry 実装
#[derive(Debug, Default)]
pub struct InMemorySessionRepository {
    registry: Mutex<Registry>,
}

impl InMemorySessionRepository {
    /// 新しい InMemorySessionRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn register(&self, connection_id: ConnectionId) {
        let mut registry = self.registry.lock().await;
        registry.connections.insert(connection_id, None);
    }

    async fn login(
        &self,
        connection_id: &ConnectionId,
        username: Username,
        timestamp: Timestamp,
    ) -> Result<Session, RepositoryError> {
        let mut registry = self.registry.lock().await;
        let Registry {
            connections,
            usernames,
        } = &mut *registry;

        let slot = connections
            .get_mut(connection_id)
            .ok_or_else(|| RepositoryError::ConnectionNotFound(connection_id.clone()))?;
        if slot.is_some() {
            return Err(RepositoryError::AlreadyLoggedIn(connection_id.clone()));
        }
        if usernames.contains_key(&username) {
            return Err(RepositoryError::DuplicateUsername(username));
        }

        let session = Session::new(connection_id.clone(), username.clone(), timestamp);
        usernames.insert(username, connection_id.clone());
        *slot = Some(session.clone());

        Ok(session)
    }

    async fn lookup(&self, connection_id: &ConnectionId) -> Option<Session> {
        let registry = self.registry.lock().await;
        registry
            .connections
            .get(connection_id)
            .and_then(|slot| slot.clone())
    }

    async fn switch_room(
        &self,
        connection_id: &ConnectionId,
        room: RoomName,
    ) -> Result<Option<RoomName>, RepositoryError> {
        let mut registry = self.registry.lock().await;
        let session = registry
            .connections
            .get_mut(connection_id)
            .ok_or_else(|| RepositoryError::ConnectionNotFound(connection_id.clone()))?
            .as_mut()
            .ok_or_else(|| RepositoryError::NotLoggedIn(connection_id.clone()))?;

        Ok(session.room.replace(room))
    }

    async fn unregister(&self, connection_id: &ConnectionId) -> Option<Session> {
        let mut registry = self.registry.lock().await;
        let session = registry.connections.remove(connection_id)??;
        registry.usernames.remove(&session.username);
        Some(session)
    }

    async fn members_of(&self, room: &RoomName) -> Vec<ConnectionId> {
        let registry = self.registry.lock().await;
        registry
            .connections
            .iter()
            .filter(|(_, slot)| slot.as_ref().is_some_and(|s| s.is_in(room)))
            .map(|(id, _)| id.clone())
            .collect()
    }

    async fn sessions_in(&self, room: &RoomName) -> Vec<Session> {
        let registry = self.registry.lock().await;
        let mut sessions: Vec<Session> = registry
            .connections
            .values()
            .filter_map(|slot| slot.as_ref())
            .filter(|session| session.is_in(room))
            .cloned()
            .collect();

        // Sort by username for consistent ordering
        sessions.sort_by(|a, b| a.username.as_str().cmp(b.username.as_str()));

        sessions
    }

    async fn all_connections(&self) -> Vec<ConnectionId> {
        let registry = self.registry.lock().await;
        registry.connections.keys().cloned().collect()
    }
}
