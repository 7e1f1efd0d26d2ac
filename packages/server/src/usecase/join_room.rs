//! UseCase: ルーム参加処理
//!
//! 既にルームに所属している場合は退出と参加を 1 つの遷移として扱います。
//! 所属先の切り替えは Registry 内でアトミックに行われ、
//! 「どのルームにも属していない」中間状態は他の接続から観測されません。

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    ActionError, ConnectionId, RoomName, RoomRepository, ServerEvent, SessionRepository, Timestamp,
};

use super::BroadcastRouter;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    session_repository: Arc<dyn SessionRepository>,
    room_repository: Arc<dyn RoomRepository>,
    router: Arc<BroadcastRouter>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        room_repository: Arc<dyn RoomRepository>,
        router: Arc<BroadcastRouter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            session_repository,
            room_repository,
            router,
            clock,
        }
    }

    /// ルーム参加を実行
    ///
    /// 1. 旧ルームの本人以外のメンバーに `"<user> left the room."` を配送
    /// 2. 新ルームのメンバー（本人を含む）に `"<user> joined the room."` を配送
    ///
    /// 現在のルームへの再参加も同じ手順（退出してから参加）で処理されます。
    ///
    /// # Returns
    ///
    /// * `Ok(RoomName)` - 参加したルーム名
    /// * `Err(ActionError)` - `NotLoggedIn` / `RoomNotFound`
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        raw_room_name: &str,
    ) -> Result<RoomName, ActionError> {
        let session = self
            .session_repository
            .lookup(connection_id)
            .await
            .ok_or(ActionError::NotLoggedIn)?;

        // 名前として成立しないルームは存在しない
        let room_name = RoomName::new(raw_room_name).map_err(|_| ActionError::RoomNotFound)?;
        if !self.room_repository.exists(&room_name).await {
            return Err(ActionError::RoomNotFound);
        }

        let previous = self
            .session_repository
            .switch_room(connection_id, room_name.clone())
            .await?;

        let timestamp = Timestamp::new(self.clock.now_millis());
        if let Some(old_room) = previous {
            self.router
                .send_to_room_except(
                    &old_room,
                    connection_id,
                    &ServerEvent::left(&session.username, timestamp),
                )
                .await;
            tracing::info!("'{}' left room '{}'", session.username, old_room);
        }
        self.router
            .send_to_room(&room_name, &ServerEvent::joined(&session.username, timestamp))
            .await;

        tracing::info!("'{}' joined room '{}'", session.username, room_name);
        Ok(room_name)
    }
}
