//! UseCase: チャットメッセージ送信処理
//!
//! 送信者の所属ルームの全メンバー（送信者本人を含む）にメッセージを配送します。
//! タイムスタンプは送信者ではなくサーバーの時計で付与します。

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    ActionError, ConnectionId, MessageText, ServerEvent, SessionRepository, Timestamp,
};

use super::BroadcastRouter;

/// チャットメッセージ送信のユースケース
pub struct SendMessageUseCase {
    session_repository: Arc<dyn SessionRepository>,
    router: Arc<BroadcastRouter>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        router: Arc<BroadcastRouter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            session_repository,
            router,
            clock,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 送信キューに投入できた件数
    /// * `Err(ActionError)` - `NotLoggedIn` / `NotInRoom` / `EmptyMessage` / `MessageTooLong`
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        raw_text: &str,
    ) -> Result<usize, ActionError> {
        let session = self
            .session_repository
            .lookup(connection_id)
            .await
            .ok_or(ActionError::NotLoggedIn)?;
        let room = session.room.ok_or(ActionError::NotInRoom)?;
        let text = MessageText::new(raw_text)?;

        let event = ServerEvent::ChatMessage {
            username: session.username,
            text,
            timestamp: Timestamp::new(self.clock.now_millis()),
        };
        let delivered = self.router.send_to_room(&room, &event).await;

        tracing::debug!(
            "Message from '{}' delivered to {} members of '{}'",
            connection_id,
            delivered,
            room
        );
        Ok(delivered)
    }
}
