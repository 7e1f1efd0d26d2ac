//! UseCase: 切断処理
//!
//! 接続の登録を解除してユーザー名を解放し、ルームに所属していた場合は
//! 残りのメンバーに `"<user> disconnected."` を配送します。
//!
//! Registry からの削除は 1 回しか成功しないため、同じ接続に対して
//! 複数回呼ばれても通知は 1 回だけ発生します。

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    ConnectionId, MessagePusher, ServerEvent, Session, SessionRepository, Timestamp,
};

use super::BroadcastRouter;

/// 切断のユースケース
pub struct DisconnectUseCase {
    session_repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    router: Arc<BroadcastRouter>,
    clock: Arc<dyn Clock>,
}

impl DisconnectUseCase {
    /// 新しい DisconnectUseCase を作成
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        router: Arc<BroadcastRouter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            session_repository,
            message_pusher,
            router,
            clock,
        }
    }

    /// 切断処理を実行
    ///
    /// # Returns
    ///
    /// 削除されたセッション（ログイン前の接続、または処理済みの場合は `None`）
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<Session> {
        // Registry から先に外し、以降のスナップショットに含まれないようにする
        let session = self.session_repository.unregister(connection_id).await;
        self.message_pusher.unregister_client(connection_id).await;

        let session = session?;
        if let Some(room) = &session.room {
            let event = ServerEvent::disconnected(
                &session.username,
                Timestamp::new(self.clock.now_millis()),
            );
            self.router.send_to_room(room, &event).await;
        }

        tracing::info!(
            "'{}' ({}) disconnected",
            session.username,
            connection_id
        );
        Some(session)
    }
}
