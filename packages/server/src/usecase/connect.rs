//! UseCase: 接続受付処理
//!
//! トランスポート層が接続を受け付けた直後に呼ばれ、接続を Anonymous として
//! 登録し、現在のルーム一覧をその接続に送信します。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, PusherChannel, RoomRepository, ServerEvent, SessionRepository,
};

use super::BroadcastRouter;

/// 接続受付のユースケース
pub struct ConnectUseCase {
    session_repository: Arc<dyn SessionRepository>,
    room_repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    router: Arc<BroadcastRouter>,
}

impl ConnectUseCase {
    /// 新しい ConnectUseCase を作成
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        room_repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        router: Arc<BroadcastRouter>,
    ) -> Self {
        Self {
            session_repository,
            room_repository,
            message_pusher,
            router,
        }
    }

    /// 接続を登録し、ルーム一覧を送信する
    ///
    /// 登録と一覧の送信はルーム作成の通知と直列化されるため、
    /// 並行してルームが作成されても古い一覧が後から届くことはありません。
    pub async fn execute(&self, connection_id: ConnectionId, channel: PusherChannel) {
        let _guard = self.router.lock_room_list().await;

        // 送信キューを先に登録し、Registry から見えた時点で配送可能にしておく
        self.message_pusher
            .register_client(connection_id.clone(), channel)
            .await;
        self.session_repository.register(connection_id.clone()).await;

        let rooms = self.room_repository.list().await;
        self.router
            .send_to_one(&connection_id, &ServerEvent::RoomList { rooms })
            .await;

        tracing::info!("Connection '{}' registered", connection_id);
    }
}
