//! UseCase: ルーム作成処理
//!
//! Room Directory にルームを追加し、更新後のルーム一覧を全ての接続に通知します。

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{ActionError, RoomName, RoomRepository, ServerEvent, Timestamp};

use super::BroadcastRouter;

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    room_repository: Arc<dyn RoomRepository>,
    router: Arc<BroadcastRouter>,
    clock: Arc<dyn Clock>,
}

impl CreateRoomUseCase {
    /// 新しい CreateRoomUseCase を作成
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        router: Arc<BroadcastRouter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            room_repository,
            router,
            clock,
        }
    }

    /// ルーム作成を実行
    ///
    /// # Returns
    ///
    /// * `Ok(RoomName)` - 作成されたルーム名（前後の空白は除去済み）
    /// * `Err(ActionError)` - `EmptyRoomName` / `RoomNameTooLong` / `RoomAlreadyExists`
    pub async fn execute(&self, raw_room_name: &str) -> Result<RoomName, ActionError> {
        let room_name = RoomName::new(raw_room_name)?;

        // 作成から配送までを直列化し、最後に届く一覧が最新になるようにする
        let _guard = self.router.lock_room_list().await;
        self.room_repository
            .create(room_name.clone(), Timestamp::new(self.clock.now_millis()))
            .await?;

        let rooms = self.room_repository.list().await;
        let delivered = self
            .router
            .send_to_all(&ServerEvent::RoomList { rooms })
            .await;

        tracing::info!(
            "Room '{}' created, room list sent to {} connections",
            room_name,
            delivered
        );
        Ok(room_name)
    }
}
