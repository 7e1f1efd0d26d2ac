//! Shared application state.

use std::sync::Arc;

use crate::usecase::{GetRoomsUseCase, SessionCoordinator};

/// Shared application state
pub struct AppState {
    /// SessionCoordinator（アクションの振り分け）
    pub coordinator: Arc<SessionCoordinator>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// 接続ごとの送信キューの容量
    pub queue_capacity: usize,
}
