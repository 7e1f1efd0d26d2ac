//! UseCase: ルーム一覧取得処理（HTTP API 用）

use std::sync::Arc;

use crate::domain::{Room, RoomRepository, Session, SessionRepository};

/// ルームとその現在のメンバー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomOverview {
    pub room: Room,
    /// ユーザー名順
    pub members: Vec<Session>,
}

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    session_repository: Arc<dyn SessionRepository>,
    room_repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    /// 新しい GetRoomsUseCase を作成
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        room_repository: Arc<dyn RoomRepository>,
    ) -> Self {
        Self {
            session_repository,
            room_repository,
        }
    }

    /// 作成順のルーム一覧を取得
    pub async fn execute(&self) -> Vec<RoomOverview> {
        let mut overviews = Vec::new();
        for room in self.room_repository.rooms().await {
            let members = self.session_repository.sessions_in(&room.name).await;
            overviews.push(RoomOverview { room, members });
        }
        overviews
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;
    use crate::usecase::test_support::{Fixture, room, user};

    #[tokio::test]
    async fn test_get_rooms_with_members() {
        // テスト項目: ルームが作成順に、メンバーがユーザー名順に返される
        // given (前提条件):
        let fixture = Fixture::new();
        fixture
            .room_repository
            .create(room("sports"), Timestamp::new(1000))
            .await
            .unwrap();
        let _bob = fixture.login_into("c1", "bob", "general").await;
        let _alice = fixture.login_into("c2", "alice", "general").await;
        let _carol = fixture.login("c3", "carol").await;
        let usecase = GetRoomsUseCase::new(
            fixture.session_repository.clone(),
            fixture.room_repository.clone(),
        );

        // when (操作):
        let overviews = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(overviews.len(), 2);
        assert_eq!(overviews[0].room.name, room("general"));
        let names: Vec<_> = overviews[0]
            .members
            .iter()
            .map(|s| s.username.clone())
            .collect();
        assert_eq!(names, vec![user("alice"), user("bob")]);
        assert_eq!(overviews[1].room.name, room("sports"));
        assert!(overviews[1].members.is_empty());
    }
}
