//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 排他制御
//!
//! 「チェックしてから書き込む」操作（ユーザー名の重複チェック + 登録、ルームの
//! 存在チェック + 作成、所属ルームの読み取り + 変更）は、実装側で 1 つの
//! クリティカルセクションとして実行しなければなりません。

use async_trait::async_trait;

use super::{ConnectionId, RepositoryError, Room, RoomName, Session, Timestamp, Username};

/// Connection Registry
///
/// 接続とセッション（ユーザー名・所属ルーム）の対応を管理し、
/// ユーザー名の一意性を保証する。
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// 接続を登録（まだセッションはない = Anonymous）
    async fn register(&self, connection_id: ConnectionId);

    /// ログイン: ユーザー名を予約してセッションを作成
    ///
    /// 重複チェックと予約はアトミックに行われる。
    async fn login(
        &self,
        connection_id: &ConnectionId,
        username: Username,
        timestamp: Timestamp,
    ) -> Result<Session, RepositoryError>;

    /// 接続に紐づくセッションを取得
    async fn lookup(&self, connection_id: &ConnectionId) -> Option<Session>;

    /// 所属ルームを変更し、変更前のルームを返す
    async fn switch_room(
        &self,
        connection_id: &ConnectionId,
        room: RoomName,
    ) -> Result<Option<RoomName>, RepositoryError>;

    /// 接続を登録解除し、セッションがあれば返す（ユーザー名は解放される）
    async fn unregister(&self, connection_id: &ConnectionId) -> Option<Session>;

    /// 指定ルームに所属する接続のスナップショット
    async fn members_of(&self, room: &RoomName) -> Vec<ConnectionId>;

    /// 指定ルームに所属するセッションのスナップショット
    async fn sessions_in(&self, room: &RoomName) -> Vec<Session>;

    /// 登録済みの全ての接続（Anonymous を含む）
    async fn all_connections(&self) -> Vec<ConnectionId>;
}

/// Room Directory
///
/// ルーム名の集合を作成順に保持する。ルームは削除されない。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルームが存在するか
    async fn exists(&self, name: &RoomName) -> bool;

    /// ルームを作成（存在チェックと追加はアトミック）
    async fn create(&self, name: RoomName, created_at: Timestamp) -> Result<(), RepositoryError>;

    /// ルーム名の一覧（作成順）
    async fn list(&self) -> Vec<RoomName>;

    /// ルームエンティティの一覧（作成順）
    async fn rooms(&self) -> Vec<Room>;
}
