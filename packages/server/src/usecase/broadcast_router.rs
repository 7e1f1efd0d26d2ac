//! Broadcast Router
//!
//! ルーム単位・全体・単一接続への配送を行います。
//! 宛先はメンバーシップのスナップショット（呼び出し時点）から計算され、
//! 配送中に参加した接続には届きません。配送中に離脱した接続には、
//! スナップショットのタイミング次第で届く場合があります（結果整合、これ以上の保証はしない）。

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::domain::{ConnectionId, MessagePusher, RoomName, ServerEvent, SessionRepository};

/// イベントの配送先を決めて MessagePusher に渡す
pub struct BroadcastRouter {
    /// Connection Registry（メンバーシップの参照元）
    session_repository: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// ルーム一覧の読み出しから配送までを直列化する
    room_list_lock: Mutex<()>,
}

impl BroadcastRouter {
    /// 新しい BroadcastRouter を作成
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            session_repository,
            message_pusher,
            room_list_lock: Mutex::new(()),
        }
    }

    /// ルーム一覧を読んで配送する間保持するロック
    ///
    /// 保持している間に読んだ一覧は、後から届く一覧より古くならない。
    pub async fn lock_room_list(&self) -> MutexGuard<'_, ()> {
        self.room_list_lock.lock().await
    }

    /// ルームに所属する全てのセッションへ配送し、投入できた件数を返す
    pub async fn send_to_room(&self, room: &RoomName, event: &ServerEvent) -> usize {
        let members = self.session_repository.members_of(room).await;
        tracing::debug!(
            "Routing {} to room '{}' ({} members)",
            event.kind(),
            room,
            members.len()
        );
        self.message_pusher.broadcast(members, event).await
    }

    /// ルームのメンバーのうち `except` 以外へ配送し、投入できた件数を返す
    pub async fn send_to_room_except(
        &self,
        room: &RoomName,
        except: &ConnectionId,
        event: &ServerEvent,
    ) -> usize {
        let mut members = self.session_repository.members_of(room).await;
        members.retain(|member| member != except);
        self.message_pusher.broadcast(members, event).await
    }

    /// 登録済みの全ての接続へ配送し、投入できた件数を返す
    pub async fn send_to_all(&self, event: &ServerEvent) -> usize {
        let targets = self.session_repository.all_connections().await;
        self.message_pusher.broadcast(targets, event).await
    }

    /// 1 つの接続へ配送する（失敗はログに残して握りつぶす）
    pub async fn send_to_one(&self, connection_id: &ConnectionId, event: &ServerEvent) -> bool {
        match self.message_pusher.push_to(connection_id, event).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to push {} to '{}': {}", event.kind(), connection_id, e);
                false
            }
        }
    }
}
