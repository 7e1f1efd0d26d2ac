//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの有界送信キュー（`mpsc::Sender<String>`）を管理
//! - イベントを JSON にエンコードし、キューへ投入（push_to, broadcast）
//!
//! ## バックプレッシャー
//!
//! 送信は `try_send` で行い、受信者を待ちません。
//! キューが満杯の受信者にはそのメッセージを破棄し（drop-on-overflow）、
//! 閉じたキューはスキップします。いずれも他の受信者への配送には影響しません。
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された送信キューを受け取り、メッセージ送信に使用します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel, ServerEvent},
    infrastructure::dto::conversion::encode_event,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// let (tx, rx) = tokio::sync::mpsc::channel(64);
/// pusher.register_client(connection_id.clone(), tx).await;
/// pusher.push_to(&connection_id, &event).await?;
/// ```
#[derive(Debug, Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信キュー
    clients: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録されている送信キューの数
    pub async fn client_count(&self) -> usize {
        self.clients.lock().await.len()
    }
}

/// 1 つのキューへ投入（待たない）
fn try_deliver(
    connection_id: &ConnectionId,
    channel: &PusherChannel,
    content: String,
) -> Result<(), MessagePushError> {
    channel.try_send(content).map_err(|e| match e {
        TrySendError::Full(_) => MessagePushError::QueueFull(connection_id.to_string()),
        TrySendError::Closed(_) => MessagePushError::QueueClosed(connection_id.to_string()),
    })
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, channel: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
        clients.insert(connection_id, channel);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!("Connection '{}' unregistered from MessagePusher", connection_id);
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError> {
        let content =
            encode_event(event).map_err(|e| MessagePushError::EncodeFailed(e.to_string()))?;

        let clients = self.clients.lock().await;
        let channel = clients
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.to_string()))?;

        try_deliver(connection_id, channel, content)?;
        tracing::debug!("Pushed {} to '{}'", event.kind(), connection_id);
        Ok(())
    }

    async fn broadcast(&self, targets: Vec<ConnectionId>, event: &ServerEvent) -> usize {
        let content = match encode_event(event) {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("Failed to encode {}: {}", event.kind(), e);
                return 0;
            }
        };

        let clients = self.clients.lock().await;
        let mut delivered = 0;

        for target in &targets {
            let Some(channel) = clients.get(target) else {
                tracing::warn!("Connection '{}' not found during broadcast, skipping", target);
                continue;
            };
            // ブロードキャストでは一部の送信失敗を許容
            match try_deliver(target, channel, content.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!("Dropped {}: {}", event.kind(), e),
            }
        }

        tracing::debug!(
            "Broadcasted {} to {}/{} connections",
            event.kind(),
            delivered,
            targets.len()
        );
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RoomName, Timestamp};
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - push_to: 特定の接続への送信
    // - broadcast: 複数接続への送信と、受信者ごとの失敗の分離
    // - 有界キューが満杯のときの破棄ポリシー
    // ========================================

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn notice() -> ServerEvent {
        ServerEvent::SystemMessage {
            text: "alice joined the room.".to_string(),
            timestamp: Timestamp::new(0),
        }
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定の接続に JSON エンコードされたイベントを送信できる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, mut rx) = mpsc::channel(4);
        pusher.register_client(conn("c1"), tx).await;

        // when (操作):
        let event = ServerEvent::RoomList {
            rooms: vec![RoomName::new("general").unwrap()],
        };
        let result = pusher.push_to(&conn("c1"), &event).await;

        // then (期待する結果):
        assert!(result.is_ok());
        let received = rx.recv().await.unwrap();
        assert_eq!(received, r#"{"type":"roomList","rooms":["general"]}"#);
    }

    #[tokio::test]
    async fn test_push_to_client_not_found() {
        // テスト項目: 存在しない接続への送信はエラーを返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let result = pusher.push_to(&conn("nonexistent"), &notice()).await;

        // then (期待する結果):
        assert!(matches!(result, Err(MessagePushError::ClientNotFound(_))));
    }

    #[tokio::test]
    async fn test_broadcast_success() {
        // テスト項目: 複数の接続にイベントをブロードキャストできる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::channel(4);
        let (tx2, mut rx2) = mpsc::channel(4);
        pusher.register_client(conn("c1"), tx1).await;
        pusher.register_client(conn("c2"), tx2).await;

        // when (操作):
        let delivered = pusher.broadcast(vec![conn("c1"), conn("c2")], &notice()).await;

        // then (期待する結果):
        assert_eq!(delivered, 2);
        assert!(rx1.recv().await.unwrap().contains("alice joined the room."));
        assert!(rx2.recv().await.unwrap().contains("alice joined the room."));
    }

    #[tokio::test]
    async fn test_broadcast_isolates_full_queue() {
        // テスト項目: キューが満杯の受信者がいても、他の受信者には配送される
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (slow_tx, mut slow_rx) = mpsc::channel(1);
        let (fast_tx, mut fast_rx) = mpsc::channel(4);
        pusher.register_client(conn("slow"), slow_tx).await;
        pusher.register_client(conn("fast"), fast_tx).await;
        pusher.push_to(&conn("slow"), &notice()).await.unwrap(); // slow のキューを満杯にする

        // when (操作):
        let delivered = pusher
            .broadcast(vec![conn("slow"), conn("fast")], &notice())
            .await;

        // then (期待する結果): slow 宛ては破棄され、fast には届く
        assert_eq!(delivered, 1);
        assert!(fast_rx.recv().await.is_some());
        assert!(slow_rx.recv().await.is_some());
        assert!(slow_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_push_to_full_queue_is_error() {
        // テスト項目: キューが満杯の接続への push_to は QueueFull を返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, _rx) = mpsc::channel(1);
        pusher.register_client(conn("c1"), tx).await;
        pusher.push_to(&conn("c1"), &notice()).await.unwrap();

        // when (操作):
        let result = pusher.push_to(&conn("c1"), &notice()).await;

        // then (期待する結果):
        assert!(matches!(result, Err(MessagePushError::QueueFull(_))));
    }

    #[tokio::test]
    async fn test_broadcast_skips_closed_and_unknown() {
        // テスト項目: 閉じたキューや未登録の接続はスキップされる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (closed_tx, closed_rx) = mpsc::channel(4);
        let (tx, mut rx) = mpsc::channel(4);
        drop(closed_rx);
        pusher.register_client(conn("closed"), closed_tx).await;
        pusher.register_client(conn("c1"), tx).await;

        // when (操作):
        let delivered = pusher
            .broadcast(vec![conn("closed"), conn("ghost"), conn("c1")], &notice())
            .await;

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert!(rx.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_unregister_client() {
        // テスト項目: 登録解除した接続には送信できない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, _rx) = mpsc::channel(4);
        pusher.register_client(conn("c1"), tx).await;

        // when (操作):
        pusher.unregister_client(&conn("c1")).await;

        // then (期待する結果):
        assert_eq!(pusher.client_count().await, 0);
        assert!(pusher.push_to(&conn("c1"), &notice()).await.is_err());
    }
}
