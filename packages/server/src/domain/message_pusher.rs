//! MessagePusher trait 定義
//!
//! 接続ごとの送信キューへイベントを届けるためのインターフェース。
//! 具体的な実装（WebSocket）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, ServerEvent};

/// 接続ごとの送信キュー（有界）
///
/// UI 層（WebSocket ハンドラ）が生成し、受信側を WebSocket の送信ループが消費する。
pub type PusherChannel = mpsc::Sender<String>;

/// MessagePusher trait
///
/// ## 配送ポリシー
///
/// - `push_to` / `broadcast` は受信者を待たない（fire-and-forget）
/// - ある受信者への送信失敗は他の受信者への配送に影響しない
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信キューを登録
    async fn register_client(&self, connection_id: ConnectionId, channel: PusherChannel);

    /// 接続の送信キューを登録解除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 1 つの接続にイベントを送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続にイベントを送信（一部の失敗は許容し、成功した件数を返す）
    async fn broadcast(&self, targets: Vec<ConnectionId>, event: &ServerEvent) -> usize;
}
