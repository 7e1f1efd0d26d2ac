//! UseCase: ログイン処理
//!
//! Anonymous な接続にユーザー名を割り当ててセッションを作成します。
//! ユーザー名の重複チェックと予約は Registry 内でアトミックに行われます。

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{ActionError, ConnectionId, Session, SessionRepository, Timestamp, Username};

/// ログインのユースケース
pub struct LoginUseCase {
    session_repository: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
}

impl LoginUseCase {
    /// 新しい LoginUseCase を作成
    pub fn new(session_repository: Arc<dyn SessionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            session_repository,
            clock,
        }
    }

    /// ログインを実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - ログインする接続
    /// * `raw_username` - 入力されたユーザー名（前後の空白は除去される）
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - 作成されたセッション（ルームなし）
    /// * `Err(ActionError)` - `EmptyUsername` / `UsernameTooLong` / `DuplicateUsername` / `AlreadyLoggedIn`
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        raw_username: &str,
    ) -> Result<Session, ActionError> {
        let username = Username::new(raw_username)?;
        let timestamp = Timestamp::new(self.clock.now_millis());

        let session = self
            .session_repository
            .login(connection_id, username, timestamp)
            .await?;

        tracing::info!(
            "Connection '{}' logged in as '{}'",
            connection_id,
            session.username
        );
        Ok(session)
    }
}
