//! Session Coordinator
//!
//! クライアントのアクション（login / createRoom / joinRoom / chatMessage）と
//! 接続のライフサイクル（接続・切断）を各ユースケースに振り分けます。
//!
//! 1 つの接続のアクションは呼び出し側（受信ループ）で順番に `handle` されるため、
//! 同じクライアントのコマンドが並び替えられることはありません。

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    ActionError, ActionReply, Command, ConnectionId, MessagePusher, PusherChannel,
    RoomRepository, ServerEvent, Session, SessionRepository,
};

use super::{
    BroadcastRouter, ConnectUseCase, CreateRoomUseCase, DisconnectUseCase, JoinRoomUseCase,
    LoginUseCase, SendMessageUseCase,
};

/// アクションの振り分けと応答の送信を行う
pub struct SessionCoordinator {
    connect_usecase: ConnectUseCase,
    login_usecase: LoginUseCase,
    create_room_usecase: CreateRoomUseCase,
    join_room_usecase: JoinRoomUseCase,
    send_message_usecase: SendMessageUseCase,
    disconnect_usecase: DisconnectUseCase,
    router: Arc<BroadcastRouter>,
}

impl SessionCoordinator {
    /// 共有する Registry / Directory / MessagePusher から各ユースケースを組み立てる
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        room_repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let router = Arc::new(BroadcastRouter::new(
            session_repository.clone(),
            message_pusher.clone(),
        ));

        Self {
            connect_usecase: ConnectUseCase::new(
                session_repository.clone(),
                room_repository.clone(),
                message_pusher.clone(),
                router.clone(),
            ),
            login_usecase: LoginUseCase::new(session_repository.clone(), clock.clone()),
            create_room_usecase: CreateRoomUseCase::new(
                room_repository.clone(),
                router.clone(),
                clock.clone(),
            ),
            join_room_usecase: JoinRoomUseCase::new(
                session_repository.clone(),
                room_repository,
                router.clone(),
                clock.clone(),
            ),
            send_message_usecase: SendMessageUseCase::new(
                session_repository.clone(),
                router.clone(),
                clock.clone(),
            ),
            disconnect_usecase: DisconnectUseCase::new(
                session_repository,
                message_pusher,
                router.clone(),
                clock,
            ),
            router,
        }
    }

    /// 接続を Anonymous として登録する
    pub async fn connect(&self, connection_id: ConnectionId, channel: PusherChannel) {
        self.connect_usecase.execute(connection_id, channel).await;
    }

    /// コマンドを実行し、結果を返す（応答は送信しない）
    pub async fn dispatch(
        &self,
        connection_id: &ConnectionId,
        command: Command,
    ) -> Result<ActionReply, ActionError> {
        match command {
            Command::Login { username } => self
                .login_usecase
                .execute(connection_id, &username)
                .await
                .map(|session| ActionReply::LoggedIn {
                    username: session.username,
                }),
            Command::CreateRoom { room_name } => self
                .create_room_usecase
                .execute(&room_name)
                .await
                .map(|room_name| ActionReply::RoomCreated { room_name }),
            Command::JoinRoom { room_name } => self
                .join_room_usecase
                .execute(connection_id, &room_name)
                .await
                .map(|room_name| ActionReply::RoomJoined { room_name }),
            Command::SendMessage { text } => self
                .send_message_usecase
                .execute(connection_id, &text)
                .await
                .map(|_| ActionReply::MessageSent),
        }
    }

    /// コマンドを実行し、結果を要求元の接続にだけ応答として送信する
    pub async fn handle(&self, connection_id: &ConnectionId, request_id: u64, command: Command) {
        let action = command.name();
        let result = self.dispatch(connection_id, command).await;

        if let Err(e) = &result {
            tracing::info!(
                "{} from '{}' rejected: {}",
                action,
                connection_id,
                e.code()
            );
        }

        let reply = ServerEvent::Reply { request_id, result };
        self.router.send_to_one(connection_id, &reply).await;
    }

    /// 接続を登録解除し、必要であれば切断通知を配送する
    pub async fn disconnect(&self, connection_id: &ConnectionId) -> Option<Session> {
        self.disconnect_usecase.execute(connection_id).await
    }
}
