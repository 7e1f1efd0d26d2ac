//! Conversion logic between domain events and wire DTOs.

use hiroba_shared::time::timestamp_to_rfc3339;

use crate::domain::{ActionReply, Command, Room, ServerEvent, Session};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// DTO → Domain Command
// ========================================

impl From<dto::Action> for Command {
    fn from(action: dto::Action) -> Self {
        match action {
            dto::Action::Login { username } => Self::Login { username },
            dto::Action::CreateRoom { room_name } => Self::CreateRoom { room_name },
            dto::Action::JoinRoom { room_name } => Self::JoinRoom { room_name },
            dto::Action::ChatMessage { text } => Self::SendMessage { text },
        }
    }
}

// ========================================
// Domain Event → DTO
// ========================================

/// Encode a domain event as one JSON text frame.
pub fn encode_event(event: &ServerEvent) -> Result<String, serde_json::Error> {
    match event {
        ServerEvent::RoomList { rooms } => serde_json::to_string(&dto::RoomListMessage {
            r#type: dto::MessageType::RoomList,
            rooms: rooms.iter().map(|r| r.as_str().to_string()).collect(),
        }),
        ServerEvent::SystemMessage { text, timestamp } => {
            serde_json::to_string(&dto::SystemMessage {
                r#type: dto::MessageType::SystemMessage,
                text: text.clone(),
                timestamp: timestamp_to_rfc3339(timestamp.value()),
            })
        }
        ServerEvent::ChatMessage {
            username,
            text,
            timestamp,
        } => serde_json::to_string(&dto::ChatMessage {
            r#type: dto::MessageType::ChatMessage,
            username: username.as_str().to_string(),
            text: text.as_str().to_string(),
            timestamp: timestamp_to_rfc3339(timestamp.value()),
        }),
        ServerEvent::Reply { request_id, result } => {
            serde_json::to_string(&ack_message(*request_id, result))
        }
    }
}

fn ack_message(
    id: u64,
    result: &Result<ActionReply, crate::domain::ActionError>,
) -> dto::AckMessage {
    let mut ack = dto::AckMessage {
        r#type: dto::MessageType::Ack,
        id,
        success: result.is_ok(),
        username: None,
        room_name: None,
        code: None,
        message: None,
    };

    match result {
        Ok(ActionReply::LoggedIn { username }) => {
            ack.username = Some(username.as_str().to_string());
        }
        Ok(ActionReply::RoomCreated { room_name } | ActionReply::RoomJoined { room_name }) => {
            ack.room_name = Some(room_name.as_str().to_string());
        }
        Ok(ActionReply::MessageSent) => {}
        Err(e) => {
            ack.code = Some(e.code().to_string());
            ack.message = Some(e.to_string());
        }
    }

    ack
}

/// Build the HTTP room summary from a room and its current members.
pub fn room_summary(room: Room, members: Vec<Session>) -> http::RoomSummaryDto {
    http::RoomSummaryDto {
        name: room.name.into_string(),
        members: members
            .into_iter()
            .map(|s| http::RoomMemberDto {
                username: s.username.into_string(),
                logged_in_at: timestamp_to_rfc3339(s.logged_in_at.value()),
            })
            .collect(),
        created_at: timestamp_to_rfc3339(room.created_at.value()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ActionError, ConnectionId, MessageText, RoomName, Timestamp, Username,
    };

    #[test]
    fn test_chat_message_action_to_command() {
        // テスト項目: chatMessage アクションが SendMessage コマンドに変換される
        // given (前提条件):
        let action = dto::Action::ChatMessage {
            text: " hello ".to_string(),
        };

        // when (操作):
        let command: Command = action.into();

        // then (期待する結果): 入力はそのまま渡される（trim はユースケースで行う）
        assert_eq!(
            command,
            Command::SendMessage {
                text: " hello ".to_string()
            }
        );
    }

    #[test]
    fn test_encode_chat_message() {
        // テスト項目: ChatMessage イベントが chatMessage フレームにエンコードされる
        // given (前提条件):
        let event = ServerEvent::ChatMessage {
            username: Username::new("alice").unwrap(),
            text: MessageText::new("hello").unwrap(),
            timestamp: Timestamp::new(1672531200000),
        };

        // when (操作):
        let json = encode_event(&event).unwrap();

        // then (期待する結果):
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "type": "chatMessage",
                "username": "alice",
                "text": "hello",
                "timestamp": "2023-01-01T00:00:00.000Z"
            })
        );
    }

    #[test]
    fn test_encode_room_list() {
        // テスト項目: RoomList イベントが順序を保ったまま roomList フレームになる
        // given (前提条件):
        let event = ServerEvent::RoomList {
            rooms: vec![
                RoomName::new("general").unwrap(),
                RoomName::new("sports").unwrap(),
            ],
        };

        // when (操作):
        let json = encode_event(&event).unwrap();

        // then (期待する結果):
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "roomList");
        assert_eq!(value["rooms"], serde_json::json!(["general", "sports"]));
    }

    #[test]
    fn test_encode_successful_join_ack() {
        // テスト項目: joinRoom 成功の ack に roomName が含まれる
        // given (前提条件):
        let event = ServerEvent::Reply {
            request_id: 3,
            result: Ok(ActionReply::RoomJoined {
                room_name: RoomName::new("sports").unwrap(),
            }),
        };

        // when (操作):
        let json = encode_event(&event).unwrap();

        // then (期待する結果):
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"type": "ack", "id": 3, "success": true, "roomName": "sports"})
        );
    }

    #[test]
    fn test_encode_failed_ack() {
        // テスト項目: 失敗した ack にエラーコードと表示用メッセージが含まれる
        // given (前提条件):
        let event = ServerEvent::Reply {
            request_id: 1,
            result: Err(ActionError::DuplicateUsername),
        };

        // when (操作):
        let json = encode_event(&event).unwrap();

        // then (期待する結果):
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["code"], "DuplicateUsername");
        assert_eq!(value["message"], "Username already taken.");
    }

    #[test]
    fn test_room_summary() {
        // テスト項目: ルームとメンバーから HTTP 用のサマリーが作られる
        // given (前提条件):
        let room = Room::new(RoomName::new("general").unwrap(), Timestamp::new(1672531200000));
        let session = Session::new(
            ConnectionId::new("c1".to_string()).unwrap(),
            Username::new("alice").unwrap(),
            Timestamp::new(1672531200123),
        );

        // when (操作):
        let summary = room_summary(room, vec![session]);

        // then (期待する結果):
        assert_eq!(summary.name, "general");
        assert_eq!(
            summary.members,
            vec![http::RoomMemberDto {
                username: "alice".to_string(),
                logged_in_at: "2023-01-01T00:00:00.123Z".to_string(),
            }]
        );
        assert_eq!(summary.created_at, "2023-01-01T00:00:00.000Z");
    }
}
