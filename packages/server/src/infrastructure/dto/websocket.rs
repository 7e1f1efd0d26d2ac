//! WebSocket message DTOs.
//!
//! Client frames carry an `id` that is echoed back in the matching `ack`.

use serde::{Deserialize, Deserializer, Serialize};

/// Action sent by a client
///
/// A missing or `null` payload field decodes as `""`, so the request still
/// gets an ack (with the matching `Empty*` error) instead of being dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    Login {
        #[serde(default, deserialize_with = "null_as_empty")]
        username: String,
    },
    CreateRoom {
        #[serde(default, deserialize_with = "null_as_empty")]
        room_name: String,
    },
    JoinRoom {
        #[serde(default, deserialize_with = "null_as_empty")]
        room_name: String,
    },
    ChatMessage {
        #[serde(default, deserialize_with = "null_as_empty")]
        text: String,
    },
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Request frame: `{"id": 1, "type": "login", "username": "alice"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub id: u64,
    #[serde(flatten)]
    pub action: Action,
}

/// Message type enum for server frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageType {
    Ack,
    RoomList,
    SystemMessage,
    ChatMessage,
}

/// Reply to a single request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AckMessage {
    pub r#type: MessageType,
    pub id: u64,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_name: Option<String>,
    /// Error code, present on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human-readable error, present on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Room list announcement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomListMessage {
    pub r#type: MessageType,
    pub rooms: Vec<String>,
}

/// System notice (join/leave/disconnect)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemMessage {
    pub r#type: MessageType,
    pub text: String,
    pub timestamp: String, // RFC 3339
}

/// Chat message relayed to a room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub r#type: MessageType,
    pub username: String,
    pub text: String,
    pub timestamp: String, // RFC 3339
}
