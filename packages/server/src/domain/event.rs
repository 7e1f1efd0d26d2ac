//! Outbound events produced by the coordinator.
//!
//! Events are transport-agnostic; the infrastructure layer decides how they
//! are encoded on the wire.

use super::{
    error::ActionError,
    value_object::{MessageText, RoomName, Timestamp, Username},
};

/// Successful outcome of a client action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionReply {
    LoggedIn { username: Username },
    RoomCreated { room_name: RoomName },
    RoomJoined { room_name: RoomName },
    MessageSent,
}

/// Event delivered to one or more connections
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// Full list of rooms in directory order
    RoomList { rooms: Vec<RoomName> },
    /// Join/leave/disconnect notice
    SystemMessage { text: String, timestamp: Timestamp },
    /// Chat message relayed to a room
    ChatMessage {
        username: Username,
        text: MessageText,
        timestamp: Timestamp,
    },
    /// Acknowledgement of the request identified by `request_id`
    Reply {
        request_id: u64,
        result: Result<ActionReply, ActionError>,
    },
}

impl ServerEvent {
    /// `"<user> joined the room."`
    pub fn joined(username: &Username, timestamp: Timestamp) -> Self {
        Self::SystemMessage {
            text: format!("{} joined the room.", username),
            timestamp,
        }
    }

    /// `"<user> left the room."`
    pub fn left(username: &Username, timestamp: Timestamp) -> Self {
        Self::SystemMessage {
            text: format!("{} left the room.", username),
            timestamp,
        }
    }

    /// `"<user> disconnected."`
    pub fn disconnected(username: &Username, timestamp: Timestamp) -> Self {
        Self::SystemMessage {
            text: format!("{} disconnected.", username),
            timestamp,
        }
    }

    /// Short event name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RoomList { .. } => "roomList",
            Self::SystemMessage { .. } => "systemMessage",
            Self::ChatMessage { .. } => "chatMessage",
            Self::Reply { .. } => "ack",
        }
    }
}
