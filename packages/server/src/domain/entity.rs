//! Core domain models for the chat relay.

use serde::{Deserialize, Serialize};

use super::value_object::{ConnectionId, RoomName, Timestamp, Username};

/// Authenticated identity bound to one live connection.
///
/// State machine: a connection without a `Session` is Anonymous; a session
/// with `room == None` is Authenticated; otherwise it is InRoom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Connection this session belongs to
    pub connection_id: ConnectionId,
    /// Display name, unique across active sessions
    pub username: Username,
    /// Room the session currently belongs to (at most one)
    pub room: Option<RoomName>,
    /// Timestamp when the login succeeded
    pub logged_in_at: Timestamp,
}

impl Session {
    /// Create a new session with no room
    pub fn new(connection_id: ConnectionId, username: Username, logged_in_at: Timestamp) -> Self {
        Self {
            connection_id,
            username,
            room: None,
            logged_in_at,
        }
    }

    /// Check whether the session currently belongs to `room`
    pub fn is_in(&self, room: &RoomName) -> bool {
        self.room.as_ref() == Some(room)
    }
}

/// Named broadcast group.
///
/// Membership is not stored here: it is the set of sessions whose `room`
/// equals this room's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique, case-sensitive name
    pub name: RoomName,
    /// Timestamp when the room was created
    pub created_at: Timestamp,
}

impl Room {
    /// Create a new room
    pub fn new(name: RoomName, created_at: Timestamp) -> Self {
        Self { name, created_at }
    }
}
