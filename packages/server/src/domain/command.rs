//! Inbound client actions, as raw user input.
//!
//! Validation (trimming, emptiness, length) happens in the use cases so
//! that every failure is reported through the same `ActionError` reply.

/// Action submitted by a connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { username: String },
    CreateRoom { room_name: String },
    JoinRoom { room_name: String },
    SendMessage { text: String },
}

impl Command {
    /// Action name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::CreateRoom { .. } => "createRoom",
            Self::JoinRoom { .. } => "joinRoom",
            Self::SendMessage { .. } => "chatMessage",
        }
    }
}
