//! Domain layer error definitions.

use thiserror::Error;

use super::value_object::{ConnectionId, RoomName, Username};

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    #[error("ConnectionId cannot be empty")]
    ConnectionIdEmpty,

    #[error("Username cannot be empty")]
    UsernameEmpty,

    #[error("Username cannot exceed {max} characters (got {actual})")]
    UsernameTooLong { max: usize, actual: usize },

    #[error("Room name cannot be empty")]
    RoomNameEmpty,

    #[error("Room name cannot exceed {max} characters (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },

    #[error("Message cannot be empty")]
    MessageTextEmpty,

    #[error("Message cannot exceed {max} characters (got {actual})")]
    MessageTextTooLong { max: usize, actual: usize },
}

/// Errors raised by the connection registry and the room directory
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Connection not registered: {0}")]
    ConnectionNotFound(ConnectionId),

    #[error("Connection {0} already has a session")]
    AlreadyLoggedIn(ConnectionId),

    #[error("Connection {0} has no session")]
    NotLoggedIn(ConnectionId),

    #[error("Username already taken: {0}")]
    DuplicateUsername(Username),

    #[error("Room already exists: {0}")]
    RoomAlreadyExists(RoomName),
}

/// Errors raised while pushing a message to a single connection
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessagePushError {
    #[error("Connection not found: {0}")]
    ClientNotFound(String),

    #[error("Outbound queue full for connection {0}")]
    QueueFull(String),

    #[error("Outbound queue closed for connection {0}")]
    QueueClosed(String),

    #[error("Failed to encode message: {0}")]
    EncodeFailed(String),
}

/// Client-facing action failures.
///
/// Every variant is a recoverable input error: it is reported to the
/// originating connection only and never affects other connections.
/// The `Display` text is shown to the user verbatim.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    #[error("Username cannot be empty.")]
    EmptyUsername,

    #[error("Username is too long.")]
    UsernameTooLong,

    #[error("Username already taken.")]
    DuplicateUsername,

    #[error("Already logged in.")]
    AlreadyLoggedIn,

    #[error("Room name cannot be empty.")]
    EmptyRoomName,

    #[error("Room name is too long.")]
    RoomNameTooLong,

    #[error("Room already exists.")]
    RoomAlreadyExists,

    #[error("Room does not exist.")]
    RoomNotFound,

    #[error("User not logged in.")]
    NotLoggedIn,

    #[error("Join a room first.")]
    NotInRoom,

    #[error("Message cannot be empty.")]
    EmptyMessage,

    #[error("Message is too long.")]
    MessageTooLong,
}

impl ActionError {
    /// Stable machine-readable code sent alongside the display message
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "EmptyUsername",
            Self::UsernameTooLong => "UsernameTooLong",
            Self::DuplicateUsername => "DuplicateUsername",
            Self::AlreadyLoggedIn => "AlreadyLoggedIn",
            Self::EmptyRoomName => "EmptyRoomName",
            Self::RoomNameTooLong => "RoomNameTooLong",
            Self::RoomAlreadyExists => "RoomAlreadyExists",
            Self::RoomNotFound => "RoomNotFound",
            Self::NotLoggedIn => "NotLoggedIn",
            Self::NotInRoom => "NotInRoom",
            Self::EmptyMessage => "EmptyMessage",
            Self::MessageTooLong => "MessageTooLong",
        }
    }
}

impl From<ValueObjectError> for ActionError {
    fn from(err: ValueObjectError) -> Self {
        match err {
            // Connection ids are minted by the server, never typed by a user.
            ValueObjectError::ConnectionIdEmpty => Self::NotLoggedIn,
            ValueObjectError::UsernameEmpty => Self::EmptyUsername,
            ValueObjectError::UsernameTooLong { .. } => Self::UsernameTooLong,
            ValueObjectError::RoomNameEmpty => Self::EmptyRoomName,
            ValueObjectError::RoomNameTooLong { .. } => Self::RoomNameTooLong,
            ValueObjectError::MessageTextEmpty => Self::EmptyMessage,
            ValueObjectError::MessageTextTooLong { .. } => Self::MessageTooLong,
        }
    }
}

impl From<RepositoryError> for ActionError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::ConnectionNotFound(_) | RepositoryError::NotLoggedIn(_) => {
                Self::NotLoggedIn
            }
            RepositoryError::AlreadyLoggedIn(_) => Self::AlreadyLoggedIn,
            RepositoryError::DuplicateUsername(_) => Self::DuplicateUsername,
            RepositoryError::RoomAlreadyExists(_) => Self::RoomAlreadyExists,
        }
    }
}
