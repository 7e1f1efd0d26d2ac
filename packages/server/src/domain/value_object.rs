//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity. Textual values are
//! trimmed on construction, so a stored `Username` or `RoomName` never carries
//! surrounding whitespace.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

/// Maximum length of a username (in characters, after trimming)
pub const USERNAME_MAX_CHARS: usize = 32;

/// Maximum length of a room name (in characters, after trimming)
pub const ROOM_NAME_MAX_CHARS: usize = 64;

/// Maximum length of a chat message (in characters, after trimming)
pub const MESSAGE_MAX_CHARS: usize = 10000;

/// Trim `raw` and check it against the emptiness and length rules.
fn trimmed(
    raw: &str,
    max: usize,
    empty: ValueObjectError,
    too_long: impl FnOnce(usize) -> ValueObjectError,
) -> Result<String, ValueObjectError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(empty);
    }
    let len = value.chars().count();
    if len > max {
        return Err(too_long(len));
    }
    Ok(value.to_string())
}

/// Transport-level connection identifier.
///
/// Assigned when a connection is accepted and stable for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Create a new ConnectionId.
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::ConnectionIdEmpty);
        }
        Ok(Self(id))
    }

    /// Create a ConnectionId from a UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name a connection authenticates with.
///
/// Comparison is case-sensitive and exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Create a new Username from raw user input.
    ///
    /// # Arguments
    ///
    /// * `raw` - The username as typed by the user (surrounding whitespace is removed)
    ///
    /// # Returns
    ///
    /// A Result containing the Username or an error if validation fails
    pub fn new(raw: &str) -> Result<Self, ValueObjectError> {
        trimmed(
            raw,
            USERNAME_MAX_CHARS,
            ValueObjectError::UsernameEmpty,
            |actual| ValueObjectError::UsernameTooLong {
                max: USERNAME_MAX_CHARS,
                actual,
            },
        )
        .map(Self)
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room name value object.
///
/// Room names are unique and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomName(String);

impl RoomName {
    /// Create a new RoomName from raw user input.
    ///
    /// # Arguments
    ///
    /// * `raw` - The room name (surrounding whitespace is removed)
    ///
    /// # Returns
    ///
    /// A Result containing the RoomName or an error if validation fails
    pub fn new(raw: &str) -> Result<Self, ValueObjectError> {
        trimmed(
            raw,
            ROOM_NAME_MAX_CHARS,
            ValueObjectError::RoomNameEmpty,
            |actual| ValueObjectError::RoomNameTooLong {
                max: ROOM_NAME_MAX_CHARS,
                actual,
            },
        )
        .map(Self)
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Chat message text, transmitted raw (no markup processing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageText(String);

impl MessageText {
    /// Create a new MessageText from raw user input.
    pub fn new(raw: &str) -> Result<Self, ValueObjectError> {
        trimmed(
            raw,
            MESSAGE_MAX_CHARS,
            ValueObjectError::MessageTextEmpty,
            |actual| ValueObjectError::MessageTextTooLong {
                max: MESSAGE_MAX_CHARS,
                actual,
            },
        )
        .map(Self)
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MessageText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
