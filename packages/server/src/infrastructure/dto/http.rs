//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Room summary for the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub name: String,
    /// Sessions currently in the room, ordered by username
    pub members: Vec<RoomMemberDto>,
    pub created_at: String, // RFC 3339
}

/// Member entry of a room summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomMemberDto {
    pub username: String,
    pub logged_in_at: String, // RFC 3339
}
