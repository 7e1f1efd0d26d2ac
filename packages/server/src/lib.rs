//! Room-based chat relay server.
//!
//! Clients connect over WebSocket, log in with a unique username, create and
//! join named rooms, and exchange messages with the other members of their
//! current room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
