//! Domain layer for the chat relay.
//!
//! This module contains business rules that are independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod command;
pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use command::Command;
pub use entity::{Room, Session};
pub use error::{ActionError, MessagePushError, RepositoryError, ValueObjectError};
pub use event::{ActionReply, ServerEvent};
pub use factory::ConnectionIdFactory;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{RoomRepository, SessionRepository};
pub use value_object::{ConnectionId, MessageText, RoomName, Timestamp, Username};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
