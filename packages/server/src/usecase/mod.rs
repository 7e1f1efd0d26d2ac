//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。
//! 各アクション（login, createRoom, joinRoom, chatMessage）と切断イベントに
//! 1 つずつユースケースがあり、`SessionCoordinator` がそれらを束ねます。

pub mod broadcast_router;
pub mod connect;
pub mod coordinator;
pub mod create_room;
pub mod disconnect;
pub mod get_rooms;
pub mod join_room;
pub mod login;
pub mod send_message;

pub use broadcast_router::BroadcastRouter;
pub use connect::ConnectUseCase;
pub use coordinator::SessionCoordinator;
pub use create_room::CreateRoomUseCase;
pub use disconnect::DisconnectUseCase;
pub use get_rooms::{GetRoomsUseCase, RoomOverview};
pub use join_room::JoinRoomUseCase;
pub use login::LoginUseCase;
pub use send_message::SendMessageUseCase;

#[cfg(test)]
pub(crate) mod test_support;
