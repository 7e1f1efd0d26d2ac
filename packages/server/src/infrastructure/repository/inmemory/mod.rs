//! InMemory Repository 実装
//!
//! プロセス再起動で全ての状態は失われます（永続化はしない）。

pub mod room;
pub mod session;

pub use room::InMemoryRoomRepository;
pub use session::InMemorySessionRepository;
