//! Room-based WebSocket chat relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 127.0.0.1 --port 8080
//! PORT=8080 cargo run --bin hiroba-server
//! ```

use std::sync::Arc;

use clap::Parser;
use hiroba_server::{
    config::{DEFAULT_PORT, DEFAULT_QUEUE_CAPACITY, DEFAULT_ROOM, ServerConfig},
    domain::{RoomName, Timestamp},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryRoomRepository, InMemorySessionRepository},
    },
    ui::Server,
    usecase::{GetRoomsUseCase, SessionCoordinator},
};
use hiroba_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "Room-based WebSocket chat relay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Room that exists from startup
    #[arg(long, default_value = DEFAULT_ROOM)]
    default_room: String,

    /// Outbound queue capacity per connection
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
    queue_capacity: usize,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            default_room: args.default_room,
            queue_capacity: args.queue_capacity,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = ServerConfig::from(Args::parse());

    // Initialize dependencies in order:
    // 1. Clock
    // 2. Repositories (Connection Registry / Room Directory)
    // 3. MessagePusher
    // 4. Coordinator and UseCases
    // 5. Server

    // 1. Create Clock
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // 2. Create Repositories (in-memory)
    let default_room = match RoomName::new(&config.default_room) {
        Ok(name) => name,
        Err(e) => {
            tracing::error!("Invalid default room '{}': {}", config.default_room, e);
            std::process::exit(2);
        }
    };
    tracing::info!("Room '{}' created!", default_room);
    let room_repository = Arc::new(InMemoryRoomRepository::with_default_room(
        default_room,
        Timestamp::new(clock.now_millis()),
    ));
    let session_repository = Arc::new(InMemorySessionRepository::new());

    // 3. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 4. Create Coordinator and UseCases
    let coordinator = Arc::new(SessionCoordinator::new(
        session_repository.clone(),
        room_repository.clone(),
        message_pusher,
        clock,
    ));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(session_repository, room_repository));

    // 5. Create and run the server
    let server = Server::new(coordinator, get_rooms_usecase, config.queue_capacity);
    if let Err(e) = server.run(&config.bind_addr()).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
