//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{GetRoomsUseCase, SessionCoordinator};

use super::{
    handler::{get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(coordinator, get_rooms_usecase, 64);
/// server.run("0.0.0.0:3000").await?;
/// ```
pub struct Server {
    /// SessionCoordinator（アクションの振り分け）
    coordinator: Arc<SessionCoordinator>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// 接続ごとの送信キューの容量
    queue_capacity: usize,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `coordinator` - Coordinator handling client actions and connection lifecycle
    /// * `get_rooms_usecase` - UseCase for the room list endpoint
    /// * `queue_capacity` - Outbound queue capacity per connection
    pub fn new(
        coordinator: Arc<SessionCoordinator>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        queue_capacity: usize,
    ) -> Self {
        Self {
            coordinator,
            get_rooms_usecase,
            queue_capacity,
        }
    }

    /// Build the router with all endpoints
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            coordinator: self.coordinator,
            get_rooms_usecase: self.get_rooms_usecase,
            queue_capacity: self.queue_capacity.max(1),
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Bind to `bind_addr` (e.g. "0.0.0.0:3000") and run until Ctrl+C
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, bind_addr: &str) -> std::io::Result<()> {
        let listener = TcpListener::bind(bind_addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until Ctrl+C
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        let local_addr = listener.local_addr()?;
        tracing::info!("Chat relay listening on {}", local_addr);
        tracing::info!("Connect to: ws://{}/ws", local_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
