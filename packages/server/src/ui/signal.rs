//! Shutdown signal handling.

/// Resolves when Ctrl+C is received.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
        Err(e) => tracing::error!("Failed to listen for Ctrl+C: {}", e),
    }
}
