//! Runtime configuration for the relay server.

/// Default listening port
pub const DEFAULT_PORT: u16 = 3000;

/// Room that exists from startup
pub const DEFAULT_ROOM: &str = "general";

/// Per-connection outbound queue capacity
///
/// When a connection's queue is full, further events for that connection are
/// dropped (and logged) instead of blocking the broadcast.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Server configuration resolved from the command line and environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub default_room: String,
    pub queue_capacity: usize,
}

impl ServerConfig {
    /// `host:port` to bind the listener to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            default_room: DEFAULT_ROOM.to_string(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // テスト項目: デフォルト設定は全インターフェースの 3000 番で待ち受ける
        // when (操作):
        let config = ServerConfig::default();

        // then (期待する結果):
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.default_room, "general");
        assert_eq!(config.queue_capacity, 64);
    }
}
