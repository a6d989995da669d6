//! # Transport Configuration

use std::time::Duration;

/// Default TCP port of a Mochimo node.
pub const DEFAULT_PORT: u16 = 2098;

/// Socket-level settings for peer sessions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportConfig {
    /// Port used when a peer host carries no explicit `:port`.
    pub port: u16,
    /// Maximum time to establish the TCP connection.
    pub connect_timeout: Duration,
    /// Maximum time for each read from the socket.
    pub read_timeout: Duration,
    /// Maximum time for each envelope write.
    pub write_timeout: Duration,
    /// Maximum time to receive a whole multi-chunk file.
    pub file_timeout: Duration,
    /// Largest file accepted from a peer, in bytes.
    pub max_file_len: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(5),
            write_timeout: Duration::from_secs(5),
            file_timeout: Duration::from_secs(60),
            max_file_len: 64 << 20,
        }
    }
}

impl TransportConfig {
    /// Create config for testing with shorter timeouts.
    pub fn for_testing() -> Self {
        Self {
            port: DEFAULT_PORT,
            connect_timeout: Duration::from_millis(500),
            read_timeout: Duration::from_millis(500),
            write_timeout: Duration::from_millis(500),
            file_timeout: Duration::from_secs(2),
            max_file_len: 4 << 20,
        }
    }
}
