//! # Core Entities
//!
//! - **Chain**: `Hash`
//! - **Networking**: `Peer`

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A 32-byte SHA-256 hash.
pub type Hash = [u8; 32];

/// A remote node reachable by network address.
///
/// Created on first successful discovery or benchmark response and only
/// mutated by the peer registry. Stale peers are never removed; repeated
/// benchmark failures push their latency toward the failure penalty so they
/// lose selection weight instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    /// IPv4 address in dotted-decimal form, optionally with `:port`.
    pub host: String,
    /// Smoothed handshake round-trip latency in milliseconds.
    /// Zero means "never measured".
    #[serde(default)]
    pub latency_ms: u32,
    /// Unix seconds of the last successful benchmark.
    #[serde(default)]
    pub last_seen: Option<u64>,
}

impl Peer {
    /// Create an unmeasured peer.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            latency_ms: 0,
            last_seen: None,
        }
    }

    /// Create a peer with a known latency.
    pub fn with_latency(host: impl Into<String>, latency_ms: u32) -> Self {
        Self {
            host: host.into(),
            latency_ms,
            last_seen: None,
        }
    }

    /// Whether a latency sample has ever been recorded.
    pub fn is_measured(&self) -> bool {
        self.latency_ms != 0
    }

    /// Latency estimate as a duration.
    pub fn latency(&self) -> Duration {
        Duration::from_millis(u64::from(self.latency_ms))
    }
}

impl std::fmt::Display for Peer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.host)
    }
}
