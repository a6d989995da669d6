//! # Driven Ports (Outbound SPI)
//!
//! Network access the registry needs from its host.

use crate::error::ProbeError;
use async_trait::async_trait;

/// What a successful handshake tells us about a peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeReport {
    /// Current block number announced in the handshake ack.
    pub peer_block: u64,
}

/// Probe operations against a single peer.
///
/// Implementations open their own connection per call and must bound every
/// call with their own socket timeouts; the registry additionally applies
/// a round deadline.
#[async_trait]
pub trait PeerProber: Send + Sync + 'static {
    /// Connect and complete the protocol handshake.
    async fn handshake(&self, host: &str) -> Result<ProbeReport, ProbeError>;

    /// Ask the peer for the hosts it knows.
    async fn peer_list(&self, host: &str) -> Result<Vec<String>, ProbeError>;
}
