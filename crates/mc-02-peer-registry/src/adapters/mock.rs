use crate::error::ProbeError;
use crate::ports::{PeerProber, ProbeReport};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

// =============================================================================
// MOCK PROBER (for testing)
// =============================================================================

/// Scripted behaviour for one host.
#[derive(Debug, Clone, Default)]
struct MockPeer {
    delay: Duration,
    peer_block: u64,
    peers: Vec<String>,
}

/// Mock prober with per-host delay, block and peer list. Unknown hosts are
/// unreachable.
#[derive(Debug, Default)]
pub struct MockProber {
    peers: HashMap<String, MockPeer>,
    calls: Mutex<Vec<String>>,
}

impl MockProber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reachable host.
    pub fn add_peer(&mut self, host: &str, delay: Duration, peer_block: u64) {
        self.peers.insert(
            host.to_string(),
            MockPeer {
                delay,
                peer_block,
                peers: Vec::new(),
            },
        );
    }

    /// Set the peer list a host answers with.
    pub fn set_peer_list(&mut self, host: &str, peers: &[&str]) {
        self.peers.entry(host.to_string()).or_default().peers =
            peers.iter().map(|p| p.to_string()).collect();
    }

    /// Hosts probed so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    async fn reach(&self, host: &str) -> Result<MockPeer, ProbeError> {
        self.calls.lock().push(host.to_string());
        let peer = self
            .peers
            .get(host)
            .cloned()
            .ok_or_else(|| ProbeError::Unreachable(host.to_string()))?;
        tokio::time::sleep(peer.delay).await;
        Ok(peer)
    }
}

#[async_trait]
impl PeerProber for MockProber {
    async fn handshake(&self, host: &str) -> Result<ProbeReport, ProbeError> {
        let peer = self.reach(host).await?;
        Ok(ProbeReport {
            peer_block: peer.peer_block,
        })
    }

    async fn peer_list(&self, host: &str) -> Result<Vec<String>, ProbeError> {
        Ok(self.reach(host).await?.peers)
    }
}
