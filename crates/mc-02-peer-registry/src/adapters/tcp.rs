//! Wire-protocol prober.

use crate::error::ProbeError;
use crate::ports::{PeerProber, ProbeReport};
use async_trait::async_trait;
use mc_01_transport::{Session, TransportConfig};

/// Probes peers by opening a real session per call.
#[derive(Debug, Clone, Default)]
pub struct TcpProber {
    config: TransportConfig,
}

impl TcpProber {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl PeerProber for TcpProber {
    async fn handshake(&self, host: &str) -> Result<ProbeReport, ProbeError> {
        let session = Session::open(host, &self.config).await?;
        Ok(ProbeReport {
            peer_block: session.peer_block(),
        })
    }

    async fn peer_list(&self, host: &str) -> Result<Vec<String>, ProbeError> {
        let mut session = Session::open(host, &self.config).await?;
        if session.peer_block() == 0 {
            return Err(ProbeError::NoChain(host.to_string()));
        }
        Ok(session.get_peer_list().await?)
    }
}
