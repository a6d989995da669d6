//! Wire-protocol node client.

use crate::ports::NodeClient;
use async_trait::async_trait;
use mc_01_transport::{Session, TransportConfig, TransportError};
use shared_types::{Address, Hash, Peer, TxEntry};

/// Opens a fresh session for every request.
#[derive(Debug, Clone, Default)]
pub struct TcpNodeClient {
    config: TransportConfig,
}

impl TcpNodeClient {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    async fn open(&self, peer: &Peer) -> Result<Session, TransportError> {
        Session::open(&peer.host, &self.config).await
    }
}

#[async_trait]
impl NodeClient for TcpNodeClient {
    async fn latest_block_number(&self, peer: &Peer) -> Result<u64, TransportError> {
        Ok(self.open(peer).await?.peer_block())
    }

    async fn balance(&self, peer: &Peer, address: &Address) -> Result<Address, TransportError> {
        self.open(peer).await?.get_balance(address).await
    }

    async fn resolve_tag(&self, peer: &Peer, tag: &[u8]) -> Result<Address, TransportError> {
        self.open(peer).await?.resolve_tag(tag).await
    }

    async fn block_hash(&self, peer: &Peer, block_num: u64) -> Result<Hash, TransportError> {
        self.open(peer).await?.get_block_hash(block_num).await
    }

    async fn block_bytes(&self, peer: &Peer, block_num: u64) -> Result<Vec<u8>, TransportError> {
        self.open(peer).await?.get_block_bytes(block_num).await
    }

    async fn trailer_bytes(
        &self,
        peer: &Peer,
        start: u32,
        count: u32,
    ) -> Result<Vec<u8>, TransportError> {
        self.open(peer).await?.get_trailer_bytes(start, count).await
    }

    async fn submit_transaction(&self, peer: &Peer, tx: &TxEntry) -> Result<(), TransportError> {
        self.open(peer).await?.submit_transaction(tx).await
    }
}
