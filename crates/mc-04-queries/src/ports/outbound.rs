//! # Driven Ports (Outbound SPI)
//!
//! What the query layer needs from the outside: a way to run one request
//! against one peer, and a source of peer samples.

use async_trait::async_trait;
use mc_01_transport::TransportError;
use shared_types::{Address, Hash, Peer, TxEntry};

/// One request against one peer.
///
/// Every call is self-contained: it connects, handshakes, performs the
/// request and closes. Each call must be bounded by socket timeouts.
#[async_trait]
pub trait NodeClient: Send + Sync + 'static {
    /// The peer's current block number as announced in its handshake.
    async fn latest_block_number(&self, peer: &Peer) -> Result<u64, TransportError>;

    /// Balance of `address`; the returned address carries the amount.
    async fn balance(&self, peer: &Peer, address: &Address) -> Result<Address, TransportError>;

    /// Full address and balance for `tag`.
    async fn resolve_tag(&self, peer: &Peer, tag: &[u8]) -> Result<Address, TransportError>;

    /// Hash of block `block_num`; zero means the peer's current block.
    async fn block_hash(&self, peer: &Peer, block_num: u64) -> Result<Hash, TransportError>;

    /// Raw bytes of block `block_num`.
    async fn block_bytes(&self, peer: &Peer, block_num: u64) -> Result<Vec<u8>, TransportError>;

    /// `count` trailers starting at `start`, as one byte blob.
    async fn trailer_bytes(
        &self,
        peer: &Peer,
        start: u32,
        count: u32,
    ) -> Result<Vec<u8>, TransportError>;

    /// Hand a transaction to the peer. No reply is expected.
    async fn submit_transaction(&self, peer: &Peer, tx: &TxEntry) -> Result<(), TransportError>;
}

/// Source of peer samples for quorum queries.
pub trait PeerSampler: Send + Sync + 'static {
    /// Up to `n` distinct peers.
    fn sample(&self, n: usize) -> Vec<Peer>;
}
