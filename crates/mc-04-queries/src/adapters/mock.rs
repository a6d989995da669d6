use crate::ports::{NodeClient, PeerSampler};
use async_trait::async_trait;
use mc_01_transport::{Opcode, TransportError};
use parking_lot::Mutex;
use shared_types::{Address, Hash, Peer, TxEntry, ADDR_TAG_LEN, BTRAILER_LEN};
use std::collections::HashMap;
use std::time::Duration;

// =============================================================================
// MOCK NODE CLIENT (for testing)
// =============================================================================

/// Scripted state of one mock peer.
#[derive(Debug, Clone, Default)]
pub struct MockNode {
    offline: bool,
    delay: Duration,
    block_delay: Duration,
    page_delays: HashMap<u32, Duration>,
    latest_block: u64,
    hashes: HashMap<u64, Hash>,
    blocks: HashMap<u64, Vec<u8>>,
    addresses: HashMap<[u8; ADDR_TAG_LEN], Address>,
    trailer_file: Vec<u8>,
}

impl MockNode {
    /// A reachable peer at `latest_block`.
    pub fn online(latest_block: u64) -> Self {
        Self {
            latest_block,
            ..Self::default()
        }
    }

    /// A peer that never completes a handshake.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Extra pause before serving a full block.
    pub fn with_block_delay(mut self, delay: Duration) -> Self {
        self.block_delay = delay;
        self
    }

    /// Extra pause before serving the trailer page that begins at `start`.
    pub fn with_page_delay(mut self, start: u32, delay: Duration) -> Self {
        self.page_delays.insert(start, delay);
        self
    }

    pub fn with_hash(mut self, block_num: u64, hash: Hash) -> Self {
        self.hashes.insert(block_num, hash);
        self
    }

    pub fn with_block(mut self, block_num: u64, bytes: Vec<u8>) -> Self {
        self.blocks.insert(block_num, bytes);
        self
    }

    /// Ledger entry; the address's amount is its balance.
    pub fn with_address(mut self, address: Address) -> Self {
        self.addresses.insert(*address.tag(), address);
        self
    }

    /// Trailers of blocks `0..` as one contiguous file.
    pub fn with_trailers(mut self, file: Vec<u8>) -> Self {
        self.trailer_file = file;
        self
    }
}

/// Mock client answering from per-host [`MockNode`]s. Unknown hosts are
/// unreachable.
#[derive(Debug, Default)]
pub struct MockNodeClient {
    nodes: HashMap<String, MockNode>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockNodeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, host: &str, node: MockNode) {
        self.nodes.insert(host.to_string(), node);
    }

    /// `(host, request)` pairs in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }

    /// Requests whose description starts with `prefix`.
    pub fn calls_matching(&self, prefix: &str) -> Vec<(String, String)> {
        self.calls
            .lock()
            .iter()
            .filter(|(_, call)| call.starts_with(prefix))
            .cloned()
            .collect()
    }

    async fn reach(&self, peer: &Peer, call: String) -> Result<&MockNode, TransportError> {
        self.calls.lock().push((peer.host.clone(), call));
        let node = self
            .nodes
            .get(&peer.host)
            .filter(|node| !node.offline)
            .ok_or(TransportError::Timeout { op: "connect" })?;
        tokio::time::sleep(node.delay).await;
        Ok(node)
    }
}

#[async_trait]
impl NodeClient for MockNodeClient {
    async fn latest_block_number(&self, peer: &Peer) -> Result<u64, TransportError> {
        Ok(self.reach(peer, "latest".into()).await?.latest_block)
    }

    async fn balance(&self, peer: &Peer, address: &Address) -> Result<Address, TransportError> {
        let node = self.reach(peer, "balance".into()).await?;
        Ok(node
            .addresses
            .get(address.tag())
            .copied()
            .unwrap_or_else(|| address.with_amount(0)))
    }

    async fn resolve_tag(&self, peer: &Peer, tag: &[u8]) -> Result<Address, TransportError> {
        let node = self.reach(peer, "resolve".into()).await?;
        <[u8; ADDR_TAG_LEN]>::try_from(tag)
            .ok()
            .and_then(|tag| node.addresses.get(&tag).copied())
            .ok_or(TransportError::InvalidPayload {
                opcode: Opcode::SendBalance,
                len: 40,
            })
    }

    async fn block_hash(&self, peer: &Peer, block_num: u64) -> Result<Hash, TransportError> {
        let node = self.reach(peer, format!("hash {block_num}")).await?;
        let block_num = if block_num == 0 {
            node.latest_block
        } else {
            block_num
        };
        node.hashes.get(&block_num).copied().ok_or(TransportError::Closed)
    }

    async fn block_bytes(&self, peer: &Peer, block_num: u64) -> Result<Vec<u8>, TransportError> {
        let node = self.reach(peer, format!("block {block_num}")).await?;
        tokio::time::sleep(node.block_delay).await;
        node.blocks.get(&block_num).cloned().ok_or(TransportError::Closed)
    }

    async fn trailer_bytes(
        &self,
        peer: &Peer,
        start: u32,
        count: u32,
    ) -> Result<Vec<u8>, TransportError> {
        let node = self.reach(peer, format!("trailers {start} {count}")).await?;
        if let Some(delay) = node.page_delays.get(&start) {
            tokio::time::sleep(*delay).await;
        }
        let file = &node.trailer_file;
        let from = (start as usize * BTRAILER_LEN).min(file.len());
        let to = ((start as usize + count as usize) * BTRAILER_LEN).min(file.len());
        if from == to {
            return Err(TransportError::Closed);
        }
        Ok(file[from..to].to_vec())
    }

    async fn submit_transaction(&self, peer: &Peer, _tx: &TxEntry) -> Result<(), TransportError> {
        self.reach(peer, "submit".into()).await.map(|_| ())
    }
}

/// Sampler returning the first `n` of a fixed list, in order.
#[derive(Debug, Clone, Default)]
pub struct FixedSampler {
    peers: Vec<Peer>,
}

impl FixedSampler {
    pub fn new(peers: Vec<Peer>) -> Self {
        Self { peers }
    }

    pub fn from_hosts(hosts: &[&str]) -> Self {
        Self::new(hosts.iter().map(|h| Peer::new(*h)).collect())
    }
}

impl PeerSampler for FixedSampler {
    fn sample(&self, n: usize) -> Vec<Peer> {
        self.peers.iter().take(n).cloned().collect()
    }
}
