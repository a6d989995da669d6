//! # Query Service
//!
//! Every query is `sample → quorum → decode`. Two queries need more:
//!
//! - **Verified block download:** the block hash is agreed by quorum first,
//!   then full blocks are downloaded from one peer at a time until one
//!   hashes to the agreed value.
//! - **Trailer ranges:** split into pages, each page quorum-queried
//!   concurrently and reassembled in request order.

mod pages;


pub use pages::page_ranges;

use crate::config::QueryConfig;
use crate::error::{QueryError, Result};
use crate::ports::{NodeClient, PeerSampler};
use futures::future::try_join_all;
use mc_03_quorum::QuorumEngine;
use shared_types::{
    block_hash, drain_in_background, Address, Block, BlockTrailer, Hash, Peer, TxEntry,
    ADDR_TAG_LEN, BTRAILER_LEN,
};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Typed, quorum-backed queries.
pub struct QueryService<C: NodeClient, S: PeerSampler> {
    client: Arc<C>,
    sampler: Arc<S>,
    engine: QuorumEngine,
    config: QueryConfig,
}

impl<C: NodeClient, S: PeerSampler> QueryService<C, S> {
    pub fn new(client: Arc<C>, sampler: Arc<S>, engine: QuorumEngine, config: QueryConfig) -> Self {
        Self {
            client,
            sampler,
            engine,
            config,
        }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    fn sample(&self) -> Result<Vec<Peer>> {
        let peers = self.sampler.sample(self.config.sample_size);
        if peers.is_empty() {
            return Err(QueryError::NoPeers);
        }
        Ok(peers)
    }

    // =========================================================================
    // SINGLE-ROUND QUERIES
    // =========================================================================

    /// Network's current block number.
    pub async fn latest_block_number(&self) -> Result<u64> {
        let client = Arc::clone(&self.client);
        let outcome = self
            .engine
            .query(self.sample()?, move |peer| {
                let client = Arc::clone(&client);
                async move { client.latest_block_number(&peer).await }
            })
            .await?;
        Ok(outcome.value)
    }

    /// Balance of `address`. Zero is a real answer when the majority says so.
    pub async fn balance(&self, address: &Address) -> Result<u64> {
        let client = Arc::clone(&self.client);
        let address = *address;
        let outcome = self
            .engine
            .query(self.sample()?, move |peer| {
                let client = Arc::clone(&client);
                async move { client.balance(&peer, &address).await }
            })
            .await?;
        Ok(outcome.value.amount())
    }

    /// [`QueryService::balance`] for a hex-encoded 40-byte address.
    pub async fn balance_hex(&self, address_hex: &str) -> Result<u64> {
        let address = Address::from_hex(address_hex)?;
        self.balance(&address).await
    }

    /// Full address (with balance) registered under `tag`.
    pub async fn resolve_tag(&self, tag: &[u8; ADDR_TAG_LEN]) -> Result<Address> {
        let client = Arc::clone(&self.client);
        let tag = *tag;
        let outcome = self
            .engine
            .query(self.sample()?, move |peer| {
                let client = Arc::clone(&client);
                async move { client.resolve_tag(&peer, &tag).await }
            })
            .await?;
        Ok(outcome.value)
    }

    /// [`QueryService::resolve_tag`] for a hex-encoded 20-byte tag.
    pub async fn resolve_tag_hex(&self, tag_hex: &str) -> Result<Address> {
        let bytes = hex::decode(tag_hex.trim())
            .map_err(|e| QueryError::InvalidInput(format!("tag: {e}")))?;
        let tag: [u8; ADDR_TAG_LEN] = bytes.as_slice().try_into().map_err(|_| {
            QueryError::InvalidInput(format!(
                "tag must be {ADDR_TAG_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        self.resolve_tag(&tag).await
    }

    /// Hash of block `block_num`; zero asks each peer for its current block.
    pub async fn block_hash(&self, block_num: u64) -> Result<Hash> {
        let client = Arc::clone(&self.client);
        let outcome = self
            .engine
            .query(self.sample()?, move |peer| {
                let client = Arc::clone(&client);
                async move { client.block_hash(&peer, block_num).await }
            })
            .await?;
        Ok(outcome.value)
    }

    // =========================================================================
    // VERIFIED BLOCK DOWNLOAD
    // =========================================================================

    /// Bytes of block `block_num`, verified against the quorum hash.
    ///
    /// Zero resolves the latest block number by quorum first. Candidates are
    /// tried one at a time, each under `download_timeout`; every attempt
    /// counts, including ones that fail to connect or time out.
    pub async fn block_bytes(&self, block_num: u64) -> Result<Vec<u8>> {
        let block_num = match block_num {
            0 => self.latest_block_number().await?,
            n => n,
        };
        let expected = self.block_hash(block_num).await?;

        let candidates = self.sampler.sample(self.config.max_block_attempts);
        if candidates.is_empty() {
            return Err(QueryError::NoPeers);
        }

        let mut attempts = 0;
        for peer in candidates.into_iter().take(self.config.max_block_attempts) {
            attempts += 1;
            let download = self.client.block_bytes(&peer, block_num);
            let bytes = match tokio::time::timeout(self.config.download_timeout, download).await {
                Ok(Ok(bytes)) => bytes,
                Ok(Err(error)) => {
                    debug!(peer = %peer.host, block = block_num, %error, "block download failed");
                    continue;
                }
                Err(_) => {
                    warn!(peer = %peer.host, block = block_num, "block download timed out");
                    continue;
                }
            };
            match block_hash(&bytes) {
                Ok(actual) if actual == expected => {
                    info!(peer = %peer.host, block = block_num, len = bytes.len(), attempts, "block verified");
                    return Ok(bytes);
                }
                _ => warn!(peer = %peer.host, block = block_num, "downloaded block does not match agreed hash"),
            }
        }

        Err(QueryError::MaxAttemptsExceeded {
            block: block_num,
            attempts,
        })
    }

    /// Decoded block `block_num` (zero for the latest).
    pub async fn block(&self, block_num: u64) -> Result<Block> {
        let bytes = self.block_bytes(block_num).await?;
        Ok(Block::decode(&bytes)?)
    }

    // =========================================================================
    // PAGINATED TRAILERS
    // =========================================================================

    /// `count` trailers starting at block `start`, in block order.
    pub async fn trailers(&self, start: u32, count: u32) -> Result<Vec<BlockTrailer>> {
        if start.checked_add(count).is_none() {
            return Err(QueryError::InvalidInput(format!(
                "trailer range {start}+{count} overflows"
            )));
        }
        let ranges = page_ranges(start, count, self.config.trailer_page_size);
        debug!(start, count, pages = ranges.len(), "fetching trailer pages");

        let pages = try_join_all(
            ranges
                .into_iter()
                .enumerate()
                .map(|(page, (first, len))| self.trailer_page(page, first, len)),
        )
        .await?;

        let file = pages.concat();
        Ok(BlockTrailer::decode_many(&file)?)
    }

    async fn trailer_page(&self, page: usize, start: u32, count: u32) -> Result<Vec<u8>> {
        let client = Arc::clone(&self.client);
        let outcome = self
            .engine
            .query(self.sample()?, move |peer| {
                let client = Arc::clone(&client);
                async move { client.trailer_bytes(&peer, start, count).await }
            })
            .await?;
        let blob = outcome.value;
        if blob.len() % BTRAILER_LEN != 0 {
            return Err(QueryError::CorruptPage {
                page,
                len: blob.len(),
            });
        }
        Ok(blob)
    }

    // =========================================================================
    // TRANSACTION SUBMISSION
    // =========================================================================

    /// Send `tx` to a sample of peers concurrently. Returns how many accepted
    /// it before the quorum deadline.
    pub async fn submit_transaction(&self, tx: &TxEntry) -> Result<usize> {
        // Reject an unencodable entry before touching the network.
        tx.encode()?;

        let peers = self.sample()?;
        let sampled = peers.len();
        let tx = Arc::new(tx.clone());

        let mut set = JoinSet::new();
        for peer in peers {
            let client = Arc::clone(&self.client);
            let tx = Arc::clone(&tx);
            set.spawn(async move {
                let result = client.submit_transaction(&peer, &tx).await;
                (peer.host, result)
            });
        }

        let mut accepted = 0;
        let deadline = tokio::time::sleep(self.engine.config().deadline);
        tokio::pin!(deadline);
        loop {
            tokio::select! {
                joined = set.join_next() => match joined {
                    Some(Ok((_, Ok(())))) => accepted += 1,
                    Some(Ok((host, Err(error)))) => {
                        debug!(peer = %host, %error, "transaction submission failed");
                    }
                    Some(Err(error)) => debug!(%error, "submission task did not complete"),
                    None => break,
                },
                _ = &mut deadline => break,
            }
        }
        drain_in_background(set);

        if accepted == 0 {
            warn!(sampled, "transaction not accepted");
            return Err(QueryError::NotAccepted { sampled });
        }
        info!(accepted, sampled, "transaction submitted");
        Ok(accepted)
    }
}
