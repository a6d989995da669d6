//! # Registry Configuration

use std::time::Duration;

/// Settings for discovery, benchmarking and sampling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Hosts discovery starts from.
    pub seed_peers: Vec<String>,
    /// Number of peer-list expansion rounds.
    pub expand_depth: usize,
    /// Shared deadline for one expansion round or one benchmark batch.
    pub round_timeout: Duration,
    /// Peers probed concurrently per benchmark batch.
    pub benchmark_batch_size: usize,
    /// Latency recorded for a peer that failed or missed the deadline.
    pub failure_penalty: Duration,
    /// Skip sampling and always return the seed peers.
    pub force_seed_peers: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            seed_peers: Vec::new(),
            expand_depth: 2,
            round_timeout: Duration::from_secs(5),
            benchmark_batch_size: 10,
            failure_penalty: Duration::from_secs(10),
            force_seed_peers: false,
        }
    }
}

impl RegistryConfig {
    /// Create config for testing with shorter timeouts.
    pub fn for_testing() -> Self {
        Self {
            seed_peers: Vec::new(),
            expand_depth: 2,
            round_timeout: Duration::from_millis(200),
            benchmark_batch_size: 4,
            failure_penalty: Duration::from_secs(10),
            force_seed_peers: false,
        }
    }

    /// Builder-style seed list.
    pub fn with_seeds<I, S>(mut self, seeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.seed_peers = seeds.into_iter().map(Into::into).collect();
        self
    }
}
