//! # Peer Registry Service
//!
//! Owns the known-host set and the measured peers. State lives behind a
//! single `RwLock`; it is only held for in-memory reads and merges, never
//! across a network call.
//!
//! - **known hosts**: every address learned from seeds or peer lists, the
//!   sampling pool
//! - **peers**: known hosts with a latency estimate


use crate::config::RegistryConfig;
use crate::domain::{smooth_latency, to_latency_ms, weighted_sample};
use crate::error::{ProbeError, RegistryError};
use crate::ports::PeerProber;
use parking_lot::RwLock;
use rand::Rng;
use shared_types::{drain_in_background, Peer};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct RegistryState {
    known: BTreeSet<String>,
    peers: BTreeMap<String, Peer>,
}

impl RegistryState {
    /// Measured entry for `host`, or an unmeasured one.
    fn peer(&self, host: &str) -> Peer {
        self.peers
            .get(host)
            .cloned()
            .unwrap_or_else(|| Peer::new(host))
    }
}

/// Known peers with discovery, benchmarking and weighted sampling.
pub struct PeerRegistry<P: PeerProber> {
    config: RegistryConfig,
    prober: Arc<P>,
    state: RwLock<RegistryState>,
}

impl<P: PeerProber> PeerRegistry<P> {
    /// Create a registry seeded from `config.seed_peers`.
    pub fn new(config: RegistryConfig, prober: Arc<P>) -> Self {
        let state = RegistryState {
            known: config.seed_peers.iter().cloned().collect(),
            peers: BTreeMap::new(),
        };
        Self {
            config,
            prober,
            state: RwLock::new(state),
        }
    }

    /// Restore previously measured peers (e.g. from persisted settings).
    pub fn with_peers(self, peers: impl IntoIterator<Item = Peer>) -> Self {
        {
            let mut state = self.state.write();
            for peer in peers {
                state.known.insert(peer.host.clone());
                state.peers.insert(peer.host.clone(), peer);
            }
        }
        self
    }

    /// Add hosts to the known set without measuring them.
    pub fn add_hosts<I, S>(&self, hosts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = self.state.write();
        state.known.extend(hosts.into_iter().map(Into::into));
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Every known host, sorted.
    pub fn known_hosts(&self) -> Vec<String> {
        self.state.read().known.iter().cloned().collect()
    }

    /// Measured peers, sorted by host.
    pub fn snapshot(&self) -> Vec<Peer> {
        self.state.read().peers.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.state.read().peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // =========================================================================
    // DISCOVERY
    // =========================================================================

    /// Expand the known set for `config.expand_depth` rounds.
    pub async fn expand(&self) -> Result<usize, RegistryError> {
        self.expand_with_depth(self.config.expand_depth).await
    }

    /// Breadth-first peer-list crawl starting from every known host.
    ///
    /// Each round queries all not-yet-queried hosts concurrently under one
    /// shared `round_timeout`. Failures and late answers contribute nothing
    /// and are not retried. Returns the number of newly learned hosts.
    pub async fn expand_with_depth(&self, depth: usize) -> Result<usize, RegistryError> {
        let mut frontier = self.known_hosts();
        if frontier.is_empty() {
            return Err(RegistryError::NoPeers);
        }
        let mut queried: HashSet<String> = HashSet::new();
        let mut discovered = 0;

        for round in 0..depth {
            frontier.retain(|host| queried.insert(host.clone()));
            if frontier.is_empty() {
                break;
            }

            let mut set = JoinSet::new();
            for host in frontier.drain(..) {
                let prober = Arc::clone(&self.prober);
                set.spawn(async move {
                    let result = prober.peer_list(&host).await;
                    (host, result)
                });
            }

            let mut learned: Vec<String> = Vec::new();
            let deadline = tokio::time::sleep(self.config.round_timeout);
            tokio::pin!(deadline);
            loop {
                tokio::select! {
                    joined = set.join_next() => match joined {
                        Some(Ok((_, Ok(hosts)))) => learned.extend(hosts),
                        Some(Ok((host, Err(e)))) => {
                            debug!(peer = %host, error = %e, "peer list request failed");
                        }
                        Some(Err(e)) => debug!(error = %e, "peer list task failed"),
                        None => break,
                    },
                    _ = &mut deadline => {
                        warn!(round, pending = set.len(), "expansion round deadline reached");
                        break;
                    }
                }
            }
            drain_in_background(set);

            let new_hosts: Vec<String> = {
                let mut state = self.state.write();
                learned
                    .into_iter()
                    .filter(|host| state.known.insert(host.clone()))
                    .collect()
            };
            debug!(round, new = new_hosts.len(), "expansion round complete");
            discovered += new_hosts.len();
            frontier = new_hosts;
        }

        info!(discovered, known = self.state.read().known.len(), "peer expansion complete");
        Ok(discovered)
    }

    // =========================================================================
    // BENCHMARKING
    // =========================================================================

    /// Benchmark every known host in batches of `benchmark_batch_size`.
    pub async fn benchmark(&self) -> Result<usize, RegistryError> {
        let hosts = self.known_hosts();
        if hosts.is_empty() {
            return Err(RegistryError::NoPeers);
        }
        Ok(self
            .benchmark_hosts(&hosts, self.config.benchmark_batch_size)
            .await)
    }

    /// Measure handshake latency for `hosts`, `batch_size` at a time.
    ///
    /// Within a batch all probes run concurrently under `round_timeout`.
    /// Failures, handshakes reporting block 0 and probes still running at
    /// the deadline are recorded as `failure_penalty`. Returns the number of successful probes.
    pub async fn benchmark_hosts(&self, hosts: &[String], batch_size: usize) -> usize {
        let mut reachable = 0;
        for batch in hosts.chunks(batch_size.max(1)) {
            let samples = self.benchmark_batch(batch).await;
            let now = unix_now();
            let mut state = self.state.write();
            for (host, sample) in samples {
                state.known.insert(host.clone());
                let peer = state
                    .peers
                    .entry(host.clone())
                    .or_insert_with(|| Peer::new(host));
                match sample {
                    Some(elapsed) => {
                        reachable += 1;
                        peer.latency_ms = smooth_latency(peer.latency_ms, to_latency_ms(elapsed));
                        peer.last_seen = Some(now);
                    }
                    None => {
                        let penalty = to_latency_ms(self.config.failure_penalty);
                        peer.latency_ms = smooth_latency(peer.latency_ms, penalty);
                    }
                }
            }
        }
        info!(probed = hosts.len(), reachable, "benchmark complete");
        reachable
    }

    async fn benchmark_batch(&self, batch: &[String]) -> Vec<(String, Option<Duration>)> {
        let mut set = JoinSet::new();
        for host in batch {
            let prober = Arc::clone(&self.prober);
            let host = host.clone();
            set.spawn(async move {
                let started = Instant::now();
                let result = match prober.handshake(&host).await {
                    Ok(report) if report.peer_block == 0 => {
                        Err(ProbeError::NoChain(host.clone()))
                    }
                    Ok(_) => Ok(started.elapsed()),
                    Err(e) => Err(e),
                };
                (host, result)
            });
        }

        let mut pending: HashSet<String> = batch.iter().cloned().collect();
        let mut samples = Vec::with_capacity(batch.len());
        let deadline = tokio::time::sleep(self.config.round_timeout);
        tokio::pin!(deadline);
        loop {
            tokio::select! {
                joined = set.join_next() => match joined {
                    Some(Ok((host, result))) => {
                        pending.remove(&host);
                        match result {
                            Ok(elapsed) => samples.push((host, Some(elapsed))),
                            Err(e) => {
                                debug!(peer = %host, error = %e, "benchmark probe failed");
                                samples.push((host, None));
                            }
                        }
                    }
                    Some(Err(e)) => debug!(error = %e, "benchmark task failed"),
                    None => break,
                },
                _ = &mut deadline => {
                    debug!(pending = pending.len(), "benchmark batch deadline reached");
                    break;
                }
            }
        }
        drain_in_background(set);

        samples.extend(pending.into_iter().map(|host| (host, None)));
        samples
    }

    // =========================================================================
    // SAMPLING
    // =========================================================================

    /// Pick `n` distinct peers, favouring low latency.
    pub fn sample(&self, n: usize) -> Vec<Peer> {
        self.sample_with_rng(n, &mut rand::thread_rng())
    }

    /// [`PeerRegistry::sample`] with an explicit random source.
    ///
    /// The pool is every known host: measured ones carry their latency,
    /// the rest are unmeasured and weigh as the fastest possible peer. With
    /// `force_seed_peers` the seed list is returned as is.
    pub fn sample_with_rng<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Peer> {
        let pool: Vec<Peer> = {
            let state = self.state.read();
            if self.config.force_seed_peers {
                return self
                    .config
                    .seed_peers
                    .iter()
                    .map(|host| state.peer(host))
                    .collect();
            }
            state.known.iter().map(|host| state.peer(host)).collect()
        };
        weighted_sample(&pool, n, rng)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
