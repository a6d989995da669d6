//! # Quorum Engine
//!
//! ```text
//! Sampling → Dispatching → Awaiting → { Resolved | NoQuorum }
//! ```
//!
//! One task per peer runs the caller's per-peer operation (connect,
//! handshake, request). Successful results become votes; failures become
//! nothing. Collection stops as soon as a value reaches the threshold, the
//! threshold becomes unreachable, every task has reported, or the deadline
//! passes. Tasks still running at that point are handed to a background
//! drainer so their sessions close when they finish; their results are
//! discarded.


use crate::config::QuorumConfig;
use crate::domain::{majority, Ballot};
use crate::error::QuorumError;
use shared_types::{drain_in_background, Peer};
use std::fmt::Display;
use std::future::Future;
use std::hash::Hash;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// A resolved quorum query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuorumOutcome<T> {
    pub value: T,
    pub votes: usize,
    pub required: usize,
    pub sampled: usize,
}

/// Fans a per-peer operation out to a sample and votes on the results.
#[derive(Debug, Clone, Default)]
pub struct QuorumEngine {
    config: QuorumConfig,
}

impl QuorumEngine {
    pub fn new(config: QuorumConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QuorumConfig {
        &self.config
    }

    /// Votes required for a sample of `sampled` peers.
    pub fn threshold_for(&self, sampled: usize) -> usize {
        self.config
            .threshold_override
            .unwrap_or_else(|| majority(sampled))
    }

    /// Run `op` against every peer and return the value that reaches the
    /// threshold.
    ///
    /// Equality is exact (`Eq`); a failed peer contributes no vote.
    pub async fn query<T, E, F, Fut>(
        &self,
        peers: Vec<Peer>,
        op: F,
    ) -> Result<QuorumOutcome<T>, QuorumError>
    where
        T: Eq + Hash + Clone + Send + 'static,
        E: Display + Send + 'static,
        F: Fn(Peer) -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let sampled = peers.len();
        if sampled == 0 {
            return Err(QuorumError::EmptySample);
        }
        let required = self.threshold_for(sampled);
        if required > sampled {
            return Err(QuorumError::NoQuorum {
                best: 0,
                required,
                responders: 0,
                sampled,
            });
        }

        let mut set = JoinSet::new();
        for peer in peers {
            let host = peer.host.clone();
            let fut = op(peer);
            set.spawn(async move { (host, fut.await.map_err(|e| e.to_string())) });
        }

        let mut ballot = Ballot::new();
        let deadline = tokio::time::sleep(self.config.deadline);
        tokio::pin!(deadline);

        let outcome = loop {
            tokio::select! {
                joined = set.join_next() => match joined {
                    Some(Ok((host, Ok(value)))) => {
                        let votes = ballot.record(value.clone());
                        debug!(peer = %host, votes, required, "vote recorded");
                        if votes >= required {
                            break Ok(QuorumOutcome { value, votes, required, sampled });
                        }
                    }
                    Some(Ok((host, Err(error)))) => {
                        debug!(peer = %host, %error, "peer produced no vote");
                    }
                    Some(Err(error)) => {
                        debug!(%error, "peer task did not complete");
                    }
                    None => break Err(self.no_quorum(&ballot, required, sampled)),
                },
                _ = &mut deadline => {
                    warn!(
                        pending = set.len(),
                        responders = ballot.total(),
                        sampled,
                        "quorum deadline reached"
                    );
                    break Err(self.no_quorum(&ballot, required, sampled));
                }
            }

            if !ballot.can_reach(required, set.len()) {
                break Err(self.no_quorum(&ballot, required, sampled));
            }
        };

        drain_in_background(set);

        match &outcome {
            Ok(resolved) => info!(
                votes = resolved.votes,
                required,
                sampled,
                "quorum resolved"
            ),
            Err(error) => warn!(%error, "quorum failed"),
        }
        outcome
    }

    fn no_quorum<T: Eq + Hash>(
        &self,
        ballot: &Ballot<T>,
        required: usize,
        sampled: usize,
    ) -> QuorumError {
        QuorumError::NoQuorum {
            best: ballot.best_count(),
            required,
            responders: ballot.total(),
            sampled,
        }
    }
}
