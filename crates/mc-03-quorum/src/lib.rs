//! # Quorum Engine Subsystem
//!
//! The fan-out / aggregate pattern behind every network query.
//!
//! Peers are untrusted and may be offline, stale or wrong. A value is
//! accepted only when at least `threshold` peers returned exactly that
//! value, where the default threshold is a strict majority of the *sample
//! size* (not of the responders). Failing peers contribute no vote, and a
//! plurality answer is never substituted for a missing majority.
//!
//! ## Example
//!
//! ```no_run
//! use mc_03_quorum::{QuorumConfig, QuorumEngine};
//! use shared_types::Peer;
//!
//! # async fn run() -> Result<(), mc_03_quorum::QuorumError> {
//! let engine = QuorumEngine::new(QuorumConfig::default());
//! let peers = vec![Peer::new("10.0.0.1"), Peer::new("10.0.0.2"), Peer::new("10.0.0.3")];
//! let outcome = engine
//!     .query(peers, |peer| async move { Ok::<_, String>(peer.host.len()) })
//!     .await?;
//! println!("{} votes for {}", outcome.votes, outcome.value);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;

pub use config::QuorumConfig;
pub use domain::{majority, Ballot};
pub use engine::{QuorumEngine, QuorumOutcome};
pub use error::QuorumError;
