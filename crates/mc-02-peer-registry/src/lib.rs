//! # Peer Registry Subsystem
//!
//! Owns the set of known peers and hands out latency-weighted samples of
//! them to the query layer.
//!
//! ## Operations
//!
//! - **Expand:** breadth-first peer-list crawl from the seed peers, one
//!   shared deadline per round.
//! - **Benchmark:** concurrent handshake timing in batches; failures are
//!   recorded as a large penalty latency, and every estimate is smoothed as
//!   `(2 * old + new) / 3`.
//! - **Sample:** `n` distinct peers drawn with weight `e^(-latency_s / 2)`.
//!
//! ## Architecture
//!
//! - **Domain:** smoothing and sampling rules (pure)
//! - **Ports:** [`PeerProber`] for network access
//! - **Adapters:** [`TcpProber`] (wire protocol), [`MockProber`] (tests)
//! - **Service:** [`PeerRegistry`]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{MockProber, TcpProber};
pub use config::RegistryConfig;
pub use error::{ProbeError, RegistryError};
pub use ports::{PeerProber, ProbeReport};
pub use service::PeerRegistry;
