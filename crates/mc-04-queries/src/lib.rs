//! # Domain Queries Subsystem
//!
//! Typed questions about the network, each answered by a peer quorum.
//!
//! | Query | Agreement on | Extra step |
//! |-------|--------------|------------|
//! | latest block number | handshake block number | none |
//! | balance | full address record | none |
//! | tag resolution | full address record | none |
//! | block hash | 32-byte hash | none |
//! | block | block hash | download until one copy hashes correctly |
//! | trailers | each page's bytes | pages run concurrently |
//! | submit transaction | none | counts accepting peers |
//!
//! ## Architecture
//!
//! - **Ports:** [`NodeClient`] (one request to one peer), [`PeerSampler`]
//! - **Adapters:** [`TcpNodeClient`], the peer registry as a sampler, mocks
//! - **Service:** [`QueryService`]

pub mod adapters;
pub mod config;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{FixedSampler, MockNode, MockNodeClient, TcpNodeClient};
pub use config::QueryConfig;
pub use error::{QueryError, Result};
pub use ports::{NodeClient, PeerSampler};
pub use service::{page_ranges, QueryService};
