//! # Registry Errors

use mc_01_transport::TransportError;
use thiserror::Error;

/// Failure of a single probe against one peer.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("transport: {0}")]
    Transport(#[from] TransportError),

    /// Peer could not be reached (used by non-TCP probers).
    #[error("peer {0} unreachable")]
    Unreachable(String),

    /// Handshake answered with block 0: the peer has no usable chain.
    #[error("peer {0} reports no chain")]
    NoChain(String),
}

/// Errors surfaced by registry operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Nothing to start discovery or benchmarking from.
    #[error("no seed or known peers configured")]
    NoPeers,
}
