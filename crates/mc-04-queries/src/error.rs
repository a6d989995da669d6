//! # Query Errors

use mc_03_quorum::QuorumError;
use shared_types::CodecError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The sampled peers did not agree.
    #[error(transparent)]
    NoQuorum(#[from] QuorumError),

    /// The sampler returned no peers.
    #[error("no peers available to query")]
    NoPeers,

    /// No downloaded copy matched the agreed hash.
    #[error("block {block} failed hash verification after {attempts} attempts")]
    MaxAttemptsExceeded { block: u64, attempts: usize },

    /// A trailer page won the vote but is not a whole number of records.
    #[error("trailer page {page} is corrupt ({len} bytes)")]
    CorruptPage { page: usize, len: usize },

    /// No peer accepted a submitted transaction.
    #[error("transaction not accepted by any of {sampled} peers")]
    NotAccepted { sampled: usize },

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, QueryError>;
