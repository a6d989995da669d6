//! # Quorum Errors

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuorumError {
    /// No candidate value reached the threshold.
    #[error("no quorum: best candidate has {best} of {required} required votes ({responders}/{sampled} peers answered)")]
    NoQuorum {
        best: usize,
        required: usize,
        responders: usize,
        sampled: usize,
    },

    /// Query was issued with no peers.
    #[error("no peers to query")]
    EmptySample,
}
