//! # Error Types
//!
//! Errors raised by the domain record codecs.

use thiserror::Error;

/// Errors that can occur while decoding or encoding a domain record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The input ended before a field could be read.
    #[error("{record} truncated at offset {offset}: need {needed} bytes, {available} available")]
    Truncated {
        record: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// The input has a length the record layout does not allow.
    #[error("{record} has invalid length {len} (expected {expected})")]
    InvalidLength {
        record: &'static str,
        len: usize,
        expected: usize,
    },

    /// Block header length word is neither a normal nor a pseudo-block header.
    #[error("invalid block header length {0}")]
    InvalidHeaderLength(u32),

    /// Header length points past the trailer.
    #[error("block header length {hdrlen} exceeds block size {block_len}")]
    HeaderOverrun { hdrlen: usize, block_len: usize },

    /// A pseudo-block carries body bytes.
    #[error("pseudo-block carries {0} body bytes")]
    PseudoBlockBody(usize),

    /// Transaction destination count outside 1..=256.
    #[error("invalid destination count {0}")]
    InvalidDestinationCount(usize),

    /// Hex input could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for CodecError {
    fn from(err: hex::FromHexError) -> Self {
        Self::InvalidHex(err.to_string())
    }
}
