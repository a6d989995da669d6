//! # Transport Errors

use crate::envelope::Opcode;
use shared_types::CodecError;
use thiserror::Error;

/// Errors that abort a single peer session.
#[derive(Debug, Error)]
pub enum TransportError {
    /// TCP connect failed.
    #[error("failed to connect to {host}: {source}")]
    Connect {
        host: String,
        #[source]
        source: std::io::Error,
    },

    /// Host string could not be turned into a socket address.
    #[error("invalid peer host: {0}")]
    InvalidHost(String),

    /// A socket operation exceeded its deadline.
    #[error("{op} timed out")]
    Timeout { op: &'static str },

    /// The peer closed the connection on a message boundary.
    #[error("connection closed by peer")]
    Closed,

    /// The peer closed the connection in the middle of a message.
    #[error("short read: expected {expected} bytes, got {got}")]
    ShortRead { expected: usize, got: usize },

    /// Envelope checksum does not match its contents.
    #[error("checksum mismatch: declared {declared:#06x}, computed {computed:#06x}")]
    ChecksumMismatch { declared: u16, computed: u16 },

    /// Envelope trailer marker is not the protocol constant.
    #[error("invalid trailer marker {0:#06x}")]
    BadTrailer(u16),

    /// Opcode value above the highest defined opcode.
    #[error("invalid opcode {0}")]
    InvalidOpcode(u16),

    /// A valid envelope arrived with the wrong opcode for this exchange.
    #[error("unexpected opcode: expected {expected:?}, got {got:?}")]
    UnexpectedOpcode { expected: Opcode, got: Opcode },

    /// Envelope length disagrees with its declared payload length.
    #[error("malformed envelope: {len} bytes, declared payload {declared}")]
    MalformedEnvelope { len: usize, declared: usize },

    /// Payload does not fit the 16-bit length field.
    #[error("payload of {0} bytes exceeds the envelope limit")]
    PayloadTooLarge(usize),

    /// Reply payload has a length the request does not allow.
    #[error("unexpected {opcode:?} payload length {len}")]
    InvalidPayload { opcode: Opcode, len: usize },

    /// A multi-chunk file grew past the configured limit.
    #[error("file exceeds {limit} bytes")]
    FileTooLarge { limit: usize },

    /// Trailer request above the per-request limit.
    #[error("trailer count {0} exceeds per-request limit")]
    TooManyTrailers(u32),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransportError {
    /// The peer answered, but not with a well-formed protocol message.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            Self::ChecksumMismatch { .. }
                | Self::BadTrailer(_)
                | Self::InvalidOpcode(_)
                | Self::UnexpectedOpcode { .. }
                | Self::MalformedEnvelope { .. }
                | Self::InvalidPayload { .. }
                | Self::FileTooLarge { .. }
        )
    }

    /// The peer could not be reached or went away.
    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            Self::Connect { .. }
                | Self::Timeout { .. }
                | Self::Closed
                | Self::ShortRead { .. }
                | Self::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;
