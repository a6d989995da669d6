//! # Message Envelope
//!
//! Every exchange with a peer is a sequence of envelopes:
//!
//! ```text
//! offset  size  field
//!      0     2  version            [4, 0]
//!      2     2  network id         0x39 0x05
//!      4     2  id1                u16 LE, chosen by the initiator
//!      6     2  id2                u16 LE, chosen by the peer on HELLO-ACK
//!      8     2  opcode             u16 LE
//!     10     8  current block      u64 LE
//!     18     8  block number       u64 LE (request argument)
//!     26    32  current hash
//!     58    32  previous hash
//!     90    32  weight
//!    122     2  payload length     u16 LE
//!    124     n  payload
//!  124+n     2  checksum           CRC-16/XMODEM of bytes [0, 124+n), LE
//!  126+n     2  trailer            0xCD 0xAB
//! ```
//!
//! The checksum is never stored on the struct. `encode` computes it and
//! `decode` validates it.

mod opcode;


pub use opcode::Opcode;

use crate::error::{Result, TransportError};
use crc::{Crc, CRC_16_XMODEM};
use shared_types::Hash;

/// Protocol version byte.
pub const PROTOCOL_VERSION: u8 = 4;
/// Network identifier, compared as big-endian bytes.
pub const NETWORK_ID: u16 = 0x3905;
/// Trailer marker, compared as big-endian bytes.
pub const TRAILER_MARKER: u16 = 0xCDAB;
/// Bytes before the payload.
pub const PREFIX_LEN: usize = 124;
/// Checksum plus trailer.
pub const SUFFIX_LEN: usize = 4;
/// Largest payload the length field can describe.
pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize;

const LEN_OFFSET: usize = 122;

const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// CRC-16/XMODEM over `bytes`.
pub fn checksum(bytes: &[u8]) -> u16 {
    CRC16.checksum(bytes)
}

/// One protocol message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub version: [u8; 2],
    pub network: [u8; 2],
    pub id1: u16,
    pub id2: u16,
    pub opcode: Opcode,
    /// Sender's current block number.
    pub current_block: u64,
    /// Request argument: a block number, or a packed `(start, count)` pair.
    pub block_num: u64,
    pub current_hash: Hash,
    pub prev_hash: Hash,
    pub weight: [u8; 32],
    pub payload: Vec<u8>,
}

impl Envelope {
    /// Empty envelope for `opcode` with protocol version and network id set.
    pub fn new(opcode: Opcode) -> Self {
        Self {
            version: [PROTOCOL_VERSION, 0],
            network: NETWORK_ID.to_be_bytes(),
            id1: 0,
            id2: 0,
            opcode,
            current_block: 0,
            block_num: 0,
            current_hash: [0; 32],
            prev_hash: [0; 32],
            weight: [0; 32],
            payload: Vec::new(),
        }
    }

    /// Envelope answering `request`, echoing its connection ids.
    pub fn reply_to(request: &Envelope, opcode: Opcode) -> Self {
        Self {
            id1: request.id1,
            id2: request.id2,
            ..Self::new(opcode)
        }
    }

    /// Attach a payload.
    pub fn with_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Pack a partial-trailer request: start in bytes 0..4, count in 4..8.
    pub fn set_trailer_range(&mut self, start: u32, count: u32) {
        let mut packed = [0u8; 8];
        packed[..4].copy_from_slice(&start.to_le_bytes());
        packed[4..].copy_from_slice(&count.to_le_bytes());
        self.block_num = u64::from_le_bytes(packed);
    }

    /// Inverse of [`Envelope::set_trailer_range`].
    pub fn trailer_range(&self) -> (u32, u32) {
        let packed = self.block_num.to_le_bytes();
        let start = u32::from_le_bytes([packed[0], packed[1], packed[2], packed[3]]);
        let count = u32::from_le_bytes([packed[4], packed[5], packed[6], packed[7]]);
        (start, count)
    }

    /// Total encoded size.
    pub fn encoded_len(&self) -> usize {
        PREFIX_LEN + self.payload.len() + SUFFIX_LEN
    }

    /// Serialize, computing the checksum over everything before it.
    pub fn encode(&self) -> Result<Vec<u8>> {
        if self.payload.len() > MAX_PAYLOAD_LEN {
            return Err(TransportError::PayloadTooLarge(self.payload.len()));
        }
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&self.version);
        out.extend_from_slice(&self.network);
        out.extend_from_slice(&self.id1.to_le_bytes());
        out.extend_from_slice(&self.id2.to_le_bytes());
        out.extend_from_slice(&self.opcode.as_u16().to_le_bytes());
        out.extend_from_slice(&self.current_block.to_le_bytes());
        out.extend_from_slice(&self.block_num.to_le_bytes());
        out.extend_from_slice(&self.current_hash);
        out.extend_from_slice(&self.prev_hash);
        out.extend_from_slice(&self.weight);
        out.extend_from_slice(&(self.payload.len() as u16).to_le_bytes());
        out.extend_from_slice(&self.payload);
        let crc = checksum(&out);
        out.extend_from_slice(&crc.to_le_bytes());
        out.extend_from_slice(&TRAILER_MARKER.to_be_bytes());
        Ok(out)
    }

    /// Payload length declared by a received prefix.
    pub fn declared_payload_len(prefix: &[u8; PREFIX_LEN]) -> usize {
        usize::from(u16::from_le_bytes([prefix[LEN_OFFSET], prefix[LEN_OFFSET + 1]]))
    }

    /// Parse and validate one complete envelope.
    ///
    /// Checks, in order: total length against the declared payload length,
    /// checksum, trailer marker, opcode range.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < PREFIX_LEN + SUFFIX_LEN {
            return Err(TransportError::MalformedEnvelope {
                len: bytes.len(),
                declared: 0,
            });
        }
        let declared =
            usize::from(u16::from_le_bytes([bytes[LEN_OFFSET], bytes[LEN_OFFSET + 1]]));
        if bytes.len() != PREFIX_LEN + declared + SUFFIX_LEN {
            return Err(TransportError::MalformedEnvelope {
                len: bytes.len(),
                declared,
            });
        }

        let crc_at = PREFIX_LEN + declared;
        let declared_crc = u16::from_le_bytes([bytes[crc_at], bytes[crc_at + 1]]);
        let computed_crc = checksum(&bytes[..crc_at]);
        if declared_crc != computed_crc {
            return Err(TransportError::ChecksumMismatch {
                declared: declared_crc,
                computed: computed_crc,
            });
        }

        let trailer = u16::from_be_bytes([bytes[crc_at + 2], bytes[crc_at + 3]]);
        if trailer != TRAILER_MARKER {
            return Err(TransportError::BadTrailer(trailer));
        }

        let u16_at = |at: usize| u16::from_le_bytes([bytes[at], bytes[at + 1]]);
        let u64_at = |at: usize| {
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[at..at + 8]);
            u64::from_le_bytes(word)
        };
        let hash_at = |at: usize| {
            let mut hash = [0u8; 32];
            hash.copy_from_slice(&bytes[at..at + 32]);
            hash
        };

        Ok(Self {
            version: [bytes[0], bytes[1]],
            network: [bytes[2], bytes[3]],
            id1: u16_at(4),
            id2: u16_at(6),
            opcode: Opcode::try_from(u16_at(8))?,
            current_block: u64_at(10),
            block_num: u64_at(18),
            current_hash: hash_at(26),
            prev_hash: hash_at(58),
            weight: hash_at(90),
            payload: bytes[PREFIX_LEN..crc_at].to_vec(),
        })
    }
}
