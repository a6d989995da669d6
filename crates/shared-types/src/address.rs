//! # Address Record
//!
//! A 40-byte address: a 20-byte tag followed by 20 bytes of hashed key
//! material. Balance and tag-resolution replies append an 8-byte
//! little-endian amount; that amount is attached locally and never sent
//! when the address is used as a request payload.

use crate::codec::Reader;
use crate::constants::{ADDR_HASH_LEN, ADDR_LEN, ADDR_TAG_LEN, AMOUNT_LEN};
use crate::errors::CodecError;

/// Network address with an optional locally attached amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address {
    tag: [u8; ADDR_TAG_LEN],
    hash: [u8; ADDR_HASH_LEN],
    amount: u64,
}

impl Address {
    /// Create an address with zero amount.
    pub fn new(tag: [u8; ADDR_TAG_LEN], hash: [u8; ADDR_HASH_LEN]) -> Self {
        Self {
            tag,
            hash,
            amount: 0,
        }
    }

    /// Decode an address from exactly 40 bytes, or 48 bytes carrying the
    /// trailing amount.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() != ADDR_LEN && bytes.len() != ADDR_LEN + AMOUNT_LEN {
            return Err(CodecError::InvalidLength {
                record: "address",
                len: bytes.len(),
                expected: ADDR_LEN,
            });
        }
        let mut reader = Reader::new(bytes, "address");
        let tag = reader.array()?;
        let hash = reader.array()?;
        let amount = if reader.remaining() == AMOUNT_LEN {
            reader.u64_le()?
        } else {
            0
        };
        Ok(Self { tag, hash, amount })
    }

    /// Decode an address from a hex string (40 bytes).
    pub fn from_hex(hex_str: &str) -> Result<Self, CodecError> {
        let bytes = hex::decode(hex_str.trim())?;
        if bytes.len() != ADDR_LEN {
            return Err(CodecError::InvalidLength {
                record: "address",
                len: bytes.len(),
                expected: ADDR_LEN,
            });
        }
        Self::decode(&bytes)
    }

    /// Wire form: tag followed by hash. The amount is not included.
    pub fn encode(&self) -> [u8; ADDR_LEN] {
        let mut out = [0u8; ADDR_LEN];
        out[..ADDR_TAG_LEN].copy_from_slice(&self.tag);
        out[ADDR_TAG_LEN..].copy_from_slice(&self.hash);
        out
    }

    /// Wire form with the amount appended (balance reply layout).
    pub fn encode_with_amount(&self) -> [u8; ADDR_LEN + AMOUNT_LEN] {
        let mut out = [0u8; ADDR_LEN + AMOUNT_LEN];
        out[..ADDR_LEN].copy_from_slice(&self.encode());
        out[ADDR_LEN..].copy_from_slice(&self.amount.to_le_bytes());
        out
    }

    /// Lowercase hex of the 40-byte wire form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.encode())
    }

    pub fn tag(&self) -> &[u8; ADDR_TAG_LEN] {
        &self.tag
    }

    pub fn hash(&self) -> &[u8; ADDR_HASH_LEN] {
        &self.hash
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// Copy of this address carrying `amount`.
    pub fn with_amount(mut self, amount: u64) -> Self {
        self.amount = amount;
        self
    }

    /// An implicit address uses its own hash as tag.
    pub fn has_implicit_tag(&self) -> bool {
        self.tag == self.hash
    }
}
