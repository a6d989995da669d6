//! # Transaction Entry
//!
//! Multi-destination transaction as it appears in a block body and in a
//! `SUBMIT_TX` payload:
//!
//! ```text
//! header (116) | destinations ((options[2] + 1) * 44) | wots (2208) | trailer (40)
//! ```
//!
//! All integers are little-endian.

use crate::address::Address;
use crate::codec::Reader;
use crate::constants::{
    ADDR_LEN, ADDR_REF_LEN, ADDR_TAG_LEN, MAX_DESTINATIONS, MDST_LEN, TX_HEADER_LEN, TX_TRAILER_LEN,
    WOTS_ADRS_LEN, WOTS_PUBSEED_LEN, WOTS_SIG_LEN, WOTS_VAL_LEN,
};
use crate::entities::Hash;
use crate::errors::CodecError;

/// Index of the options byte holding `destination count - 1`.
const OPT_DST_COUNT: usize = 2;

/// Fixed transaction header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxHeader {
    pub options: [u8; 4],
    pub source: Address,
    pub change: Address,
    pub send_total: u64,
    pub change_total: u64,
    pub fee_total: u64,
    pub blocks_to_live: u64,
}

/// One multi-destination record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub tag: [u8; ADDR_TAG_LEN],
    pub reference: [u8; ADDR_REF_LEN],
    pub amount: u64,
}

/// WOTS+ validation data. Carried as opaque bytes; nothing here verifies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WotsValidation {
    pub signature: Box<[u8; WOTS_SIG_LEN]>,
    pub pub_seed: [u8; WOTS_PUBSEED_LEN],
    pub adrs: [u8; WOTS_ADRS_LEN],
}

impl Default for WotsValidation {
    fn default() -> Self {
        Self {
            signature: Box::new([0u8; WOTS_SIG_LEN]),
            pub_seed: [0u8; WOTS_PUBSEED_LEN],
            adrs: [0u8; WOTS_ADRS_LEN],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TxTrailer {
    pub nonce: u64,
    pub id: Hash,
}

/// A complete transaction entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxEntry {
    pub header: TxHeader,
    pub destinations: Vec<Destination>,
    pub wots: WotsValidation,
    pub trailer: TxTrailer,
}

impl TxEntry {
    /// Encoded length of an entry with `destinations` records.
    pub fn encoded_len_for(destinations: usize) -> usize {
        TX_HEADER_LEN + destinations * MDST_LEN + WOTS_VAL_LEN + TX_TRAILER_LEN
    }

    pub fn encoded_len(&self) -> usize {
        Self::encoded_len_for(self.destinations.len())
    }

    /// Decode exactly one entry; trailing bytes are an error.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let (entry, used) = Self::decode_prefix(bytes)?;
        if used != bytes.len() {
            return Err(CodecError::InvalidLength {
                record: "transaction",
                len: bytes.len(),
                expected: used,
            });
        }
        Ok(entry)
    }

    /// Decode one entry from the front of `bytes`, returning it with the
    /// number of bytes consumed. Used when walking a block body.
    pub fn decode_prefix(bytes: &[u8]) -> Result<(Self, usize), CodecError> {
        let mut r = Reader::new(bytes, "transaction");

        let options: [u8; 4] = r.array()?;
        let source = Address::decode(r.take(ADDR_LEN)?)?;
        let change = Address::decode(r.take(ADDR_LEN)?)?;
        let header = TxHeader {
            options,
            source,
            change,
            send_total: r.u64_le()?,
            change_total: r.u64_le()?,
            fee_total: r.u64_le()?,
            blocks_to_live: r.u64_le()?,
        };

        let count = usize::from(options[OPT_DST_COUNT]) + 1;
        let mut destinations = Vec::with_capacity(count);
        for _ in 0..count {
            destinations.push(Destination {
                tag: r.array()?,
                reference: r.array()?,
                amount: r.u64_le()?,
            });
        }

        let mut signature = Box::new([0u8; WOTS_SIG_LEN]);
        signature.copy_from_slice(r.take(WOTS_SIG_LEN)?);
        let wots = WotsValidation {
            signature,
            pub_seed: r.array()?,
            adrs: r.array()?,
        };

        let trailer = TxTrailer {
            nonce: r.u64_le()?,
            id: r.array()?,
        };

        let entry = Self {
            header,
            destinations,
            wots,
            trailer,
        };
        Ok((entry, r.position()))
    }

    /// Serialize the entry. The destination count byte in the options is
    /// written from `destinations.len()`, so the header value is ignored.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let count = self.destinations.len();
        if count == 0 || count > MAX_DESTINATIONS {
            return Err(CodecError::InvalidDestinationCount(count));
        }

        let mut out = Vec::with_capacity(self.encoded_len());
        let mut options = self.header.options;
        options[OPT_DST_COUNT] = (count - 1) as u8;
        out.extend_from_slice(&options);
        out.extend_from_slice(&self.header.source.encode());
        out.extend_from_slice(&self.header.change.encode());
        out.extend_from_slice(&self.header.send_total.to_le_bytes());
        out.extend_from_slice(&self.header.change_total.to_le_bytes());
        out.extend_from_slice(&self.header.fee_total.to_le_bytes());
        out.extend_from_slice(&self.header.blocks_to_live.to_le_bytes());

        for dst in &self.destinations {
            out.extend_from_slice(&dst.tag);
            out.extend_from_slice(&dst.reference);
            out.extend_from_slice(&dst.amount.to_le_bytes());
        }

        out.extend_from_slice(self.wots.signature.as_slice());
        out.extend_from_slice(&self.wots.pub_seed);
        out.extend_from_slice(&self.wots.adrs);

        out.extend_from_slice(&self.trailer.nonce.to_le_bytes());
        out.extend_from_slice(&self.trailer.id);
        Ok(out)
    }
}
