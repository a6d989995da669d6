//! # Block Records
//!
//! ```text
//! header (32, or 4 for a pseudo-block) | body (tx entries) | trailer (160)
//! ```
//!
//! The header starts with its own length word. A pseudo-block carries only
//! that word and no transactions.

use crate::codec::Reader;
use crate::constants::{
    ADDR_TAG_LEN, BHEADER_LEN, BTRAILER_LEN, HASH_LEN, PSEUDO_BHEADER_LEN,
};
use crate::entities::Hash;
use crate::errors::CodecError;
use crate::transaction::TxEntry;
use sha2::{Digest, Sha256};

/// Block header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    pub hdrlen: u32,
    pub miner_tag: [u8; ADDR_TAG_LEN],
    pub miner_reward: u64,
}

impl BlockHeader {
    /// Header for a pseudo-block (length word only).
    pub fn pseudo() -> Self {
        Self {
            hdrlen: PSEUDO_BHEADER_LEN as u32,
            miner_tag: [0; ADDR_TAG_LEN],
            miner_reward: 0,
        }
    }

    pub fn is_pseudo(&self) -> bool {
        self.hdrlen as usize == PSEUDO_BHEADER_LEN
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut r = Reader::new(bytes, "block header");
        let hdrlen = r.u32_le()?;
        match hdrlen as usize {
            PSEUDO_BHEADER_LEN => Ok(Self::pseudo()),
            BHEADER_LEN => Ok(Self {
                hdrlen,
                miner_tag: r.array()?,
                miner_reward: r.u64_le()?,
            }),
            _ => Err(CodecError::InvalidHeaderLength(hdrlen)),
        }
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.hdrlen.to_le_bytes());
        if !self.is_pseudo() {
            out.extend_from_slice(&self.miner_tag);
            out.extend_from_slice(&self.miner_reward.to_le_bytes());
        }
    }
}

/// Fixed 160-byte block trailer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockTrailer {
    pub phash: Hash,
    pub bnum: u64,
    pub mfee: u64,
    pub tcount: u32,
    pub time0: u32,
    pub difficulty: u32,
    pub mroot: Hash,
    pub nonce: [u8; HASH_LEN],
    pub stime: u32,
    pub bhash: Hash,
}

impl BlockTrailer {
    /// Decode exactly one 160-byte trailer.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() != BTRAILER_LEN {
            return Err(CodecError::InvalidLength {
                record: "block trailer",
                len: bytes.len(),
                expected: BTRAILER_LEN,
            });
        }
        let mut r = Reader::new(bytes, "block trailer");
        Ok(Self {
            phash: r.array()?,
            bnum: r.u64_le()?,
            mfee: r.u64_le()?,
            tcount: r.u32_le()?,
            time0: r.u32_le()?,
            difficulty: r.u32_le()?,
            mroot: r.array()?,
            nonce: r.array()?,
            stime: r.u32_le()?,
            bhash: r.array()?,
        })
    }

    /// Split a trailer file into records. The length must be a multiple of 160.
    pub fn decode_many(bytes: &[u8]) -> Result<Vec<Self>, CodecError> {
        if bytes.len() % BTRAILER_LEN != 0 {
            return Err(CodecError::InvalidLength {
                record: "trailer file",
                len: bytes.len(),
                expected: bytes.len() - bytes.len() % BTRAILER_LEN,
            });
        }
        bytes.chunks_exact(BTRAILER_LEN).map(Self::decode).collect()
    }

    pub fn encode(&self) -> [u8; BTRAILER_LEN] {
        let mut out = [0u8; BTRAILER_LEN];
        let mut pos = 0;
        let mut put = |field: &[u8]| {
            out[pos..pos + field.len()].copy_from_slice(field);
            pos += field.len();
        };
        put(&self.phash);
        put(&self.bnum.to_le_bytes());
        put(&self.mfee.to_le_bytes());
        put(&self.tcount.to_le_bytes());
        put(&self.time0.to_le_bytes());
        put(&self.difficulty.to_le_bytes());
        put(&self.mroot);
        put(&self.nonce);
        put(&self.stime.to_le_bytes());
        put(&self.bhash);
        out
    }
}

/// A full block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub header: BlockHeader,
    pub body: Vec<TxEntry>,
    pub trailer: BlockTrailer,
}

impl Block {
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() < PSEUDO_BHEADER_LEN + BTRAILER_LEN {
            return Err(CodecError::Truncated {
                record: "block",
                offset: 0,
                needed: PSEUDO_BHEADER_LEN + BTRAILER_LEN,
                available: bytes.len(),
            });
        }
        let header = BlockHeader::decode(bytes)?;
        let hdrlen = header.hdrlen as usize;
        let trailer_at = bytes.len() - BTRAILER_LEN;
        if hdrlen > trailer_at {
            return Err(CodecError::HeaderOverrun {
                hdrlen,
                block_len: bytes.len(),
            });
        }

        let body_bytes = &bytes[hdrlen..trailer_at];
        if header.is_pseudo() && !body_bytes.is_empty() {
            return Err(CodecError::PseudoBlockBody(body_bytes.len()));
        }

        let mut body = Vec::new();
        let mut offset = 0;
        while offset < body_bytes.len() {
            let (tx, used) = TxEntry::decode_prefix(&body_bytes[offset..])?;
            body.push(tx);
            offset += used;
        }

        Ok(Self {
            header,
            body,
            trailer: BlockTrailer::decode(&bytes[trailer_at..])?,
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::new();
        self.header.encode_into(&mut out);
        for tx in &self.body {
            out.extend_from_slice(&tx.encode()?);
        }
        out.extend_from_slice(&self.trailer.encode());
        Ok(out)
    }

    pub fn number(&self) -> u64 {
        self.trailer.bnum
    }
}

/// SHA-256 over the block bytes excluding the trailing 32-byte hash field.
pub fn block_hash(bytes: &[u8]) -> Result<Hash, CodecError> {
    if bytes.len() < HASH_LEN {
        return Err(CodecError::Truncated {
            record: "block",
            offset: 0,
            needed: HASH_LEN,
            available: bytes.len(),
        });
    }
    Ok(Sha256::digest(&bytes[..bytes.len() - HASH_LEN]).into())
}
