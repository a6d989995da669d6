//! # Record Layout Constants
//!
//! Byte lengths of every fixed-size field used by the domain codecs.

/// Length of a block or transaction hash (SHA-256).
pub const HASH_LEN: usize = 32;

/// Length of an address tag.
pub const ADDR_TAG_LEN: usize = 20;
/// Length of the hashed key material of an address.
pub const ADDR_HASH_LEN: usize = 20;
/// Length of a full address (tag + hash).
pub const ADDR_LEN: usize = ADDR_TAG_LEN + ADDR_HASH_LEN;
/// Length of an optional destination reference.
pub const ADDR_REF_LEN: usize = 16;
/// Length of an amount field.
pub const AMOUNT_LEN: usize = 8;

/// WOTS+ signature length.
pub const WOTS_SIG_LEN: usize = 2144;
/// WOTS+ public seed length.
pub const WOTS_PUBSEED_LEN: usize = 32;
/// WOTS+ hash function address scheme length.
pub const WOTS_ADRS_LEN: usize = 32;

/// Block trailer length.
pub const BTRAILER_LEN: usize = 160;
/// Header length of a normal block.
pub const BHEADER_LEN: usize = 32;
/// Header length of a pseudo-block (only the length word, no body).
pub const PSEUDO_BHEADER_LEN: usize = 4;

/// Transaction header length.
pub const TX_HEADER_LEN: usize = 4 + ADDR_LEN * 2 + AMOUNT_LEN * 4;
/// Multi-destination record length.
pub const MDST_LEN: usize = ADDR_TAG_LEN + ADDR_REF_LEN + AMOUNT_LEN;
/// Maximum destinations in one transaction.
pub const MAX_DESTINATIONS: usize = 256;
/// WOTS+ validation block length.
pub const WOTS_VAL_LEN: usize = WOTS_SIG_LEN + WOTS_PUBSEED_LEN + WOTS_ADRS_LEN;
/// Transaction trailer length (nonce + id).
pub const TX_TRAILER_LEN: usize = 8 + HASH_LEN;
