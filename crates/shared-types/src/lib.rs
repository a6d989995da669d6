//! # Shared Types Crate
//!
//! Domain records and the peer entity shared by every layer of the client.
//!
//! ## Design Principles
//!
//! - **Fixed layouts**: Every record has a fixed (or count-prefixed) binary
//!   layout and is parsed field by field from a byte slice. Nothing aliases a
//!   byte buffer as a typed struct.
//! - **Pure codecs**: `decode(bytes) -> record` and `encode(record) -> bytes`
//!   have no I/O and no shared state.
//! - **Decode after trust**: The query layer only decodes bytes that already
//!   won a quorum vote or passed hash verification.

pub mod address;
pub mod block;
mod codec;
pub mod constants;
pub mod entities;
pub mod errors;
pub mod tasks;
pub mod transaction;

pub use address::Address;
pub use block::{block_hash, Block, BlockHeader, BlockTrailer};
pub use constants::*;
pub use entities::{Hash, Peer};
pub use errors::CodecError;
pub use tasks::drain_in_background;
pub use transaction::{Destination, TxEntry, TxHeader, TxTrailer, WotsValidation};
