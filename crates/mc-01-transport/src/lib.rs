//! # Transport Subsystem
//!
//! Framed request/response protocol used to talk to a single peer.
//!
//! ## Layers
//!
//! - **Envelope:** fixed 124-byte prefix, 16-bit length-bounded payload,
//!   CRC-16/XMODEM checksum and a constant trailer marker.
//! - **Session:** one TCP connection; HELLO / HELLO-ACK handshake, exact
//!   reads, multi-chunk file receive.
//! - **Requests:** peer list, balance, tag resolution, block hash, block
//!   bytes, trailer ranges, transaction submission.
//!
//! ## Failure Semantics
//!
//! Any socket error, timeout, checksum or trailer mismatch, or unexpected
//! opcode aborts the session with a [`TransportError`]. The transport never
//! retries.
//!
//! ## Example
//!
//! ```no_run
//! use mc_01_transport::{Session, TransportConfig};
//!
//! # async fn run() -> mc_01_transport::Result<()> {
//! let config = TransportConfig::default();
//! let mut session = Session::open("10.0.0.1", &config).await?;
//! let hash = session.get_block_hash(0).await?;
//! println!("block {} hash {:02x?}", session.peer_block(), hash);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod envelope;
pub mod error;
pub mod session;

pub use config::{TransportConfig, DEFAULT_PORT};
pub use envelope::{checksum, Envelope, Opcode};
pub use error::{Result, TransportError};
pub use session::{split_host, Session, MAX_TRAILERS_PER_REQUEST};
