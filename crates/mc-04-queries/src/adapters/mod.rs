//! # Adapters
//!
//! - `TcpNodeClient`: one wire-protocol session per request
//! - `PeerRegistry` as a `PeerSampler`
//! - `MockNodeClient`, `FixedSampler`: scripted peers for tests

pub mod mock;
pub mod registry;
pub mod tcp;

pub use mock::{FixedSampler, MockNode, MockNodeClient};
pub use tcp::TcpNodeClient;
