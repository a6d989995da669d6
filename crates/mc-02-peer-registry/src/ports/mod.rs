//! # Ports

pub mod outbound;

pub use outbound::{PeerProber, ProbeReport};
