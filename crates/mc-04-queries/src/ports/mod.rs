//! # Ports

pub mod outbound;

pub use outbound::{NodeClient, PeerSampler};
