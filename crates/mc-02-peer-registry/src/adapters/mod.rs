//! # Adapters
//!
//! - `TcpProber`: probes peers over the wire protocol
//! - `MockProber`: scripted probe results for tests

pub mod mock;
pub mod tcp;

pub use mock::MockProber;
pub use tcp::TcpProber;
