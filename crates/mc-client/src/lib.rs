//! # Mochimo Client
//!
//! Persisted settings and the runtime that assembles the transport, peer
//! registry, quorum engine and query layers. The `mc-client` binary is a thin
//! command-line shell over [`ClientRuntime`].

pub mod logging;
pub mod runtime;
pub mod settings;

pub use logging::install_logging;
pub use runtime::{ClientRuntime, TcpRuntime};
pub use settings::{Settings, SettingsError};
