//! # Mochimo Client Telemetry
//!
//! Structured logging for the client binary and the test suite.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mc_telemetry::{init_tracing, TelemetryConfig};
//!
//! fn main() {
//!     init_tracing(&TelemetryConfig::from_env()).ok();
//!     // Library crates now log through the installed subscriber
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MC_LOG_LEVEL` | `RUST_LOG`, then `info` | Log filter directive |
//! | `MC_JSON_LOGS` | `false` | JSON output instead of plain text |
//! | `MC_CONSOLE_OUTPUT` | `true` | Write logs to stderr at all |
//! | `MC_SERVICE_NAME` | `mochimo-client` | Service name on the startup event |

mod config;
mod logging;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("invalid log filter {directive:?}: {reason}")]
    InvalidFilter { directive: String, reason: String },

    /// A global subscriber is already installed.
    #[error("tracing subscriber already installed: {0}")]
    AlreadyInstalled(String),
}
