//! Logging installation for the binary.

use mc_telemetry::{init_tracing, TelemetryConfig, TelemetryError};

/// Install the global subscriber from `config`.
///
/// A subscriber already installed by the host process is kept. An invalid
/// filter directive is reported.
pub fn install_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    match init_tracing(config) {
        Err(TelemetryError::AlreadyInstalled(_)) => Ok(()),
        other => other,
    }
}
