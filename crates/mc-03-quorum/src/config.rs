//! # Quorum Configuration

use std::time::Duration;

/// Settings for one quorum round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuorumConfig {
    /// Wall-clock limit for collecting votes.
    pub deadline: Duration,
    /// Fixed vote threshold. `None` means a strict majority of the sample.
    pub threshold_override: Option<usize>,
}

impl Default for QuorumConfig {
    fn default() -> Self {
        Self {
            deadline: Duration::from_secs(5),
            threshold_override: None,
        }
    }
}

impl QuorumConfig {
    /// Create config for testing with a short deadline.
    pub fn for_testing() -> Self {
        Self {
            deadline: Duration::from_millis(300),
            threshold_override: None,
        }
    }
}
