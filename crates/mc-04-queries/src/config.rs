//! # Query Configuration

use mc_01_transport::MAX_TRAILERS_PER_REQUEST;
use std::time::Duration;

/// Settings shared by every typed query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryConfig {
    /// Peers sampled per quorum query.
    pub sample_size: usize,
    /// Download attempts for a hash-verified block.
    pub max_block_attempts: usize,
    /// Limit on a single block download attempt.
    pub download_timeout: Duration,
    /// Trailers requested per page.
    pub trailer_page_size: u32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            sample_size: 10,
            max_block_attempts: 5,
            download_timeout: Duration::from_secs(60),
            trailer_page_size: MAX_TRAILERS_PER_REQUEST,
        }
    }
}

impl QueryConfig {
    /// Create config for testing with small samples.
    pub fn for_testing() -> Self {
        Self {
            sample_size: 5,
            max_block_attempts: 3,
            download_timeout: Duration::from_millis(300),
            trailer_page_size: MAX_TRAILERS_PER_REQUEST,
        }
    }
}
