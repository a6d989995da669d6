//! Latency bookkeeping.

use std::time::Duration;

/// Smallest recorded latency. Zero is reserved for "never measured".
pub const MIN_LATENCY_MS: u32 = 1;

/// Convert a measured duration to stored milliseconds, clamped to
/// `MIN_LATENCY_MS..=u32::MAX`.
pub fn to_latency_ms(elapsed: Duration) -> u32 {
    u32::try_from(elapsed.as_millis())
        .unwrap_or(u32::MAX)
        .max(MIN_LATENCY_MS)
}

/// Blend a new sample into the stored estimate: `(2 * old + new) / 3`.
///
/// An unmeasured peer (`old == 0`) takes the sample as is.
pub fn smooth_latency(old_ms: u32, sample_ms: u32) -> u32 {
    if old_ms == 0 {
        return sample_ms.max(MIN_LATENCY_MS);
    }
    let blended = (2 * u64::from(old_ms) + u64::from(sample_ms)) / 3;
    (blended as u32).max(MIN_LATENCY_MS)
}
