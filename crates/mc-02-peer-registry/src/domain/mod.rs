//! # Domain Layer
//!
//! Pure registry rules with no I/O: latency smoothing and weighted sampling.

pub mod latency;
pub mod sampling;

pub use latency::{smooth_latency, to_latency_ms, MIN_LATENCY_MS};
pub use sampling::{selection_weight, weighted_sample};
