//! # Domain Layer
//!
//! Vote counting with no I/O.

pub mod ballot;

pub use ballot::{majority, Ballot};
