//! Ballot: distinct result value to vote count.

use std::collections::HashMap;
use std::hash::Hash;

/// Strict majority of `sampled`: `floor(sampled / 2) + 1`.
pub fn majority(sampled: usize) -> usize {
    sampled / 2 + 1
}

/// Votes for one quorum query. Lives only as long as the query.
#[derive(Debug, Clone)]
pub struct Ballot<T> {
    votes: HashMap<T, usize>,
    total: usize,
}

impl<T> Default for Ballot<T> {
    fn default() -> Self {
        Self {
            votes: HashMap::new(),
            total: 0,
        }
    }
}

impl<T: Eq + Hash> Ballot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one vote for `value`; returns its new tally.
    pub fn record(&mut self, value: T) -> usize {
        self.total += 1;
        let count = self.votes.entry(value).or_insert(0);
        *count += 1;
        *count
    }

    /// Highest tally so far (0 when empty).
    pub fn best_count(&self) -> usize {
        self.votes.values().copied().max().unwrap_or(0)
    }

    /// Number of successful responses.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Whether `threshold` can still be reached with `outstanding` more votes.
    pub fn can_reach(&self, threshold: usize, outstanding: usize) -> bool {
        self.best_count() + outstanding >= threshold
    }
}
