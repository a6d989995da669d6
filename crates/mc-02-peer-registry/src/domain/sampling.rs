//! Latency-weighted sampling without replacement.
//!
//! Each peer gets a key `ln(u) / w` with `u` uniform in `(0, 1)` and `w` its
//! selection weight; the `n` largest keys win (Efraimidis-Spirakis). This is
//! equivalent to drawing one peer at a time with probability proportional to
//! weight and removing it, without mutating the candidate list.

use rand::Rng;
use shared_types::Peer;
use std::cmp::Ordering;

use super::latency::MIN_LATENCY_MS;

/// Selection weight `e^(-latency_seconds / 2)`.
///
/// Lower latency gives higher weight. Unmeasured peers count as
/// `MIN_LATENCY_MS`.
pub fn selection_weight(peer: &Peer) -> f64 {
    let ms = if peer.is_measured() {
        peer.latency_ms
    } else {
        MIN_LATENCY_MS
    };
    let secs = f64::from(ms) / 1000.0;
    (-secs / 2.0).exp().max(f64::MIN_POSITIVE)
}

/// Pick `n` distinct peers from `pool`. Returns the whole pool when
/// `n >= pool.len()`.
pub fn weighted_sample<R: Rng + ?Sized>(pool: &[Peer], n: usize, rng: &mut R) -> Vec<Peer> {
    if n >= pool.len() {
        return pool.to_vec();
    }

    let mut keyed: Vec<(f64, usize)> = pool
        .iter()
        .enumerate()
        .map(|(i, peer)| {
            let u: f64 = rng.gen_range(f64::MIN_POSITIVE..1.0);
            (u.ln() / selection_weight(peer), i)
        })
        .collect();

    keyed.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    keyed
        .into_iter()
        .take(n)
        .map(|(_, i)| pool[i].clone())
        .collect()
}
