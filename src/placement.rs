//! Deterministic stand-in for decorative randomness.
//!
//! Templates scatter decorative shapes around their slides.  Drawing
//! those positions from a random source makes two renders of the same
//! slide differ, which breaks golden-image testing downstream; here the
//! values are derived from a stable per-slide key instead, so identical
//! inputs always render identically.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// `n` values in \[0, 1) derived from `key`.
///
/// Stable across runs and processes for the same key; different keys
/// give unrelated sequences.
///
/// # Example
///
/// ```
/// use legible::placement::jitter;
/// let offsets = jitter("carousel-3/slide-2", 4);
/// assert_eq!(offsets, jitter("carousel-3/slide-2", 4));
/// assert!(offsets.iter().all(|&x| (0. ..1.).contains(&x)));
/// ```
pub fn jitter(key: &str, n: usize) -> Vec<f64> {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        i.hash(&mut hasher);
        // Top 53 bits of the running hash, scaled into [0, 1).
        out.push((hasher.finish() >> 11) as f64 / (1u64 << 53) as f64);
    }
    out
}
