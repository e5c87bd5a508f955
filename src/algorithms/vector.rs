//! Vector-space similarities over token multisets
//!
//! Each [`Multiset`] is read as a sparse vector of term counts. Counts are
//! integers, so dot products and norms are accumulated exactly in `u64` and
//! only the final ratio is computed in floating point. The result does not
//! depend on hash-map iteration order.
//!
//! # Complexity
//! - Time: O(distinct tokens of both inputs)
//! - Space: O(1) beyond the multisets

use super::{clamp_score, Similarity};
use crate::tokenize::Multiset;

/// Cosine of the angle between the two count vectors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CosineSimilarity;

impl CosineSimilarity {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Similarity<Multiset> for CosineSimilarity {
    fn similarity(&self, a: &Multiset, b: &Multiset) -> f64 {
        if a == b {
            return 1.0;
        }
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let mut dot = 0u64;
        let mut norm_a = 0u64;
        let mut norm_b = 0u64;
        for (ca, cb) in a.zip_counts(b) {
            let (ca, cb) = (ca as u64, cb as u64);
            dot += ca * cb;
            norm_a += ca * ca;
            norm_b += cb * cb;
        }

        clamp_score(dot as f64 / ((norm_a as f64).sqrt() * (norm_b as f64).sqrt()))
    }

    fn name(&self) -> &'static str {
        "cosine_similarity"
    }
}

/// Euclidean distance between count vectors, turned into a similarity
///
/// `1 − ‖a − b‖₂ / √(|a|² + |b|²)` where `|a|` is the total token count. This
/// metric keeps its own normalisation for one-sided empty input: an empty
/// multiset against `n` tokens scores above zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EuclideanDistance;

impl EuclideanDistance {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Similarity<Multiset> for EuclideanDistance {
    fn similarity(&self, a: &Multiset, b: &Multiset) -> f64 {
        if a == b {
            return 1.0;
        }

        let squared: u64 = a
            .zip_counts(b)
            .map(|(ca, cb)| {
                let d = ca.abs_diff(cb) as u64;
                d * d
            })
            .sum();
        let (len_a, len_b) = (a.len() as f64, b.len() as f64);
        let max = (len_a * len_a + len_b * len_b).sqrt();

        clamp_score(1.0 - (squared as f64).sqrt() / max)
    }

    fn zero_on_empty(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "euclidean_distance"
    }
}

/// Block (Manhattan, L1) distance turned into a similarity
///
/// `1 − ‖a − b‖₁ / (|a| + |b|)`. Over padded character q-grams this is the
/// q-grams distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockDistance;

impl BlockDistance {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Similarity<Multiset> for BlockDistance {
    fn similarity(&self, a: &Multiset, b: &Multiset) -> f64 {
        if a == b {
            return 1.0;
        }
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let l1: usize = a.zip_counts(b).map(|(ca, cb)| ca.abs_diff(cb)).sum();
        clamp_score(1.0 - l1 as f64 / (a.len() + b.len()) as f64)
    }

    fn name(&self) -> &'static str {
        "block_distance"
    }
}
