//! Core string similarity algorithms
//!
//! Each kernel is a small value type implementing [`Similarity`] over the
//! domain it understands: raw strings, token lists, token sets or token
//! multisets. The [`pipeline`](crate::pipeline) module lifts the token kernels
//! to strings by running a simplifier and a tokenizer in front of them.
//!
//! Character-level kernels operate on Unicode scalar values (`char`), never on
//! bytes and never on grapheme clusters.

pub mod alignment;
pub mod damerau;
pub mod identity;
pub mod jaro;
pub mod lcs;
pub mod levenshtein;
pub mod monge_elkan;
pub mod phonetic;
pub mod set_based;
pub mod substitution;
pub mod vector;

pub use alignment::*;
pub use damerau::*;
pub use identity::*;
pub use jaro::*;
pub use lcs::*;
pub use levenshtein::*;
pub use monge_elkan::*;
pub use phonetic::*;
pub use set_based::*;
pub use substitution::*;
pub use vector::*;

/// Trait for all similarity metrics.
///
/// Returns a value between 0.0 (completely different) and 1.0 (identical).
/// `T` is the domain the metric compares; it defaults to `str` so plain
/// string metrics read as `impl Similarity for Jaro`.
pub trait Similarity<T: ?Sized = str>: Send + Sync {
    fn similarity(&self, a: &T, b: &T) -> f64;

    /// Convenience method for distance (1.0 - similarity)
    fn distance(&self, a: &T, b: &T) -> f64 {
        1.0 - self.similarity(a, b)
    }

    /// Whether one empty side forces a score of 0 when the metric runs
    /// inside a [`StringMetric`](crate::pipeline::StringMetric). Metrics
    /// with their own normalisation for empty input return false.
    fn zero_on_empty(&self) -> bool {
        true
    }

    /// Name of the algorithm for debugging/logging
    fn name(&self) -> &'static str;
}

/// Trait for edit distance algorithms that return integer distances
pub trait EditDistance: Send + Sync {
    fn distance(&self, a: &str, b: &str) -> usize;

    /// Convert to normalized similarity score (0.0 to 1.0)
    fn normalized_similarity(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }
        let max_len = a.chars().count().max(b.chars().count());
        if max_len == 0 {
            1.0
        } else {
            clamp_score(1.0 - (self.distance(a, b) as f64 / max_len as f64))
        }
    }
}

impl<T: ?Sized, S: Similarity<T> + ?Sized> Similarity<T> for std::sync::Arc<S> {
    fn similarity(&self, a: &T, b: &T) -> f64 {
        (**self).similarity(a, b)
    }

    fn zero_on_empty(&self) -> bool {
        (**self).zero_on_empty()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Force a raw score into `[0, 1]`; NaN collapses to 0.
#[inline]
#[must_use]
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}
