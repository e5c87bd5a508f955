//! Monge–Elkan token-list similarity
//!
//! For token lists `A` and `B` and an inner string metric `m`:
//!
//! ```text
//! ME(A, B) = (1/|A|) · Σ_{a ∈ A} max_{b ∈ B} m(a, b)
//! ```
//!
//! The score is asymmetric: every token of `A` looks for its best partner in
//! `B`, not the other way round. [`MongeElkan::symmetric`] switches to the
//! geometric mean `√(ME(A, B) · ME(B, A))`.

use super::{clamp_score, Similarity, SmithWatermanGotoh};
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct MongeElkan {
    inner: Arc<dyn Similarity>,
    symmetric: bool,
}

impl Default for MongeElkan {
    /// Smith–Waterman–Gotoh as the inner metric, asymmetric
    fn default() -> Self {
        Self::with_inner(SmithWatermanGotoh::default())
    }
}

impl MongeElkan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_inner<M: Similarity + 'static>(inner: M) -> Self {
        Self::with_shared_inner(Arc::new(inner))
    }

    #[must_use]
    pub fn with_shared_inner(inner: Arc<dyn Similarity>) -> Self {
        Self {
            inner,
            symmetric: false,
        }
    }

    /// Average both directions with a geometric mean
    #[must_use]
    pub fn symmetric(mut self) -> Self {
        self.symmetric = true;
        self
    }

    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    #[must_use]
    pub fn inner(&self) -> &Arc<dyn Similarity> {
        &self.inner
    }

    fn directed(&self, a: &[String], b: &[String]) -> f64 {
        let total: f64 = a
            .iter()
            .map(|token| {
                b.iter()
                    .map(|other| self.inner.similarity(token.as_str(), other.as_str()))
                    .fold(0.0, f64::max)
            })
            .sum();
        total / a.len() as f64
    }
}

impl Similarity<[String]> for MongeElkan {
    fn similarity(&self, a: &[String], b: &[String]) -> f64 {
        if a == b {
            return 1.0;
        }
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let forward = self.directed(a, b);
        if !self.symmetric {
            return clamp_score(forward);
        }
        clamp_score((forward * self.directed(b, a)).sqrt())
    }

    fn name(&self) -> &'static str {
        if self.symmetric {
            "symmetric_monge_elkan"
        } else {
            "monge_elkan"
        }
    }
}

impl fmt::Debug for MongeElkan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongeElkan")
            .field("inner", &(*self.inner).name())
            .field("symmetric", &self.symmetric)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{Identity, Levenshtein};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_owned).collect()
    }

    #[test]
    fn test_default_inner_is_gotoh() {
        let me = MongeElkan::new();
        assert_eq!((**me.inner()).name(), "smith_waterman_gotoh");
        // (1 + 6/7) / 2
        let score = me.similarity(&words("test string1")[..], &words("test string2")[..]);
        assert!(approx_eq(score, 0.9286));
    }

    #[test]
    fn test_asymmetric() {
        let me = MongeElkan::with_inner(Identity);
        let short = words("test");
        let long = words("test string2");
        assert_eq!(me.similarity(&short[..], &long[..]), 1.0);
        assert!(approx_eq(me.similarity(&long[..], &short[..]), 0.5));
    }

    #[test]
    fn test_symmetric_variant() {
        let me = MongeElkan::with_inner(Identity).symmetric();
        let short = words("test");
        let long = words("test string2");
        let expected = 0.5f64.sqrt();
        assert!(approx_eq(me.similarity(&short[..], &long[..]), expected));
        assert!(approx_eq(me.similarity(&long[..], &short[..]), expected));
        assert_eq!(me.name(), "symmetric_monge_elkan");
    }

    #[test]
    fn test_empty_lists() {
        let me = MongeElkan::with_inner(Levenshtein::new());
        let none: &[String] = &[];
        let one = words("a");
        assert_eq!(me.similarity(none, none), 1.0);
        assert_eq!(me.similarity(none, &one[..]), 0.0);
        assert_eq!(me.similarity(&one[..], none), 0.0);
    }
}
