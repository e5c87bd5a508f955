//! Identity: 1.0 for equal inputs, 0.0 for anything else

use super::Similarity;

/// Exact equality over any comparable domain
///
/// Works on strings, token lists, sets and multisets alike, which makes it the
/// usual inner metric for checking that a tokenizer or simplifier collapses
/// two inputs to the same value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl Identity {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl<T: PartialEq + ?Sized> Similarity<T> for Identity {
    #[inline]
    fn similarity(&self, a: &T, b: &T) -> f64 {
        if a == b {
            1.0
        } else {
            0.0
        }
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}
