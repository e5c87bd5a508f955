//! Substitution scores for the alignment kernels

use serde::{Deserialize, Serialize};

/// Score for aligning character `a` against character `b`.
///
/// Higher is better. `max`/`min` bound every value `compare` can return and
/// are used to normalise alignment scores into `[0, 1]`.
pub trait Substitution: Send + Sync + std::fmt::Debug {
    fn compare(&self, a: char, b: char) -> f64;

    fn max(&self) -> f64;

    fn min(&self) -> f64;
}

/// Constant score for equal characters, another for unequal ones
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchMismatch {
    pub matched: f64,
    pub mismatched: f64,
}

impl MatchMismatch {
    #[must_use]
    pub fn new(matched: f64, mismatched: f64) -> Self {
        Self {
            matched,
            mismatched,
        }
    }
}

impl Default for MatchMismatch {
    /// +1 for a match, −2 for a mismatch
    fn default() -> Self {
        Self::new(1.0, -2.0)
    }
}

impl Substitution for MatchMismatch {
    #[inline]
    fn compare(&self, a: char, b: char) -> f64 {
        if a == b {
            self.matched
        } else {
            self.mismatched
        }
    }

    fn max(&self) -> f64 {
        self.matched.max(self.mismatched)
    }

    fn min(&self) -> f64 {
        self.matched.min(self.mismatched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_mismatch_bounds() {
        let sub = MatchMismatch::default();
        assert_eq!(sub.compare('a', 'a'), 1.0);
        assert_eq!(sub.compare('a', 'b'), -2.0);
        assert_eq!(sub.max(), 1.0);
        assert_eq!(sub.min(), -2.0);
    }
}
