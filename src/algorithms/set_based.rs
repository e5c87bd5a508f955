//! Set-based similarity algorithms
//!
//! - Jaccard and Overlap over [`TokenSet`]
//! - Generalized Jaccard over [`Multiset`] (min / max counts)
//! - Dice over either container
//! - Simon White: Dice over multisets of character bigrams per word
//!
//! Intersections iterate the smaller side and probe the larger one.

use super::{clamp_score, Similarity};
use crate::tokenize::{Multiset, TokenSet};

// ============================================================================
// Jaccard
// ============================================================================

/// `|A ∩ B| / |A ∪ B|` over distinct tokens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Jaccard;

impl Jaccard {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Similarity<TokenSet> for Jaccard {
    fn similarity(&self, a: &TokenSet, b: &TokenSet) -> f64 {
        if a == b {
            return 1.0;
        }
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        clamp_score(a.intersection_len(b) as f64 / a.union_len(b) as f64)
    }

    fn name(&self) -> &'static str {
        "jaccard"
    }
}

/// Jaccard generalised to counts: `Σ min(aᵢ, bᵢ) / Σ max(aᵢ, bᵢ)`
///
/// Equals [`Jaccard`] when no token repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneralizedJaccard;

impl GeneralizedJaccard {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Similarity<Multiset> for GeneralizedJaccard {
    fn similarity(&self, a: &Multiset, b: &Multiset) -> f64 {
        if a == b {
            return 1.0;
        }
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        clamp_score(a.intersection_len(b) as f64 / a.union_len(b) as f64)
    }

    fn name(&self) -> &'static str {
        "generalized_jaccard"
    }
}

// ============================================================================
// Dice
// ============================================================================

/// Sørensen–Dice coefficient: `2·|A ∩ B| / (|A| + |B|)`
///
/// Over a [`Multiset`] the intersection takes minimum counts and `|A|` is the
/// total count; over a [`TokenSet`] both are plain set sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dice;

impl Dice {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Similarity<Multiset> for Dice {
    fn similarity(&self, a: &Multiset, b: &Multiset) -> f64 {
        if a == b {
            return 1.0;
        }
        dice(a.intersection_len(b), a.len(), b.len())
    }

    fn name(&self) -> &'static str {
        "dice"
    }
}

impl Similarity<TokenSet> for Dice {
    fn similarity(&self, a: &TokenSet, b: &TokenSet) -> f64 {
        if a == b {
            return 1.0;
        }
        dice(a.intersection_len(b), a.len(), b.len())
    }

    fn name(&self) -> &'static str {
        "dice"
    }
}

#[inline]
fn dice(common: usize, len_a: usize, len_b: usize) -> f64 {
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }
    clamp_score(2.0 * common as f64 / (len_a + len_b) as f64)
}

/// Dice over word-internal character bigrams
///
/// The kernel is multiset Dice; the Simon White behaviour comes from the
/// tokenizer it is paired with (whitespace split, then bigrams of each word).
/// See [`crate::metrics::simon_white`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimonWhite;

impl SimonWhite {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Similarity<Multiset> for SimonWhite {
    fn similarity(&self, a: &Multiset, b: &Multiset) -> f64 {
        Similarity::<Multiset>::similarity(&Dice, a, b)
    }

    fn name(&self) -> &'static str {
        "simon_white"
    }
}

// ============================================================================
// Overlap
// ============================================================================

/// Overlap coefficient: `|A ∩ B| / min(|A|, |B|)`
///
/// Scores 1.0 whenever one set contains the other, so unequal inputs can
/// still score 1.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlapCoefficient;

impl OverlapCoefficient {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Similarity<TokenSet> for OverlapCoefficient {
    fn similarity(&self, a: &TokenSet, b: &TokenSet) -> f64 {
        if a == b {
            return 1.0;
        }
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        clamp_score(a.intersection_len(b) as f64 / a.len().min(b.len()) as f64)
    }

    fn name(&self) -> &'static str {
        "overlap_coefficient"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    fn set(s: &str) -> TokenSet {
        s.split_whitespace().collect()
    }

    fn bag(s: &str) -> Multiset {
        s.split_whitespace().collect()
    }

    #[test]
    fn test_jaccard() {
        let jaccard = Jaccard::new();
        assert!(approx_eq(jaccard.similarity(&set("aaa bbb ccc ddd"), &set("aaa bbb ccc eee")), 0.6));
        assert!(approx_eq(jaccard.similarity(&set("test string1"), &set("test string2")), 1.0 / 3.0));
        assert_eq!(jaccard.similarity(&set(""), &set("")), 1.0);
        assert_eq!(jaccard.similarity(&set(""), &set("a")), 0.0);
        // duplicates collapse
        assert_eq!(jaccard.similarity(&set("a a b"), &set("b a")), 1.0);
    }

    #[test]
    fn test_generalized_jaccard_uses_counts() {
        let gj = GeneralizedJaccard::new();
        assert!(approx_eq(gj.similarity(&bag("aaa bbb ccc ddd"), &bag("aaa bbb ccc eee")), 0.6));
        // min = 1, max = 3
        assert!(approx_eq(gj.similarity(&bag("a a a"), &bag("a")), 1.0 / 3.0));
        assert_eq!(gj.similarity(&bag("a"), &bag("")), 0.0);
    }

    #[test]
    fn test_dice_on_both_containers() {
        assert!(approx_eq(Dice.similarity(&bag("test string1"), &bag("test string2")), 0.5));
        assert!(approx_eq(Dice.similarity(&bag("test"), &bag("test string2")), 2.0 / 3.0));
        assert!(approx_eq(Dice.similarity(&set("test"), &set("test string2")), 2.0 / 3.0));
        // multiset: 2·1 / (3 + 1); set: 2·1 / (1 + 1)
        assert!(approx_eq(Dice.similarity(&bag("a a a"), &bag("a")), 0.5));
        assert_eq!(Dice.similarity(&set("a a a"), &set("a")), 1.0);
        assert_eq!(Dice.similarity(&bag(""), &bag("a")), 0.0);
        assert_eq!(Dice.similarity(&set(""), &set("")), 1.0);
    }

    #[test]
    fn test_simon_white_is_multiset_dice() {
        let a: Multiset = ["te", "es", "st", "st", "tr"].into_iter().collect();
        let b: Multiset = ["te", "es", "st"].into_iter().collect();
        assert!(approx_eq(SimonWhite.similarity(&a, &b), 0.75));
        assert_eq!(SimonWhite.name(), "simon_white");
    }

    #[test]
    fn test_overlap_subset_scores_one() {
        let overlap = OverlapCoefficient::new();
        assert_eq!(overlap.similarity(&set("test"), &set("test string2")), 1.0);
        assert!(approx_eq(overlap.similarity(&set("a b"), &set("b c d")), 0.5));
        assert_eq!(overlap.similarity(&set(""), &set("a")), 0.0);
    }
}
