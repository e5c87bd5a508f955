//! Damerau-Levenshtein distance
//!
//! Extends Levenshtein with adjacent transpositions counted as a single edit.
//! Two variants are offered:
//!
//! - [`DamerauVariant::Unrestricted`] (default): true Damerau-Levenshtein,
//!   O(m·n) memory
//! - [`DamerauVariant::OptimalStringAlignment`]: restricted variant that never
//!   edits a substring twice, three rolling rows

use super::{EditDistance, Similarity};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Which flavour of transposition handling to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamerauVariant {
    /// True Damerau-Levenshtein; transposed characters may be edited again
    #[default]
    Unrestricted,
    /// Optimal string alignment (restricted edit distance)
    OptimalStringAlignment,
}

/// Damerau-Levenshtein similarity: `1 - distance / max(|a|, |b|)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamerauLevenshtein {
    pub variant: DamerauVariant,
}

impl DamerauLevenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricted variant (optimal string alignment)
    #[must_use]
    pub fn restricted() -> Self {
        Self {
            variant: DamerauVariant::OptimalStringAlignment,
        }
    }
}

impl EditDistance for DamerauLevenshtein {
    fn distance(&self, a: &str, b: &str) -> usize {
        match self.variant {
            DamerauVariant::Unrestricted => damerau_levenshtein(a, b),
            DamerauVariant::OptimalStringAlignment => optimal_string_alignment(a, b),
        }
    }
}

impl Similarity for DamerauLevenshtein {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        self.normalized_similarity(a, b)
    }

    fn name(&self) -> &'static str {
        match self.variant {
            DamerauVariant::Unrestricted => "damerau_levenshtein",
            DamerauVariant::OptimalStringAlignment => "optimal_string_alignment",
        }
    }
}

/// Optimal string alignment distance (restricted Damerau-Levenshtein).
///
/// Example where OSA differs from the unrestricted distance:
/// "CA" -> "ABC" is 3 here but 2 for [`damerau_levenshtein`].
#[must_use]
pub fn optimal_string_alignment(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Transpositions look two rows back
    let mut prev2: SmallVec<[usize; 64]> = smallvec::smallvec![0; n + 1];
    let mut prev: SmallVec<[usize; 64]> = (0..=n).collect();
    let mut curr: SmallVec<[usize; 64]> = smallvec::smallvec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            let mut cell = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);

            if i > 1
                && j > 1
                && a_chars[i - 1] == b_chars[j - 2]
                && a_chars[i - 2] == b_chars[j - 1]
            {
                cell = cell.min(prev2[j - 2] + 1);
            }
            curr[j] = cell;
        }

        std::mem::swap(&mut prev2, &mut prev);
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// True Damerau-Levenshtein distance (Lowrance-Wagner).
#[must_use]
pub fn damerau_levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let infinity = m + n;

    // Last row in which each char of `a` was seen
    let mut last_row: AHashMap<char, usize> = AHashMap::new();

    // (m + 2) x (n + 2) table, flattened; row/col 0 hold the sentinel
    let width = n + 2;
    let mut d = vec![0usize; (m + 2) * width];
    let at = |i: usize, j: usize| i * width + j;

    d[at(0, 0)] = infinity;
    for i in 0..=m {
        d[at(i + 1, 0)] = infinity;
        d[at(i + 1, 1)] = i;
    }
    for j in 0..=n {
        d[at(0, j + 1)] = infinity;
        d[at(1, j + 1)] = j;
    }

    for i in 1..=m {
        let mut last_match_col = 0usize;

        for j in 1..=n {
            let i1 = last_row.get(&b_chars[j - 1]).copied().unwrap_or(0);
            let j1 = last_match_col;

            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                last_match_col = j;
                0
            } else {
                1
            };

            d[at(i + 1, j + 1)] = (d[at(i, j)] + cost)
                .min(d[at(i + 1, j)] + 1)
                .min(d[at(i, j + 1)] + 1)
                .min(d[at(i1, j1)] + (i - i1 - 1) + 1 + (j - j1 - 1));
        }

        last_row.insert(a_chars[i - 1], i);
    }

    d[at(m + 1, n + 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damerau_basic() {
        assert_eq!(damerau_levenshtein("", ""), 0);
        assert_eq!(damerau_levenshtein("abc", "abc"), 0);
        assert_eq!(damerau_levenshtein("ab", "ba"), 1);
        assert_eq!(damerau_levenshtein("abc", "acb"), 1);
        assert_eq!(damerau_levenshtein("", "abc"), 3);
    }

    #[test]
    fn test_true_vs_osa() {
        assert_eq!(damerau_levenshtein("CA", "ABC"), 2);
        assert_eq!(optimal_string_alignment("CA", "ABC"), 3);
        assert_eq!(damerau_levenshtein("00210000", "001020000"), 2);
        assert_eq!(optimal_string_alignment("00210000", "001020000"), 3);
    }

    #[test]
    fn test_osa_basic() {
        assert_eq!(optimal_string_alignment("", ""), 0);
        assert_eq!(optimal_string_alignment("ab", "ba"), 1);
        assert_eq!(optimal_string_alignment("abc", ""), 3);
    }

    #[test]
    fn test_similarity_by_variant() {
        let unrestricted = DamerauLevenshtein::new();
        let restricted = DamerauLevenshtein::restricted();
        assert!((unrestricted.similarity("CA", "ABC") - (1.0 - 2.0 / 3.0)).abs() < 1e-9);
        assert_eq!(restricted.similarity("CA", "ABC"), 0.0);
        assert_eq!(unrestricted.similarity("", ""), 1.0);
        assert_eq!(restricted.name(), "optimal_string_alignment");
    }
}
