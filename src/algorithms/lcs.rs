//! Longest common subsequence and substring
//!
//! Both similarities divide the common length by `max(|a|, |b|)`.
//!
//! # Complexity
//! - Time: O(m*n)
//! - Space: O(min(m, n)), two rolling rows

use super::{clamp_score, Similarity};
use smallvec::SmallVec;

type Chars = SmallVec<[char; 64]>;

/// Similarity from the longest common subsequence (gaps allowed)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LongestCommonSubsequence;

impl LongestCommonSubsequence {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Similarity for LongestCommonSubsequence {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        normalized_by_max(a, b, lcs_length_chars)
    }

    fn name(&self) -> &'static str {
        "longest_common_subsequence"
    }
}

/// Similarity from the longest common substring (contiguous)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LongestCommonSubstring;

impl LongestCommonSubstring {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Similarity for LongestCommonSubstring {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        normalized_by_max(a, b, substring_length_chars)
    }

    fn name(&self) -> &'static str {
        "longest_common_substring"
    }
}

fn normalized_by_max(a: &str, b: &str, length: fn(&[char], &[char]) -> usize) -> f64 {
    if a == b {
        return 1.0;
    }
    let a: Chars = a.chars().collect();
    let b: Chars = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    clamp_score(length(&a, &b) as f64 / a.len().max(b.len()) as f64)
}

/// Calculate the length of the Longest Common Subsequence.
#[must_use]
pub fn lcs_length(a: &str, b: &str) -> usize {
    let a: Chars = a.chars().collect();
    let b: Chars = b.chars().collect();
    lcs_length_chars(&a, &b)
}

/// Length of the longest common contiguous substring.
#[must_use]
pub fn longest_common_substring_length(a: &str, b: &str) -> usize {
    let a: Chars = a.chars().collect();
    let b: Chars = b.chars().collect();
    substring_length_chars(&a, &b)
}

fn lcs_length_chars(a: &[char], b: &[char]) -> usize {
    // Columns follow the shorter input
    let (rows, cols) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if cols.is_empty() {
        return 0;
    }

    let mut prev: SmallVec<[usize; 64]> = smallvec::smallvec![0; cols.len() + 1];
    let mut curr: SmallVec<[usize; 64]> = smallvec::smallvec![0; cols.len() + 1];

    for &rc in rows {
        for (j, &cc) in cols.iter().enumerate() {
            curr[j + 1] = if rc == cc {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[cols.len()]
}

fn substring_length_chars(a: &[char], b: &[char]) -> usize {
    let (rows, cols) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if cols.is_empty() {
        return 0;
    }

    let mut prev: SmallVec<[usize; 64]> = smallvec::smallvec![0; cols.len() + 1];
    let mut curr: SmallVec<[usize; 64]> = smallvec::smallvec![0; cols.len() + 1];
    let mut longest = 0;

    for &rc in rows {
        for (j, &cc) in cols.iter().enumerate() {
            curr[j + 1] = if rc == cc { prev[j] + 1 } else { 0 };
            longest = longest.max(curr[j + 1]);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    longest
}
