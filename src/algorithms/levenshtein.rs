//! Levenshtein (edit) distance
//!
//! Unit-cost insertions, deletions and substitutions over `char`s.
//!
//! - Myers bit-parallel algorithm when the shorter input fits in 64 chars
//! - Two-row DP fallback for longer inputs
//!
//! Memory per call is `O(min(|a|, |b|))`.

use super::{EditDistance, Similarity};
use ahash::AHashMap;
use smallvec::SmallVec;

/// Pattern length handled by a single 64-bit Myers word
const MYERS_WORD: usize = 64;

/// Levenshtein similarity: `1 - distance / max(|a|, |b|)`
///
/// # Complexity
/// - Time: O(⌈m/64⌉·n) for m ≤ 64, O(m·n) otherwise
/// - Space: O(min(m, n))
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Levenshtein;

impl Levenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl EditDistance for Levenshtein {
    fn distance(&self, a: &str, b: &str) -> usize {
        levenshtein(a, b)
    }
}

impl Similarity for Levenshtein {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        self.normalized_similarity(a, b)
    }

    fn name(&self) -> &'static str {
        "levenshtein"
    }
}

/// Edit distance between two strings, counted in chars.
///
/// # Example
/// ```
/// use fuzzysim::algorithms::levenshtein::levenshtein;
///
/// assert_eq!(levenshtein("kitten", "sitting"), 3);
/// ```
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();

    levenshtein_chars(&a_chars, &b_chars)
}

/// Normalized similarity (0.0 to 1.0); two empty strings score 1.0.
#[must_use]
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    Levenshtein.similarity(a, b)
}

/// Myers (1999) bit-vector edit distance. `pattern` must be 1..=64 chars.
#[inline]
fn myers_64(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();

    // peq[c] has bit i set where pattern[i] == c
    let mut peq: AHashMap<char, u64> = AHashMap::with_capacity(m.min(32));
    for (i, &c) in pattern.iter().enumerate() {
        *peq.entry(c).or_insert(0) |= 1u64 << i;
    }

    let mut vp: u64 = !0;
    let mut vn: u64 = 0;
    let mut score = m;
    let last = 1u64 << (m - 1);

    for c in text {
        let eq = peq.get(c).copied().unwrap_or(0);
        let xv = eq | vn;
        let xh = (((eq & vp).wrapping_add(vp)) ^ vp) | eq;

        let hp = vn | !(xh | vp);
        let hn = vp & xh;

        if hp & last != 0 {
            score += 1;
        } else if hn & last != 0 {
            score -= 1;
        }

        // Row 0 grows by one per text char, hence the injected 1
        let hp = (hp << 1) | 1;
        let hn = hn << 1;

        vp = hn | !(xv | hp);
        vn = hp & xv;
    }

    score
}

/// Two-row DP; `short` indexes the columns.
fn dp_distance(short: &[char], long: &[char]) -> usize {
    let cols = short.len();
    let mut prev: Vec<usize> = (0..=cols).collect();
    let mut curr: Vec<usize> = vec![0; cols + 1];

    for (i, &lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for j in 0..cols {
            let substitution = prev[j] + usize::from(lc != short[j]);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[cols]
}

/// Edit distance over char slices; the shorter side becomes the bit-parallel pattern.
fn levenshtein_chars(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }
    let (pattern, text) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if pattern.len() <= MYERS_WORD {
        myers_64(pattern, text)
    } else {
        dp_distance(pattern, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_levenshtein_basic() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("saturday", "sunday"), 3);
    }

    #[test]
    fn test_myers_algorithm() {
        assert_eq!(levenshtein("algorithm", "altruistic"), 6);
        assert_eq!(levenshtein("intention", "execution"), 5);
        assert_eq!(levenshtein("a", "b"), 1);
        assert_eq!(levenshtein("ab", "ba"), 2);
    }

    #[test]
    fn test_long_input_uses_dp() {
        let a = "a".repeat(80);
        let mut b = "a".repeat(79);
        b.push('b');
        assert_eq!(levenshtein(&a, &b), 1);
        assert_eq!(dp_distance(&['k', 'i', 't'], &['s', 'i', 't', 's']), 2);
    }

    #[test]
    fn test_levenshtein_unicode() {
        assert_eq!(levenshtein("café", "cafe"), 1);
        assert_eq!(levenshtein("日本語", "日本"), 1);
    }

    #[test]
    fn test_similarity() {
        assert_eq!(levenshtein_similarity("", ""), 1.0);
        assert_eq!(levenshtein_similarity("", "abc"), 0.0);
        assert!(approx_eq(levenshtein_similarity("test string1", "test string2"), 11.0 / 12.0));
        assert!(approx_eq(levenshtein_similarity("kitten", "sitting"), 1.0 - 3.0 / 7.0));
    }

    #[test]
    fn test_struct_reports_both_views() {
        assert_eq!(EditDistance::distance(&Levenshtein, "flaw", "lawn"), 2);
        assert!(approx_eq(Levenshtein.similarity("flaw", "lawn"), 0.5));
        assert_eq!(Levenshtein.name(), "levenshtein");
    }
}
