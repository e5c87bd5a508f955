//! Jaro and Jaro-Winkler similarity implementations
//!
//! Excellent for name matching and short strings.
//! Jaro-Winkler gives extra weight to common prefixes.
//!
//! ASCII inputs are compared byte-wise, everything else char-wise; both paths
//! share one generic kernel.

use super::{clamp_score, Similarity};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Jaro similarity calculator
///
/// # Complexity
/// - Time: O(m*n) for matching characters
/// - Space: O(m+n) for match flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Jaro;

impl Jaro {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Similarity for Jaro {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        jaro_similarity(a, b)
    }

    fn name(&self) -> &'static str {
        "jaro"
    }
}

/// Configuration for Jaro-Winkler similarity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JaroWinklerConfig {
    /// Prefix weight (typically 0.1, max 0.25)
    pub prefix_weight: f64,
    /// Maximum prefix length to consider (typically 4)
    pub max_prefix_length: usize,
    /// Jaro score the pair must exceed before the prefix boost applies
    pub boost_threshold: f64,
}

impl Default for JaroWinklerConfig {
    fn default() -> Self {
        Self {
            prefix_weight: 0.1,
            max_prefix_length: 4,
            boost_threshold: 0.7,
        }
    }
}

/// Jaro-Winkler similarity calculator
///
/// `jaro + ℓ·p·(1 − jaro)` where `ℓ` is the common prefix length capped at
/// `max_prefix_length` and `p` the prefix weight. The boost is skipped when
/// the Jaro score is at or below `boost_threshold`.
#[derive(Debug, Clone, PartialEq)]
pub struct JaroWinkler {
    prefix_weight: f64,
    max_prefix_length: usize,
    boost_threshold: f64,
}

impl Default for JaroWinkler {
    fn default() -> Self {
        let config = JaroWinklerConfig::default();
        Self {
            prefix_weight: config.prefix_weight,
            max_prefix_length: config.max_prefix_length,
            boost_threshold: config.boost_threshold,
        }
    }
}

impl JaroWinkler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from configuration, rejecting weights that could push the score past 1.0
    pub fn from_config(config: JaroWinklerConfig) -> Result<Self, ConfigError> {
        if !(0.0..=0.25).contains(&config.prefix_weight) {
            return Err(ConfigError::invalid(
                "prefix_weight",
                format!("must be in [0, 0.25], got {}", config.prefix_weight),
            ));
        }
        if !(0.0..=1.0).contains(&config.boost_threshold) {
            return Err(ConfigError::invalid(
                "boost_threshold",
                format!("must be in [0, 1], got {}", config.boost_threshold),
            ));
        }
        Ok(Self {
            prefix_weight: config.prefix_weight,
            max_prefix_length: config.max_prefix_length,
            boost_threshold: config.boost_threshold,
        })
    }

    /// Get current configuration
    #[must_use]
    pub fn config(&self) -> JaroWinklerConfig {
        JaroWinklerConfig {
            prefix_weight: self.prefix_weight,
            max_prefix_length: self.max_prefix_length,
            boost_threshold: self.boost_threshold,
        }
    }

    #[must_use]
    pub fn with_prefix_weight(mut self, weight: f64) -> Self {
        if !(0.0..=0.25).contains(&weight) {
            tracing::warn!(weight, "jaro-winkler prefix weight clamped to [0.0, 0.25]");
        }
        // Above 0.25 the boosted score can exceed 1.0
        self.prefix_weight = weight.clamp(0.0, 0.25);
        self
    }

    #[must_use]
    pub fn with_max_prefix_length(mut self, length: usize) -> Self {
        self.max_prefix_length = length;
        self
    }

    #[must_use]
    pub fn with_boost_threshold(mut self, threshold: f64) -> Self {
        self.boost_threshold = threshold.clamp(0.0, 1.0);
        self
    }
}

impl Similarity for JaroWinkler {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let jaro = jaro_similarity(a, b);
        if jaro <= self.boost_threshold {
            return jaro;
        }

        let prefix_len = a
            .chars()
            .zip(b.chars())
            .take(self.max_prefix_length)
            .take_while(|(ac, bc)| ac == bc)
            .count();

        clamp_score(jaro + prefix_len as f64 * self.prefix_weight * (1.0 - jaro))
    }

    fn name(&self) -> &'static str {
        "jaro_winkler"
    }
}

/// Calculate Jaro similarity between two strings.
/// Returns a value between 0.0 and 1.0.
#[inline]
#[must_use]
pub fn jaro_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }

    if a.is_ascii() && b.is_ascii() {
        return jaro_slices(a.as_bytes(), b.as_bytes());
    }

    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    jaro_slices(&a_chars, &b_chars)
}

/// Jaro-Winkler with the default configuration.
#[inline]
#[must_use]
pub fn jaro_winkler_similarity(a: &str, b: &str) -> f64 {
    JaroWinkler::default().similarity(a, b)
}

/// Jaro over any comparable units (bytes for ASCII, chars otherwise).
fn jaro_slices<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    let a_len = a.len();
    let b_len = b.len();

    if a_len == 0 && b_len == 0 {
        return 1.0;
    }
    if a_len == 0 || b_len == 0 {
        return 0.0;
    }

    let window = (a_len.max(b_len) / 2).saturating_sub(1);

    let mut a_matched: SmallVec<[bool; 64]> = smallvec::smallvec![false; a_len];
    let mut b_matched: SmallVec<[bool; 64]> = smallvec::smallvec![false; b_len];
    let mut matches = 0usize;

    for i in 0..a_len {
        let start = i.saturating_sub(window);
        let end = (i + window + 1).min(b_len);
        for j in start..end {
            if !b_matched[j] && a[i] == b[j] {
                a_matched[i] = true;
                b_matched[j] = true;
                matches += 1;
                break;
            }
        }
    }

    if matches == 0 {
        return 0.0;
    }

    // Matched chars of `b`, in order, paired against matched chars of `a`
    let b_in_order = b
        .iter()
        .zip(b_matched.iter())
        .filter_map(|(c, &hit)| hit.then_some(c));
    let half_transpositions = a
        .iter()
        .zip(a_matched.iter())
        .filter_map(|(c, &hit)| hit.then_some(c))
        .zip(b_in_order)
        .filter(|(x, y)| x != y)
        .count()
        / 2;

    let m = matches as f64;
    let t = half_transpositions as f64;
    clamp_score((m / a_len as f64 + m / b_len as f64 + (m - t) / m) / 3.0)
}
