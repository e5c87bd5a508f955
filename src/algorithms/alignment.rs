//! Sequence alignment kernels
//!
//! - [`NeedlemanWunch`]: global alignment, constant gap cost
//! - [`SmithWaterman`]: local alignment, linear gap, optional window
//! - [`SmithWatermanGotoh`]: local alignment with affine gaps
//!
//! No traceback is produced, only the score.
//! Memory per call is `O(|b|)`, except `SmithWaterman` with a window, which
//! fills the full `O(|a|·|b|)` table.

use super::substitution::{MatchMismatch, Substitution};
use super::{clamp_score, Similarity};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::Arc;

type Chars = SmallVec<[char; 64]>;

fn check_gap(gap: f64) -> Result<f64, ConfigError> {
    if gap.is_finite() && gap >= 0.0 {
        Ok(gap)
    } else {
        Err(ConfigError::InvalidGap(gap))
    }
}

// ============================================================================
// Needleman-Wunch
// ============================================================================

/// Parameters for [`NeedlemanWunch`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeedlemanWunchConfig {
    /// Cost paid for every gap character
    pub gap_cost: f64,
    /// Scores for aligned characters; costs are the negated scores
    pub substitution: MatchMismatch,
}

impl Default for NeedlemanWunchConfig {
    fn default() -> Self {
        Self {
            gap_cost: 2.0,
            substitution: MatchMismatch::new(0.0, -2.0),
        }
    }
}

/// Needleman-Wunch global alignment.
///
/// The alignment cost is the cheapest way to align every char of both inputs,
/// where a gap char costs `gap_cost` and aligning `x` against `y` costs
/// `-σ(x, y)`. Similarity is
/// `1 − cost / (max(|a|, |b|) · max(gap_cost, max|σ|))`.
#[derive(Debug, Clone)]
pub struct NeedlemanWunch {
    gap_cost: f64,
    substitution: Arc<dyn Substitution>,
}

impl Default for NeedlemanWunch {
    fn default() -> Self {
        let config = NeedlemanWunchConfig::default();
        Self {
            gap_cost: config.gap_cost,
            substitution: Arc::new(config.substitution),
        }
    }
}

impl NeedlemanWunch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: NeedlemanWunchConfig) -> Result<Self, ConfigError> {
        Self::with_substitution(config.gap_cost, Arc::new(config.substitution))
    }

    pub fn with_substitution(
        gap_cost: f64,
        substitution: Arc<dyn Substitution>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            gap_cost: check_gap(gap_cost)?,
            substitution,
        })
    }

    /// Minimal global alignment cost.
    #[must_use]
    pub fn alignment_cost(&self, a: &str, b: &str) -> f64 {
        let a: Chars = a.chars().collect();
        let b: Chars = b.chars().collect();
        self.cost_chars(&a, &b)
    }

    fn cost_chars(&self, a: &[char], b: &[char]) -> f64 {
        let g = self.gap_cost;
        let mut prev: SmallVec<[f64; 64]> = (0..=b.len()).map(|j| j as f64 * g).collect();
        let mut curr: SmallVec<[f64; 64]> = smallvec::smallvec![0.0; b.len() + 1];

        for (i, &ac) in a.iter().enumerate() {
            curr[0] = (i + 1) as f64 * g;
            for (j, &bc) in b.iter().enumerate() {
                let aligned = prev[j] - self.substitution.compare(ac, bc);
                curr[j + 1] = aligned.min(prev[j + 1] + g).min(curr[j] + g);
            }
            std::mem::swap(&mut prev, &mut curr);
        }

        prev[b.len()]
    }
}

impl Similarity for NeedlemanWunch {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }
        let a: Chars = a.chars().collect();
        let b: Chars = b.chars().collect();
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let worst_step = self
            .gap_cost
            .max(self.substitution.max().abs())
            .max(self.substitution.min().abs());
        let max_cost = a.len().max(b.len()) as f64 * worst_step;
        if max_cost == 0.0 {
            return 1.0;
        }
        clamp_score(1.0 - self.cost_chars(&a, &b) / max_cost)
    }

    fn name(&self) -> &'static str {
        "needleman_wunch"
    }
}

// ============================================================================
// Smith-Waterman
// ============================================================================

/// Parameters for [`SmithWaterman`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmithWatermanConfig {
    /// Penalty per gap character
    pub gap_penalty: f64,
    pub substitution: MatchMismatch,
    /// Longest gap considered, in chars; `None` means unbounded
    pub window_size: Option<usize>,
}

impl Default for SmithWatermanConfig {
    fn default() -> Self {
        Self {
            gap_penalty: 0.5,
            substitution: MatchMismatch::default(),
            window_size: None,
        }
    }
}

/// Smith-Waterman local alignment.
///
/// Score is the best non-negative cell of the DP matrix; similarity is
/// `score / (min(|a|, |b|) · max σ)`.
#[derive(Debug, Clone)]
pub struct SmithWaterman {
    gap_penalty: f64,
    substitution: Arc<dyn Substitution>,
    window_size: Option<usize>,
}

impl Default for SmithWaterman {
    fn default() -> Self {
        let config = SmithWatermanConfig::default();
        Self {
            gap_penalty: config.gap_penalty,
            substitution: Arc::new(config.substitution),
            window_size: None,
        }
    }
}

impl SmithWaterman {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: SmithWatermanConfig) -> Result<Self, ConfigError> {
        let mut metric = Self::with_substitution(config.gap_penalty, Arc::new(config.substitution))?;
        if let Some(window) = config.window_size {
            metric = metric.with_window_size(window)?;
        }
        Ok(metric)
    }

    pub fn with_substitution(
        gap_penalty: f64,
        substitution: Arc<dyn Substitution>,
    ) -> Result<Self, ConfigError> {
        if substitution.max() <= 0.0 {
            return Err(ConfigError::invalid(
                "substitution",
                "local alignment needs a positive match score",
            ));
        }
        Ok(Self {
            gap_penalty: check_gap(gap_penalty)?,
            substitution,
            window_size: None,
        })
    }

    /// Only consider gaps of at most `window` chars.
    pub fn with_window_size(mut self, window: usize) -> Result<Self, ConfigError> {
        if window == 0 {
            return Err(ConfigError::invalid("window_size", "must be at least 1"));
        }
        self.window_size = Some(window);
        Ok(self)
    }

    /// Best local alignment score.
    #[must_use]
    pub fn alignment_score(&self, a: &str, b: &str) -> f64 {
        let a: Chars = a.chars().collect();
        let b: Chars = b.chars().collect();
        match self.window_size {
            None => self.score_linear(&a, &b),
            Some(window) => self.score_windowed(&a, &b, window),
        }
    }

    /// Any gap length allowed: the linear recurrence only needs one row back.
    fn score_linear(&self, a: &[char], b: &[char]) -> f64 {
        let g = self.gap_penalty;
        let mut prev: SmallVec<[f64; 64]> = smallvec::smallvec![0.0; b.len() + 1];
        let mut curr: SmallVec<[f64; 64]> = smallvec::smallvec![0.0; b.len() + 1];
        let mut best = 0.0f64;

        for &ac in a {
            curr[0] = 0.0;
            for (j, &bc) in b.iter().enumerate() {
                let cell = (prev[j] + self.substitution.compare(ac, bc))
                    .max(prev[j + 1] - g)
                    .max(curr[j] - g)
                    .max(0.0);
                curr[j + 1] = cell;
                best = best.max(cell);
            }
            std::mem::swap(&mut prev, &mut curr);
        }

        best
    }

    /// Gaps limited to `window` chars: look back up to `window` cells in both directions.
    fn score_windowed(&self, a: &[char], b: &[char], window: usize) -> f64 {
        let g = self.gap_penalty;
        let cols = b.len() + 1;
        let mut d = vec![0.0f64; (a.len() + 1) * cols];
        let mut best = 0.0f64;

        for i in 1..=a.len() {
            for j in 1..=b.len() {
                let mut cell = (d[(i - 1) * cols + j - 1]
                    + self.substitution.compare(a[i - 1], b[j - 1]))
                .max(0.0);
                for k in 1..=window.min(i) {
                    cell = cell.max(d[(i - k) * cols + j] - k as f64 * g);
                }
                for k in 1..=window.min(j) {
                    cell = cell.max(d[i * cols + j - k] - k as f64 * g);
                }
                d[i * cols + j] = cell;
                best = best.max(cell);
            }
        }

        best
    }
}

impl Similarity for SmithWaterman {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        local_similarity(a, b, self.substitution.max(), |a, b| match self.window_size {
            None => self.score_linear(a, b),
            Some(window) => self.score_windowed(a, b, window),
        })
    }

    fn name(&self) -> &'static str {
        "smith_waterman"
    }
}

// ============================================================================
// Smith-Waterman-Gotoh
// ============================================================================

/// Parameters for [`SmithWatermanGotoh`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmithWatermanGotohConfig {
    /// Penalty for the first char of a gap
    pub gap_open: f64,
    /// Penalty for every further char of the same gap
    pub gap_extend: f64,
    pub substitution: MatchMismatch,
}

impl Default for SmithWatermanGotohConfig {
    fn default() -> Self {
        Self {
            gap_open: 0.5,
            gap_extend: 0.5,
            substitution: MatchMismatch::default(),
        }
    }
}

/// Smith-Waterman local alignment with Gotoh's affine gap costs.
///
/// A gap of length `k` costs `gap_open + (k − 1) · gap_extend`.
#[derive(Debug, Clone)]
pub struct SmithWatermanGotoh {
    gap_open: f64,
    gap_extend: f64,
    substitution: Arc<dyn Substitution>,
}

impl Default for SmithWatermanGotoh {
    fn default() -> Self {
        let config = SmithWatermanGotohConfig::default();
        Self {
            gap_open: config.gap_open,
            gap_extend: config.gap_extend,
            substitution: Arc::new(config.substitution),
        }
    }
}

impl SmithWatermanGotoh {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: SmithWatermanGotohConfig) -> Result<Self, ConfigError> {
        Self::with_substitution(config.gap_open, config.gap_extend, Arc::new(config.substitution))
    }

    pub fn with_substitution(
        gap_open: f64,
        gap_extend: f64,
        substitution: Arc<dyn Substitution>,
    ) -> Result<Self, ConfigError> {
        if substitution.max() <= 0.0 {
            return Err(ConfigError::invalid(
                "substitution",
                "local alignment needs a positive match score",
            ));
        }
        Ok(Self {
            gap_open: check_gap(gap_open)?,
            gap_extend: check_gap(gap_extend)?,
            substitution,
        })
    }

    /// Best local alignment score.
    #[must_use]
    pub fn alignment_score(&self, a: &str, b: &str) -> f64 {
        let a: Chars = a.chars().collect();
        let b: Chars = b.chars().collect();
        self.score_chars(&a, &b)
    }

    fn score_chars(&self, a: &[char], b: &[char]) -> f64 {
        let n = b.len();
        // h: best alignment ending at (i, j); e: ending in a gap along b;
        // f: ending in a gap along a
        let mut h_prev: SmallVec<[f64; 64]> = smallvec::smallvec![0.0; n + 1];
        let mut h_curr: SmallVec<[f64; 64]> = smallvec::smallvec![0.0; n + 1];
        let mut f: SmallVec<[f64; 64]> = smallvec::smallvec![f64::NEG_INFINITY; n + 1];
        let mut best = 0.0f64;

        for &ac in a {
            h_curr[0] = 0.0;
            let mut e = f64::NEG_INFINITY;
            for (j, &bc) in b.iter().enumerate() {
                e = (e - self.gap_extend).max(h_curr[j] - self.gap_open);
                f[j + 1] = (f[j + 1] - self.gap_extend).max(h_prev[j + 1] - self.gap_open);

                let cell = (h_prev[j] + self.substitution.compare(ac, bc))
                    .max(e)
                    .max(f[j + 1])
                    .max(0.0);
                h_curr[j + 1] = cell;
                best = best.max(cell);
            }
            std::mem::swap(&mut h_prev, &mut h_curr);
        }

        best
    }
}

impl Similarity for SmithWatermanGotoh {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        local_similarity(a, b, self.substitution.max(), |a, b| self.score_chars(a, b))
    }

    fn name(&self) -> &'static str {
        "smith_waterman_gotoh"
    }
}

/// Shared shell for the local aligners: equality and empty-input rules, then
/// `score / (min(|a|, |b|) · max_match)`.
fn local_similarity<F>(a: &str, b: &str, max_match: f64, score: F) -> f64
where
    F: FnOnce(&[char], &[char]) -> f64,
{
    if a == b {
        return 1.0;
    }
    let a: Chars = a.chars().collect();
    let b: Chars = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let max_score = a.len().min(b.len()) as f64 * max_match;
    clamp_score(score(&a, &b) / max_score)
}
