//! Serde-friendly configuration for building metrics by name
//!
//! ```
//! use fuzzysim::config::PipelineConfig;
//!
//! let config: PipelineConfig = serde_json::from_str(
//!     r#"{ "metric": "jaccard", "simplifiers": [{ "type": "lowercase" }] }"#,
//! ).unwrap();
//! let metric = config.build().unwrap();
//! assert_eq!(metric.compare("Hello World", "world hello"), 1.0);
//! ```

use crate::error::ConfigError;
use crate::metrics;
use crate::pipeline::StringMetric;
use crate::simplify::{NormalizationForm, Simplifier};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every built-in metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Identity,
    Levenshtein,
    DamerauLevenshtein,
    Jaro,
    JaroWinkler,
    NeedlemanWunch,
    SmithWaterman,
    SmithWatermanGotoh,
    LongestCommonSubsequence,
    LongestCommonSubstring,
    CosineSimilarity,
    Dice,
    Jaccard,
    GeneralizedJaccard,
    EuclideanDistance,
    BlockDistance,
    OverlapCoefficient,
    QGramsDistance,
    SimonWhite,
    MongeElkan,
    Soundex,
}

impl MetricKind {
    pub const ALL: [MetricKind; 21] = [
        MetricKind::Identity,
        MetricKind::Levenshtein,
        MetricKind::DamerauLevenshtein,
        MetricKind::Jaro,
        MetricKind::JaroWinkler,
        MetricKind::NeedlemanWunch,
        MetricKind::SmithWaterman,
        MetricKind::SmithWatermanGotoh,
        MetricKind::LongestCommonSubsequence,
        MetricKind::LongestCommonSubstring,
        MetricKind::CosineSimilarity,
        MetricKind::Dice,
        MetricKind::Jaccard,
        MetricKind::GeneralizedJaccard,
        MetricKind::EuclideanDistance,
        MetricKind::BlockDistance,
        MetricKind::OverlapCoefficient,
        MetricKind::QGramsDistance,
        MetricKind::SimonWhite,
        MetricKind::MongeElkan,
        MetricKind::Soundex,
    ];

    /// snake_case name, as used by serde
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Identity => "identity",
            MetricKind::Levenshtein => "levenshtein",
            MetricKind::DamerauLevenshtein => "damerau_levenshtein",
            MetricKind::Jaro => "jaro",
            MetricKind::JaroWinkler => "jaro_winkler",
            MetricKind::NeedlemanWunch => "needleman_wunch",
            MetricKind::SmithWaterman => "smith_waterman",
            MetricKind::SmithWatermanGotoh => "smith_waterman_gotoh",
            MetricKind::LongestCommonSubsequence => "longest_common_subsequence",
            MetricKind::LongestCommonSubstring => "longest_common_substring",
            MetricKind::CosineSimilarity => "cosine_similarity",
            MetricKind::Dice => "dice",
            MetricKind::Jaccard => "jaccard",
            MetricKind::GeneralizedJaccard => "generalized_jaccard",
            MetricKind::EuclideanDistance => "euclidean_distance",
            MetricKind::BlockDistance => "block_distance",
            MetricKind::OverlapCoefficient => "overlap_coefficient",
            MetricKind::QGramsDistance => "q_grams_distance",
            MetricKind::SimonWhite => "simon_white",
            MetricKind::MongeElkan => "monge_elkan",
            MetricKind::Soundex => "soundex",
        }
    }

    /// Whether `M(a, b) = M(b, a)` for every pair
    #[must_use]
    pub fn is_symmetric(self) -> bool {
        self != MetricKind::MongeElkan
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase with `_`, `-` and spaces removed
fn name_key(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for MetricKind {
    type Err = ConfigError;

    /// Accepts `snake_case`, `kebab-case` and `camelCase` spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = name_key(s);
        MetricKind::ALL
            .into_iter()
            .find(|kind| name_key(kind.as_str()) == key)
            .ok_or_else(|| ConfigError::UnknownMetric(s.to_owned()))
    }
}

/// Declarative form of a [`Simplifier`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimplifierConfig {
    Lowercase,
    Uppercase,
    RemoveNonWord,
    ReplaceNonWord { replacement: String },
    StripDiacritics,
    Normalize { form: NormalizationForm },
    Replace { pattern: String, replacement: String },
    Soundex,
}

impl SimplifierConfig {
    pub fn build(&self) -> Result<Simplifier, ConfigError> {
        Ok(match self {
            SimplifierConfig::Lowercase => Simplifier::Lowercase,
            SimplifierConfig::Uppercase => Simplifier::Uppercase,
            SimplifierConfig::RemoveNonWord => Simplifier::RemoveNonWord,
            SimplifierConfig::ReplaceNonWord { replacement } => {
                Simplifier::ReplaceNonWord(replacement.clone())
            }
            SimplifierConfig::StripDiacritics => Simplifier::StripDiacritics,
            SimplifierConfig::Normalize { form } => Simplifier::Normalize(*form),
            SimplifierConfig::Replace {
                pattern,
                replacement,
            } => Simplifier::replace(pattern, replacement.clone())?,
            SimplifierConfig::Soundex => Simplifier::Soundex,
        })
    }
}

/// A built-in metric plus the simplifiers to run in front of it, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub metric: MetricKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub simplifiers: Vec<SimplifierConfig>,
}

impl PipelineConfig {
    #[must_use]
    pub fn new(metric: MetricKind) -> Self {
        Self {
            metric,
            simplifiers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_simplifier(mut self, simplifier: SimplifierConfig) -> Self {
        self.simplifiers.push(simplifier);
        self
    }

    pub fn build(&self) -> Result<StringMetric, ConfigError> {
        let metric = metrics::create(self.metric);
        let steps = self
            .simplifiers
            .iter()
            .map(SimplifierConfig::build)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            metric = %self.metric,
            simplifiers = steps.len(),
            "building metric from config"
        );

        if steps.is_empty() {
            return Ok(metric);
        }
        Ok(metric.with_simplifier(Simplifier::chain(steps)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in MetricKind::ALL {
            assert_eq!(kind.as_str().parse::<MetricKind>().unwrap(), kind);
        }
        assert_eq!("jaroWinkler".parse::<MetricKind>().unwrap(), MetricKind::JaroWinkler);
        assert_eq!("q-grams-distance".parse::<MetricKind>().unwrap(), MetricKind::QGramsDistance);
        assert_eq!(
            "hamming".parse::<MetricKind>().unwrap_err(),
            ConfigError::UnknownMetric("hamming".into())
        );
    }

    #[test]
    fn test_symmetry_flags() {
        assert!(!MetricKind::MongeElkan.is_symmetric());
        assert!(MetricKind::Soundex.is_symmetric());
    }

    #[test]
    fn test_simplifier_configs_build() {
        let chain = PipelineConfig::new(MetricKind::Identity)
            .with_simplifier(SimplifierConfig::Lowercase)
            .with_simplifier(SimplifierConfig::RemoveNonWord)
            .build()
            .unwrap();
        assert_eq!(chain.compare("Hello, World", "helloworld"), 1.0);
        assert_eq!(
            chain.simplifier(),
            Some(&Simplifier::chain([Simplifier::Lowercase, Simplifier::RemoveNonWord]).unwrap())
        );

        let bad = SimplifierConfig::Replace {
            pattern: "(".into(),
            replacement: String::new(),
        };
        assert!(matches!(bad.build(), Err(ConfigError::InvalidPattern(_))));
    }

    #[test]
    fn test_plain_config_has_no_simplifier() {
        let metric = PipelineConfig::new(MetricKind::Levenshtein).build().unwrap();
        assert!(metric.simplifier().is_none());
        assert_eq!(metric.metric_name(), "levenshtein");
    }
}
