//! Ready-to-use string metrics
//!
//! One constructor per built-in metric, each wired with the tokenizer that
//! metric is normally used with:
//!
//! | metric | domain | tokenizer |
//! |---|---|---|
//! | cosine, dice, euclidean, block, generalized Jaccard | multiset | whitespace |
//! | Jaccard, overlap coefficient | set | whitespace |
//! | q-grams distance | multiset | padded character trigrams |
//! | Simon White | multiset | whitespace, then character bigrams per word |
//! | Monge–Elkan | list | whitespace |
//! | everything else | string | none |
//!
//! ```
//! use fuzzysim::metrics;
//!
//! let jaccard = metrics::jaccard();
//! assert!((jaccard.compare("aaa bbb ccc ddd", "aaa bbb ccc eee") - 0.6).abs() < 1e-9);
//! ```

use crate::algorithms::{
    BlockDistance, CosineSimilarity, DamerauLevenshtein, Dice, EuclideanDistance,
    GeneralizedJaccard, Identity, Jaccard, Jaro, JaroWinkler, Levenshtein,
    LongestCommonSubsequence, LongestCommonSubstring, MongeElkan, NeedlemanWunch,
    OverlapCoefficient, SimonWhite, SmithWaterman, SmithWatermanGotoh, Soundex,
};
use crate::config::MetricKind;
use crate::pipeline::StringMetric;
use crate::simplify::Simplifier;
use crate::tokenize::{Tokenizer, DEFAULT_PADDING};
use std::num::NonZeroUsize;

const BIGRAM: NonZeroUsize = match NonZeroUsize::new(2) {
    Some(q) => q,
    None => unreachable!(),
};
const TRIGRAM: NonZeroUsize = match NonZeroUsize::new(3) {
    Some(q) => q,
    None => unreachable!(),
};

// ============================================================================
// String metrics
// ============================================================================

#[must_use]
pub fn identity() -> StringMetric {
    StringMetric::for_string(Identity)
}

#[must_use]
pub fn levenshtein() -> StringMetric {
    StringMetric::for_string(Levenshtein)
}

#[must_use]
pub fn damerau_levenshtein() -> StringMetric {
    StringMetric::for_string(DamerauLevenshtein::new())
}

#[must_use]
pub fn jaro() -> StringMetric {
    StringMetric::for_string(Jaro)
}

#[must_use]
pub fn jaro_winkler() -> StringMetric {
    StringMetric::for_string(JaroWinkler::default())
}

#[must_use]
pub fn needleman_wunch() -> StringMetric {
    StringMetric::for_string(NeedlemanWunch::default())
}

#[must_use]
pub fn smith_waterman() -> StringMetric {
    StringMetric::for_string(SmithWaterman::default())
}

#[must_use]
pub fn smith_waterman_gotoh() -> StringMetric {
    StringMetric::for_string(SmithWatermanGotoh::default())
}

#[must_use]
pub fn longest_common_subsequence() -> StringMetric {
    StringMetric::for_string(LongestCommonSubsequence)
}

#[must_use]
pub fn longest_common_substring() -> StringMetric {
    StringMetric::for_string(LongestCommonSubstring)
}

/// Jaro–Winkler over Soundex codes
#[must_use]
pub fn soundex() -> StringMetric {
    StringMetric::for_string(Soundex::default())
}

// ============================================================================
// Token metrics
// ============================================================================

#[must_use]
pub fn cosine_similarity() -> StringMetric {
    StringMetric::for_multiset(CosineSimilarity, Tokenizer::Whitespace)
}

#[must_use]
pub fn dice() -> StringMetric {
    StringMetric::for_multiset(Dice, Tokenizer::Whitespace)
}

#[must_use]
pub fn euclidean_distance() -> StringMetric {
    StringMetric::for_multiset(EuclideanDistance, Tokenizer::Whitespace)
}

#[must_use]
pub fn block_distance() -> StringMetric {
    StringMetric::for_multiset(BlockDistance, Tokenizer::Whitespace)
}

#[must_use]
pub fn generalized_jaccard() -> StringMetric {
    StringMetric::for_multiset(GeneralizedJaccard, Tokenizer::Whitespace)
}

#[must_use]
pub fn jaccard() -> StringMetric {
    StringMetric::for_set(Jaccard, Tokenizer::Whitespace)
}

#[must_use]
pub fn overlap_coefficient() -> StringMetric {
    StringMetric::for_set(OverlapCoefficient, Tokenizer::Whitespace)
}

/// Block distance over padded character trigrams
#[must_use]
pub fn q_grams_distance() -> StringMetric {
    StringMetric::for_multiset(
        BlockDistance,
        Tokenizer::QGram {
            q: TRIGRAM,
            padding: Some(DEFAULT_PADDING),
        },
    )
}

/// Dice over the character bigrams of every word
#[must_use]
pub fn simon_white() -> StringMetric {
    StringMetric::for_multiset(
        SimonWhite,
        Tokenizer::Whitespace.then(Tokenizer::QGram {
            q: BIGRAM,
            padding: None,
        }),
    )
}

/// Asymmetric Monge–Elkan over words, Smith–Waterman–Gotoh per word pair
#[must_use]
pub fn monge_elkan() -> StringMetric {
    StringMetric::for_list(MongeElkan::default(), Tokenizer::Whitespace)
}

// ============================================================================
// By name
// ============================================================================

/// Build a built-in metric by kind
#[must_use]
pub fn create(kind: MetricKind) -> StringMetric {
    match kind {
        MetricKind::Identity => identity(),
        MetricKind::Levenshtein => levenshtein(),
        MetricKind::DamerauLevenshtein => damerau_levenshtein(),
        MetricKind::Jaro => jaro(),
        MetricKind::JaroWinkler => jaro_winkler(),
        MetricKind::NeedlemanWunch => needleman_wunch(),
        MetricKind::SmithWaterman => smith_waterman(),
        MetricKind::SmithWatermanGotoh => smith_waterman_gotoh(),
        MetricKind::LongestCommonSubsequence => longest_common_subsequence(),
        MetricKind::LongestCommonSubstring => longest_common_substring(),
        MetricKind::CosineSimilarity => cosine_similarity(),
        MetricKind::Dice => dice(),
        MetricKind::Jaccard => jaccard(),
        MetricKind::GeneralizedJaccard => generalized_jaccard(),
        MetricKind::EuclideanDistance => euclidean_distance(),
        MetricKind::BlockDistance => block_distance(),
        MetricKind::OverlapCoefficient => overlap_coefficient(),
        MetricKind::QGramsDistance => q_grams_distance(),
        MetricKind::SimonWhite => simon_white(),
        MetricKind::MongeElkan => monge_elkan(),
        MetricKind::Soundex => soundex(),
    }
}

/// Build a built-in metric that simplifies its inputs first
#[must_use]
pub fn create_with_simplifier(kind: MetricKind, simplifier: Simplifier) -> StringMetric {
    create(kind).with_simplifier(simplifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_builds_and_is_reflexive() {
        for kind in MetricKind::ALL {
            let metric = create(kind);
            assert_eq!(metric.compare("test string", "test string"), 1.0, "{kind}");
            assert_eq!(metric.compare("", "test string"), if kind == MetricKind::EuclideanDistance {
                1.0 - 2f64.sqrt() / 2.0
            } else {
                0.0
            }, "{kind}");
        }
    }

    #[test]
    fn test_names_follow_kind() {
        assert_eq!(create(MetricKind::QGramsDistance).metric_name(), "block_distance");
        assert_eq!(create(MetricKind::SimonWhite).metric_name(), "simon_white");
        assert_eq!(create(MetricKind::Jaccard).metric_name(), "jaccard");
        assert_eq!(create(MetricKind::DamerauLevenshtein).metric_name(), "damerau_levenshtein");
    }

    #[test]
    fn test_facade_tokenizers_match_checked_constructors() {
        assert_eq!(
            q_grams_distance().tokenizer(),
            Some(&Tokenizer::qgram_with_padding(3).unwrap())
        );
        let bigrams = Tokenizer::chain([Tokenizer::whitespace(), Tokenizer::qgram(2).unwrap()]);
        assert_eq!(simon_white().tokenizer(), Some(&bigrams.unwrap()));
    }

    #[test]
    fn test_create_with_simplifier() {
        let metric = create_with_simplifier(MetricKind::Identity, Simplifier::Lowercase);
        assert_eq!(metric.compare("ABC", "abc"), 1.0);
        assert_eq!(metric.simplifier(), Some(&Simplifier::Lowercase));
    }
}
