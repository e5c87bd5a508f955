//! Universal properties of the built-in metrics, checked with proptest.

use fuzzysim::metrics::{self, create};
use fuzzysim::{MetricKind, Similarity};
use proptest::prelude::*;

/// Small alphabet with spaces so token metrics see shared tokens often
const INPUT: &str = "[abc ]{0,12}";

proptest! {
    #[test]
    fn scores_stay_in_unit_range(a in INPUT, b in INPUT) {
        for kind in MetricKind::ALL {
            let score = create(kind).compare(&a, &b);
            prop_assert!((0.0..=1.0).contains(&score), "{kind}: {score}");
        }
    }

    #[test]
    fn identical_inputs_score_one(a in "\\PC{0,16}") {
        for kind in MetricKind::ALL {
            prop_assert_eq!(create(kind).compare(&a, &a), 1.0, "{}", kind);
        }
    }

    #[test]
    fn symmetric_metrics_ignore_argument_order(a in INPUT, b in INPUT) {
        for kind in MetricKind::ALL.into_iter().filter(|k| k.is_symmetric()) {
            let metric = create(kind);
            let forward = metric.compare(&a, &b);
            let backward = metric.compare(&b, &a);
            prop_assert!((forward - backward).abs() < 1e-9, "{kind}: {forward} vs {backward}");
        }
    }

    // Single letters and bare whitespace included: inputs without tokens still count as nonempty
    #[test]
    fn empty_against_nonempty_scores_zero(b in "[a-z ]{1,8}") {
        for kind in MetricKind::ALL {
            if kind == MetricKind::EuclideanDistance {
                continue;
            }
            let metric = create(kind);
            prop_assert_eq!(metric.compare("", &b), 0.0, "{}", kind);
            prop_assert_eq!(metric.compare(&b, ""), 0.0, "{}", kind);
        }
    }

    #[test]
    fn perfect_score_means_equal_input(a in INPUT, b in INPUT) {
        let metrics = [
            metrics::identity(),
            metrics::levenshtein(),
            metrics::damerau_levenshtein(),
            metrics::jaro(),
            metrics::needleman_wunch(),
            metrics::longest_common_subsequence(),
            metrics::longest_common_substring(),
        ];
        for metric in &metrics {
            if metric.compare(&a, &b) == 1.0 {
                prop_assert_eq!(&a, &b, "{}", metric.metric_name());
            }
        }
    }

    #[test]
    fn distinct_letters_share_no_tokens(a in "[a-z]", b in "[a-z]") {
        prop_assume!(a != b);
        let kinds = [
            MetricKind::CosineSimilarity,
            MetricKind::Jaccard,
            MetricKind::GeneralizedJaccard,
            MetricKind::Dice,
            MetricKind::OverlapCoefficient,
            MetricKind::BlockDistance,
            MetricKind::EuclideanDistance,
            MetricKind::QGramsDistance,
            MetricKind::SimonWhite,
        ];
        for kind in kinds {
            prop_assert_eq!(create(kind).compare(&a, &b), 0.0, "{}", kind);
        }
    }

    #[test]
    fn distances_obey_triangle_inequality(a in INPUT, b in INPUT, c in INPUT) {
        for metric in [metrics::identity(), metrics::jaccard(), metrics::generalized_jaccard()] {
            let ab = metric.distance(&a, &b);
            let bc = metric.distance(&b, &c);
            let ac = metric.distance(&a, &c);
            prop_assert!(ac <= ab + bc + 1e-9, "{}: {ac} > {ab} + {bc}", metric.metric_name());
        }
    }
}

#[test]
fn empty_pair_scores_one_everywhere() {
    for kind in MetricKind::ALL {
        assert_eq!(create(kind).compare("", ""), 1.0, "{kind}");
    }
}

#[test]
fn euclidean_keeps_its_own_empty_normalisation() {
    let score = metrics::euclidean_distance().compare("", "a b");
    assert!((score - (1.0 - 2f64.sqrt() / 2.0)).abs() < 1e-12);
}

#[test]
fn monge_elkan_is_asymmetric() {
    let metric = metrics::monge_elkan();
    let forward = metric.compare("test", "test string2");
    let backward = metric.compare("test string2", "test");
    assert_eq!(forward, 1.0);
    assert!(backward < forward);
}

#[test]
fn soundex_and_overlap_give_up_coincidence() {
    assert_eq!(metrics::soundex().compare("Robert", "Rupert"), 1.0);
    assert_eq!(metrics::overlap_coefficient().compare("test", "test string2"), 1.0);
}

#[test]
fn jaro_family_is_symmetric_on_names() {
    let names = ["MARTHA", "MARHTA", "DWAYNE", "DUANE", "DIXON", "DICKSONX", "Jones", "James"];
    for metric in [metrics::jaro(), metrics::jaro_winkler(), metrics::soundex()] {
        for a in names {
            for b in names {
                let forward = metric.compare(a, b);
                let backward = metric.compare(b, a);
                assert!((forward - backward).abs() < 1e-9, "{}: {a} {b}", metric.metric_name());
            }
        }
    }
}
