//! Literal input/output pairs for the built-in metrics, to four decimals.

use fuzzysim::algorithms::Identity;
use fuzzysim::{metrics, StringMetric, Tokenizer};

const TOLERANCE: f64 = 1e-4;

fn assert_score(metric: &StringMetric, a: &str, b: &str, expected: f64) {
    let score = metric.compare(a, b);
    assert!(
        (score - expected).abs() <= TOLERANCE,
        "{}({a:?}, {b:?}) = {score}, expected {expected}",
        metric.metric_name()
    );
}

#[test]
fn cosine_similarity() {
    let metric = metrics::cosine_similarity();
    assert_score(&metric, "test string1", "test string2", 0.5);
    assert_score(&metric, "test", "test string2", 0.7071);
    assert_score(&metric, "", "test string2", 0.0);
}

#[test]
fn dice() {
    let metric = metrics::dice();
    assert_score(&metric, "test string1", "test string2", 0.5);
    assert_score(&metric, "test", "test string2", 0.6666);
    assert_score(&metric, "", "test string2", 0.0);
}

#[test]
fn jaccard_and_generalized_jaccard() {
    for metric in [metrics::jaccard(), metrics::generalized_jaccard()] {
        assert_score(&metric, "aaa bbb ccc ddd", "aaa bbb ccc eee", 0.6);
        assert_score(&metric, "test string1", "test string2", 0.3333);
        assert_score(&metric, "", "test string2", 0.0);
    }
}

#[test]
fn euclidean_distance() {
    let metric = metrics::euclidean_distance();
    assert_score(&metric, "test", "test string2", 0.5527);
    assert_score(&metric, "", "test string2", 0.2928);
    assert_score(&metric, "", "", 1.0);
}

#[test]
fn block_distance() {
    let metric = metrics::block_distance();
    assert_score(&metric, "test string1", "test string2", 0.5);
    assert_score(&metric, "test", "test string2", 0.6666);
}

#[test]
fn overlap_coefficient() {
    let metric = metrics::overlap_coefficient();
    assert_score(&metric, "test", "test string2", 1.0);
    assert_score(&metric, "test string1", "test string2", 0.5);
}

#[test]
fn soundex() {
    let metric = metrics::soundex();
    assert_score(&metric, "James", "Jones", 1.0);
    assert_score(&metric, "Tannhauser", "Ozymandias", 0.5);
    assert_score(&metric, "Travis", "Trevor", 0.8833);
    assert_score(&metric, "Marcus", "Marinus", 0.8666);
    assert_score(&metric, "", "Jenkins", 0.0);
}

#[test]
fn q_grams_distance() {
    let metric = metrics::q_grams_distance();
    assert_score(&metric, "test string1", "test string2", 0.7857);
    assert_score(&metric, "test", "test string2", 0.4);
}

#[test]
fn simon_white() {
    let metric = metrics::simon_white();
    assert_score(&metric, "test string1", "test string2", 0.8889);
    assert_score(&metric, "test", "test string2", 0.5);
}

#[test]
fn monge_elkan() {
    let metric = metrics::monge_elkan();
    assert_score(&metric, "test string1", "test string2", 0.9286);
    // every word of the left side has an exact partner on the right
    assert_score(&metric, "test", "test string2", 1.0);
}

#[test]
fn multiset_identity_collapses_whitespace() {
    let metric = StringMetric::for_multiset(Identity, Tokenizer::whitespace());
    assert_score(
        &metric,
        "To repeat repeat is to repeat",
        "To  repeat  repeat  is  to  repeat",
        1.0,
    );
    assert_score(&metric, "To repeat", "to repeat", 0.0);
}

#[test]
fn edit_distances() {
    assert_score(&metrics::levenshtein(), "test string1", "test string2", 0.9166);
    assert_score(&metrics::damerau_levenshtein(), "test string1", "test string2", 0.9166);
    assert_score(&metrics::damerau_levenshtein(), "ab", "ba", 0.5);
    assert_score(&metrics::longest_common_subsequence(), "test string1", "test string2", 0.9166);
    assert_score(&metrics::longest_common_substring(), "test string1", "test string2", 0.9166);
}

#[test]
fn jaro_family() {
    assert_score(&metrics::jaro(), "MARTHA", "MARHTA", 0.9444);
    assert_score(&metrics::jaro_winkler(), "MARTHA", "MARHTA", 0.9611);
    assert_score(&metrics::jaro_winkler(), "DIXON", "DICKSONX", 0.8133);
}

#[test]
fn alignments() {
    // "string1" and "string2" share a six-character run
    assert_score(&metrics::smith_waterman(), "string1", "string2", 0.8571);
    assert_score(&metrics::smith_waterman_gotoh(), "test string1", "test string2", 0.9166);
    // one substitution costing 2 against a worst case of 12 · 2
    assert_score(&metrics::needleman_wunch(), "test string1", "test string2", 0.9166);
}
