//! Pipeline composer: lifting token metrics to string metrics
//!
//! A [`StringMetric`] runs `simplifier? → tokenizer? → metric`:
//!
//! ```text
//! P(a, b) = M(K(S(a)), K(S(b)))
//! ```
//!
//! where `S` is an optional [`Simplifier`], `K` a [`Tokenizer`] producing the
//! container the domain metric `M` understands, or nothing when `M` compares
//! strings directly.
//!
//! Adding a simplifier to an existing `StringMetric` never nests pipelines.
//! The new simplifier is fused into the existing one as the first step of a
//! single [`SimplifierChain`](crate::simplify::SimplifierChain), and the
//! tokenizer and metric are shared with the original.
//!
//! A `StringMetric` is immutable and cheap to clone (one `Arc`); clones and
//! the original may be used from any number of threads at once.

use crate::algorithms::{clamp_score, Similarity};
use crate::error::ConfigError;
use crate::simplify::{compose, Simplifier};
use crate::tokenize::{Multiset, TokenSet, Tokenizer};
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Domain metrics
// ============================================================================

/// A metric together with the tokenizer feeding it
#[derive(Clone)]
enum Domain {
    Str(Arc<dyn Similarity>),
    List(Arc<dyn Similarity<[String]>>, Tokenizer),
    Set(Arc<dyn Similarity<TokenSet>>, Tokenizer),
    Multiset(Arc<dyn Similarity<Multiset>>, Tokenizer),
}

impl Domain {
    /// Equal strings score 1. Otherwise an empty side scores 0, unless the
    /// metric opts out and only one side is empty.
    fn compare(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }
        match self {
            Domain::Str(metric) => score(&**metric, a, b),
            Domain::List(metric, tokenizer) => {
                let a = tokenizer.tokenize_to_list(a);
                let b = tokenizer.tokenize_to_list(b);
                score(&**metric, a.as_slice(), b.as_slice())
            }
            Domain::Set(metric, tokenizer) => score(
                &**metric,
                &tokenizer.tokenize_to_set(a),
                &tokenizer.tokenize_to_set(b),
            ),
            Domain::Multiset(metric, tokenizer) => score(
                &**metric,
                &tokenizer.tokenize_to_multiset(a),
                &tokenizer.tokenize_to_multiset(b),
            ),
        }
    }

    fn metric(&self) -> DomainMetric {
        match self {
            Domain::Str(metric) => DomainMetric::Str(Arc::clone(metric)),
            Domain::List(metric, _) => DomainMetric::List(Arc::clone(metric)),
            Domain::Set(metric, _) => DomainMetric::Set(Arc::clone(metric)),
            Domain::Multiset(metric, _) => DomainMetric::Multiset(Arc::clone(metric)),
        }
    }

    fn zero_on_empty(&self) -> bool {
        match self {
            Domain::Str(metric) => (**metric).zero_on_empty(),
            Domain::List(metric, _) => (**metric).zero_on_empty(),
            Domain::Set(metric, _) => (**metric).zero_on_empty(),
            Domain::Multiset(metric, _) => (**metric).zero_on_empty(),
        }
    }

    fn metric_name(&self) -> &'static str {
        match self {
            Domain::Str(metric) => (**metric).name(),
            Domain::List(metric, _) => (**metric).name(),
            Domain::Set(metric, _) => (**metric).name(),
            Domain::Multiset(metric, _) => (**metric).name(),
        }
    }

    fn tokenizer(&self) -> Option<&Tokenizer> {
        match self {
            Domain::Str(_) => None,
            Domain::List(_, t) | Domain::Set(_, t) | Domain::Multiset(_, t) => Some(t),
        }
    }
}

/// Values a domain metric compares, viewed only for emptiness
trait Emptiness {
    fn holds_nothing(&self) -> bool;
}

impl Emptiness for str {
    fn holds_nothing(&self) -> bool {
        self.is_empty()
    }
}

impl Emptiness for [String] {
    fn holds_nothing(&self) -> bool {
        self.is_empty()
    }
}

impl Emptiness for TokenSet {
    fn holds_nothing(&self) -> bool {
        self.is_empty()
    }
}

impl Emptiness for Multiset {
    fn holds_nothing(&self) -> bool {
        self.is_empty()
    }
}

// `a` and `b` come from different strings
fn score<T: Emptiness + ?Sized>(metric: &dyn Similarity<T>, a: &T, b: &T) -> f64 {
    match (a.holds_nothing(), b.holds_nothing()) {
        (false, false) => metric.similarity(a, b),
        (true, true) => 0.0,
        _ if metric.zero_on_empty() => 0.0,
        _ => metric.similarity(a, b),
    }
}

/// Shared handle to the metric at the end of a [`StringMetric`]
#[derive(Clone)]
pub enum DomainMetric {
    Str(Arc<dyn Similarity>),
    List(Arc<dyn Similarity<[String]>>),
    Set(Arc<dyn Similarity<TokenSet>>),
    Multiset(Arc<dyn Similarity<Multiset>>),
}

impl DomainMetric {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DomainMetric::Str(metric) => (**metric).name(),
            DomainMetric::List(metric) => (**metric).name(),
            DomainMetric::Set(metric) => (**metric).name(),
            DomainMetric::Multiset(metric) => (**metric).name(),
        }
    }

    /// Whether both handles point at the same metric value
    #[must_use]
    pub fn ptr_eq(&self, other: &DomainMetric) -> bool {
        match (self, other) {
            (DomainMetric::Str(a), DomainMetric::Str(b)) => same_allocation(a, b),
            (DomainMetric::List(a), DomainMetric::List(b)) => same_allocation(a, b),
            (DomainMetric::Set(a), DomainMetric::Set(b)) => same_allocation(a, b),
            (DomainMetric::Multiset(a), DomainMetric::Multiset(b)) => same_allocation(a, b),
            _ => false,
        }
    }
}

// Compares data pointers only; vtable pointers may differ across codegen units.
fn same_allocation<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    std::ptr::eq(Arc::as_ptr(a).cast::<()>(), Arc::as_ptr(b).cast::<()>())
}

impl fmt::Debug for DomainMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let domain = match self {
            DomainMetric::Str(_) => "Str",
            DomainMetric::List(_) => "List",
            DomainMetric::Set(_) => "Set",
            DomainMetric::Multiset(_) => "Multiset",
        };
        f.debug_tuple(domain).field(&self.name()).finish()
    }
}

struct Pipeline {
    simplifier: Option<Simplifier>,
    domain: Domain,
}

// ============================================================================
// StringMetric
// ============================================================================

/// Similarity over raw strings, possibly backed by a token metric
#[derive(Clone)]
pub struct StringMetric {
    inner: Arc<Pipeline>,
}

impl StringMetric {
    fn from_parts(simplifier: Option<Simplifier>, domain: Domain) -> Self {
        Self {
            inner: Arc::new(Pipeline { simplifier, domain }),
        }
    }

    /// Compare strings directly with `metric`
    #[must_use]
    pub fn for_string<M: Similarity + 'static>(metric: M) -> Self {
        Self::from_parts(None, Domain::Str(Arc::new(metric)))
    }

    /// Tokenize to ordered lists, then compare with `metric`
    #[must_use]
    pub fn for_list<M>(metric: M, tokenizer: Tokenizer) -> Self
    where
        M: Similarity<[String]> + 'static,
    {
        Self::from_parts(None, Domain::List(Arc::new(metric), tokenizer))
    }

    /// Tokenize to sets, then compare with `metric`
    #[must_use]
    pub fn for_set<M>(metric: M, tokenizer: Tokenizer) -> Self
    where
        M: Similarity<TokenSet> + 'static,
    {
        Self::from_parts(None, Domain::Set(Arc::new(metric), tokenizer))
    }

    /// Tokenize to multisets, then compare with `metric`
    #[must_use]
    pub fn for_multiset<M>(metric: M, tokenizer: Tokenizer) -> Self
    where
        M: Similarity<Multiset> + 'static,
    {
        Self::from_parts(None, Domain::Multiset(Arc::new(metric), tokenizer))
    }

    /// Run `simplifier` on both inputs before anything else.
    ///
    /// If this metric already simplifies, the result carries one chain with
    /// `simplifier` first and the existing steps after it.
    #[must_use]
    pub fn with_simplifier(&self, simplifier: Simplifier) -> Self {
        let fused = match &self.inner.simplifier {
            Some(existing) => {
                let fused = compose(simplifier, existing.clone());
                tracing::debug!(
                    metric = self.metric_name(),
                    simplifier = ?fused,
                    "fused simplifier into existing pipeline"
                );
                fused
            }
            None => simplifier,
        };
        Self::from_parts(Some(fused), self.inner.domain.clone())
    }

    /// Score in `[0, 1]`.
    ///
    /// Inputs equal after simplification score 1. A side that is empty, or
    /// yields no tokens, scores 0 against a different input, except for
    /// metrics that keep their own empty normalisation (Euclidean distance).
    #[must_use]
    pub fn compare(&self, a: &str, b: &str) -> f64 {
        let pipeline = &*self.inner;
        let score = match &pipeline.simplifier {
            Some(simplifier) => pipeline
                .domain
                .compare(&simplifier.apply(a), &simplifier.apply(b)),
            None => pipeline.domain.compare(a, b),
        };
        clamp_score(score)
    }

    /// Simplifier run on both inputs, fused into one chain if there are several
    #[must_use]
    pub fn simplifier(&self) -> Option<&Simplifier> {
        self.inner.simplifier.as_ref()
    }

    /// Tokenizer feeding the metric; `None` for metrics over whole strings
    #[must_use]
    pub fn tokenizer(&self) -> Option<&Tokenizer> {
        self.inner.domain.tokenizer()
    }

    /// The wrapped domain metric, shared with every metric derived from this one
    #[must_use]
    pub fn metric(&self) -> DomainMetric {
        self.inner.domain.metric()
    }

    /// Name of the underlying domain metric
    #[must_use]
    pub fn metric_name(&self) -> &'static str {
        self.inner.domain.metric_name()
    }

    /// Whether both handles point at the same pipeline
    #[must_use]
    pub fn same_instance(&self, other: &StringMetric) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Similarity for StringMetric {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        self.compare(a, b)
    }

    fn zero_on_empty(&self) -> bool {
        self.inner.domain.zero_on_empty()
    }

    fn name(&self) -> &'static str {
        self.metric_name()
    }
}

impl fmt::Debug for StringMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringMetric")
            .field("simplifier", &self.inner.simplifier)
            .field("tokenizer", &self.tokenizer())
            .field("metric", &self.metric_name())
            .finish()
    }
}

// ============================================================================
// Builder
// ============================================================================

enum Start {
    Metric(StringMetric),
    Str(Arc<dyn Similarity>),
    List(Arc<dyn Similarity<[String]>>),
    Set(Arc<dyn Similarity<TokenSet>>),
    Multiset(Arc<dyn Similarity<Multiset>>),
}

/// Step-by-step construction of a [`StringMetric`]
///
/// Simplifiers and tokenizers run in the order they are added.
///
/// ```
/// use fuzzysim::algorithms::Jaccard;
/// use fuzzysim::pipeline::StringMetricBuilder;
/// use fuzzysim::simplify::Simplifier;
/// use fuzzysim::tokenize::Tokenizer;
///
/// let metric = StringMetricBuilder::with_set(Jaccard)
///     .simplify(Simplifier::Lowercase)
///     .tokenize(Tokenizer::whitespace())
///     .build()
///     .unwrap();
/// assert_eq!(metric.compare("Hello World", "world hello"), 1.0);
/// ```
pub struct StringMetricBuilder {
    start: Start,
    simplifiers: Vec<Simplifier>,
    tokenizers: Vec<Tokenizer>,
}

impl StringMetricBuilder {
    fn start(start: Start) -> Self {
        Self {
            start,
            simplifiers: Vec::new(),
            tokenizers: Vec::new(),
        }
    }

    /// Start from a metric over raw strings
    #[must_use]
    pub fn with<M: Similarity + 'static>(metric: M) -> Self {
        Self::start(Start::Str(Arc::new(metric)))
    }

    /// Start from an existing string metric; building without further
    /// simplifiers hands back the same instance.
    #[must_use]
    pub fn with_metric(metric: StringMetric) -> Self {
        Self::start(Start::Metric(metric))
    }

    #[must_use]
    pub fn with_list<M: Similarity<[String]> + 'static>(metric: M) -> Self {
        Self::start(Start::List(Arc::new(metric)))
    }

    #[must_use]
    pub fn with_set<M: Similarity<TokenSet> + 'static>(metric: M) -> Self {
        Self::start(Start::Set(Arc::new(metric)))
    }

    #[must_use]
    pub fn with_multiset<M: Similarity<Multiset> + 'static>(metric: M) -> Self {
        Self::start(Start::Multiset(Arc::new(metric)))
    }

    #[must_use]
    pub fn simplify(mut self, simplifier: Simplifier) -> Self {
        self.simplifiers.push(simplifier);
        self
    }

    #[must_use]
    pub fn tokenize(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizers.push(tokenizer);
        self
    }

    /// Assemble the pipeline.
    ///
    /// Token metrics need at least one tokenizer; string metrics accept none.
    pub fn build(self) -> Result<StringMetric, ConfigError> {
        let simplifier = match self.simplifiers.len() {
            0 => None,
            1 => self.simplifiers.into_iter().next(),
            _ => Some(Simplifier::chain(self.simplifiers)?),
        };
        let tokenizer = if self.tokenizers.is_empty() {
            None
        } else {
            Some(Tokenizer::chain(self.tokenizers)?)
        };

        let domain = match (self.start, tokenizer) {
            (Start::Metric(metric), None) => {
                return Ok(match simplifier {
                    Some(simplifier) => metric.with_simplifier(simplifier),
                    None => metric,
                });
            }
            (Start::Str(metric), None) => Domain::Str(metric),
            (Start::List(metric), Some(tokenizer)) => Domain::List(metric, tokenizer),
            (Start::Set(metric), Some(tokenizer)) => Domain::Set(metric, tokenizer),
            (Start::Multiset(metric), Some(tokenizer)) => Domain::Multiset(metric, tokenizer),
            (Start::Metric(_) | Start::Str(_), Some(_)) => {
                return Err(ConfigError::invalid(
                    "tokenizer",
                    "string metrics compare whole strings and take no tokenizer",
                ))
            }
            (_, None) => {
                return Err(ConfigError::invalid(
                    "tokenizer",
                    "token metrics need a tokenizer",
                ))
            }
        };

        let metric = StringMetric::from_parts(simplifier, domain);
        tracing::debug!(?metric, "built string metric");
        Ok(metric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{Dice, EuclideanDistance, Identity, Jaccard, Levenshtein, MongeElkan};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_string_metric_without_stages() {
        let metric = StringMetric::for_string(Levenshtein::new());
        assert!(approx_eq(metric.compare("kitten", "sitting"), 1.0 - 3.0 / 7.0));
        assert!(metric.simplifier().is_none());
        assert!(metric.tokenizer().is_none());
        assert_eq!(metric.metric_name(), "levenshtein");
    }

    #[test]
    fn test_token_domains() {
        let set = StringMetric::for_set(Jaccard, Tokenizer::whitespace());
        assert!(approx_eq(set.compare("aaa bbb ccc ddd", "aaa bbb ccc eee"), 0.6));

        let bag = StringMetric::for_multiset(Identity, Tokenizer::whitespace());
        assert_eq!(
            bag.compare("To repeat repeat is to repeat", "To  repeat  repeat  is  to  repeat"),
            1.0
        );

        let list = StringMetric::for_list(MongeElkan::with_inner(Identity), Tokenizer::whitespace());
        assert_eq!(list.compare("test", "test string2"), 1.0);
        assert!(approx_eq(list.compare("test string2", "test"), 0.5));
    }

    #[test]
    fn test_simplifier_runs_before_tokenizer() {
        let metric = StringMetric::for_set(Jaccard, Tokenizer::whitespace())
            .with_simplifier(Simplifier::ReplaceNonWord(" ".into()));
        assert_eq!(metric.compare("a,b", "b a"), 1.0);
    }

    #[test]
    fn test_fusion_prepends_into_one_chain() {
        let base = StringMetric::for_string(Identity).with_simplifier(Simplifier::RemoveNonWord);
        let fused = base.with_simplifier(Simplifier::Lowercase);

        let expected = Simplifier::chain([Simplifier::Lowercase, Simplifier::RemoveNonWord]).unwrap();
        assert_eq!(fused.simplifier(), Some(&expected));
        assert_eq!(fused.compare("Hello, World", "hello world"), 1.0);
        // the original is untouched
        assert_eq!(base.compare("Hello, World", "hello world"), 0.0);
    }

    #[test]
    fn test_fused_pipeline_shares_metric_and_tokenizer() {
        let base = StringMetric::for_multiset(Dice, Tokenizer::qgram(2).unwrap());
        let fused = base.with_simplifier(Simplifier::Lowercase);
        assert_eq!(fused.tokenizer(), base.tokenizer());
        assert_eq!(fused.metric_name(), "dice");
        assert!(!fused.same_instance(&base));
    }

    #[test]
    fn test_builder() {
        let metric = StringMetricBuilder::with_multiset(Dice)
            .simplify(Simplifier::Lowercase)
            .simplify(Simplifier::RemoveNonWord)
            .tokenize(Tokenizer::whitespace())
            .tokenize(Tokenizer::qgram(2).unwrap())
            .build()
            .unwrap();
        assert_eq!(
            metric.simplifier(),
            Some(&Simplifier::chain([Simplifier::Lowercase, Simplifier::RemoveNonWord]).unwrap())
        );
        assert!(matches!(metric.tokenizer(), Some(Tokenizer::Chain(chain)) if chain.len() == 2));
        assert_eq!(metric.compare("AB!", "ab"), 1.0);
    }

    #[test]
    fn test_builder_passthrough_returns_same_instance() {
        let metric = StringMetric::for_string(Levenshtein::new());
        let rebuilt = StringMetricBuilder::with_metric(metric.clone()).build().unwrap();
        assert!(rebuilt.same_instance(&metric));

        let simplified = StringMetricBuilder::with_metric(metric.clone())
            .simplify(Simplifier::Lowercase)
            .build()
            .unwrap();
        assert!(!simplified.same_instance(&metric));
        assert_eq!(simplified.compare("ABC", "abc"), 1.0);
    }

    #[test]
    fn test_builder_rejects_mismatched_tokenizers() {
        assert!(StringMetricBuilder::with_set(Jaccard).build().is_err());
        assert!(StringMetricBuilder::with(Levenshtein::new())
            .tokenize(Tokenizer::whitespace())
            .build()
            .is_err());
    }

    #[test]
    fn test_inputs_without_tokens_only_match_themselves() {
        let bigrams = StringMetric::for_multiset(
            Dice,
            Tokenizer::whitespace().then(Tokenizer::qgram(2).unwrap()),
        );
        assert_eq!(bigrams.compare("a", "x"), 0.0);
        assert_eq!(bigrams.compare("", "x"), 0.0);
        assert_eq!(bigrams.compare("x", ""), 0.0);
        assert_eq!(bigrams.compare("x", "x"), 1.0);

        let words = StringMetric::for_set(Jaccard, Tokenizer::whitespace());
        assert_eq!(words.compare("", "   "), 0.0);
        assert_eq!(words.compare(" ", "\t"), 0.0);

        let list = StringMetric::for_list(MongeElkan::default(), Tokenizer::whitespace());
        assert_eq!(list.compare("   ", ""), 0.0);
    }

    #[test]
    fn test_empty_after_simplifying_scores_zero() {
        let metric = StringMetric::for_string(Levenshtein::new()).with_simplifier(Simplifier::RemoveNonWord);
        assert_eq!(metric.compare("!!", "ab"), 0.0);
        assert_eq!(metric.compare("!!", "?"), 1.0);
    }

    #[test]
    fn test_euclidean_keeps_its_empty_normalisation() {
        let metric = StringMetric::for_multiset(EuclideanDistance, Tokenizer::whitespace());
        assert!(!metric.zero_on_empty());
        assert!(approx_eq(metric.compare("", "a b"), 1.0 - 2f64.sqrt() / 2.0));
        // nothing on either side still means no evidence of similarity
        assert_eq!(metric.compare("", "  "), 0.0);
    }

    #[test]
    fn test_metric_handle_is_shared() {
        let base = StringMetric::for_multiset(Dice, Tokenizer::whitespace());
        let fused = base
            .with_simplifier(Simplifier::Lowercase)
            .with_simplifier(Simplifier::RemoveNonWord);
        assert!(fused.metric().ptr_eq(&base.metric()));
        assert!(matches!(fused.metric(), DomainMetric::Multiset(_)));
        assert_eq!(fused.metric().name(), "dice");

        let other = StringMetric::for_multiset(Dice, Tokenizer::whitespace());
        assert!(!other.metric().ptr_eq(&base.metric()));
    }

    #[test]
    fn test_distance_view() {
        let metric = StringMetric::for_set(Jaccard, Tokenizer::whitespace());
        assert!(approx_eq(metric.distance("a b", "b c"), 1.0 - 1.0 / 3.0));
        assert_eq!(metric.name(), "jaccard");
    }
}
