//! Tokenizers and the token containers the domain metrics compare
//!
//! A [`Tokenizer`] turns a string into one of three containers:
//!
//! - a list (`Vec<String>`): order and duplicates preserved
//! - a [`TokenSet`]: duplicates collapsed
//! - a [`Multiset`]: duplicates kept as counts
//!
//! Empty input always yields an empty container. Tokenizers compose: a
//! [`Tokenizer::Filter`] drops tokens, a [`Tokenizer::Chain`] feeds every token
//! of one stage through the next.

use crate::error::ConfigError;
use ahash::{AHashMap, AHashSet};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Default sentinel for padded q-grams
pub const DEFAULT_PADDING: char = '#';

/// Parameters of a character q-gram tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QGramConfig {
    pub q: usize,
    /// Sentinel used for padding; `None` leaves the input unpadded
    pub padding: Option<char>,
}

impl Default for QGramConfig {
    /// Padded trigrams
    fn default() -> Self {
        Self {
            q: 3,
            padding: Some(DEFAULT_PADDING),
        }
    }
}

impl QGramConfig {
    pub fn tokenizer(&self) -> Result<Tokenizer, ConfigError> {
        match self.padding {
            Some(pad) => Tokenizer::qgram_with_padding_char(self.q, pad),
            None => Tokenizer::qgram(self.q),
        }
    }
}

// ============================================================================
// Containers
// ============================================================================

/// Set of distinct tokens
#[derive(Debug, Clone, Default)]
pub struct TokenSet {
    tokens: AHashSet<String>,
}

impl TokenSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: impl Into<String>) -> bool {
        self.tokens.insert(token.into())
    }

    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// `|self ∩ other|`
    #[must_use]
    pub fn intersection_len(&self, other: &TokenSet) -> usize {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().filter(|t| large.contains(t)).count()
    }

    /// `|self ∪ other|`
    #[must_use]
    pub fn union_len(&self, other: &TokenSet) -> usize {
        self.len() + other.len() - self.intersection_len(other)
    }
}

impl PartialEq for TokenSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|t| other.contains(t))
    }
}

impl Eq for TokenSet {}

impl<S: Into<String>> FromIterator<S> for TokenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Bag of tokens with multiplicities
///
/// `len()` is the total count (each duplicate counted), `distinct_len()` the
/// number of different tokens.
#[derive(Debug, Clone, Default)]
pub struct Multiset {
    counts: AHashMap<String, usize>,
    len: usize,
}

impl Multiset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: impl Into<String>) {
        *self.counts.entry(token.into()).or_insert(0) += 1;
        self.len += 1;
    }

    #[must_use]
    pub fn count(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn distinct_len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Distinct tokens with their counts
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(t, &c)| (t.as_str(), c))
    }

    /// Sum of per-token minimum counts
    #[must_use]
    pub fn intersection_len(&self, other: &Multiset) -> usize {
        let (small, large) = if self.distinct_len() <= other.distinct_len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().map(|(t, c)| c.min(large.count(t))).sum()
    }

    /// Sum of per-token maximum counts
    #[must_use]
    pub fn union_len(&self, other: &Multiset) -> usize {
        self.len + other.len - self.intersection_len(other)
    }

    /// Every distinct token of either side with both counts
    pub fn zip_counts<'a>(
        &'a self,
        other: &'a Multiset,
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        let left = self.iter().map(move |(t, c)| (c, other.count(t)));
        let right_only = other
            .iter()
            .filter(move |(t, _)| self.count(t) == 0)
            .map(|(_, c)| (0, c));
        left.chain(right_only)
    }
}

impl PartialEq for Multiset {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self.distinct_len() == other.distinct_len()
            && self.iter().all(|(t, c)| other.count(t) == c)
    }
}

impl Eq for Multiset {}

impl<S: Into<String>> FromIterator<S> for Multiset {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut multiset = Multiset::new();
        for token in iter {
            multiset.insert(token);
        }
        multiset
    }
}

// ============================================================================
// Filters
// ============================================================================

/// Decides which tokens a [`Tokenizer::Filter`] drops
#[derive(Clone)]
pub enum TokenFilter {
    /// Drop tokens found in the set
    StopWords(Arc<AHashSet<String>>),
    /// Drop tokens shorter than this many chars
    MinLength(usize),
    /// Drop tokens for which the predicate returns true
    Predicate {
        name: &'static str,
        drop: Arc<dyn Fn(&str) -> bool + Send + Sync>,
    },
}

impl TokenFilter {
    pub fn stop_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TokenFilter::StopWords(Arc::new(words.into_iter().map(Into::into).collect()))
    }

    pub fn predicate<F>(name: &'static str, drop: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        TokenFilter::Predicate {
            name,
            drop: Arc::new(drop),
        }
    }

    #[must_use]
    pub fn drops(&self, token: &str) -> bool {
        match self {
            TokenFilter::StopWords(words) => words.contains(token),
            TokenFilter::MinLength(min) => token.chars().count() < *min,
            TokenFilter::Predicate { drop, .. } => drop(token),
        }
    }
}

impl fmt::Debug for TokenFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenFilter::StopWords(words) => write!(f, "StopWords({} words)", words.len()),
            TokenFilter::MinLength(min) => write!(f, "MinLength({min})"),
            TokenFilter::Predicate { name, .. } => write!(f, "Predicate({name})"),
        }
    }
}

impl PartialEq for TokenFilter {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TokenFilter::StopWords(a), TokenFilter::StopWords(b)) => {
                Arc::ptr_eq(a, b) || (a.len() == b.len() && a.iter().all(|w| b.contains(w)))
            }
            (TokenFilter::MinLength(a), TokenFilter::MinLength(b)) => a == b,
            (
                TokenFilter::Predicate { drop: a, .. },
                TokenFilter::Predicate { drop: b, .. },
            ) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// ============================================================================
// Tokenizer
// ============================================================================

/// String → tokens
#[derive(Clone)]
pub enum Tokenizer {
    /// Split on maximal runs of Unicode whitespace
    Whitespace,
    /// Every contiguous run of `q` chars, optionally padded with `q − 1`
    /// sentinels on both ends
    QGram {
        q: NonZeroUsize,
        padding: Option<char>,
    },
    /// Every contiguous run of `q` whitespace tokens, joined by one space
    WordQGram { q: NonZeroUsize },
    /// Split on matches of a regular expression, discarding empty pieces
    Pattern(Regex),
    /// Apply `tokenizer`, then drop tokens the filter rejects
    Filter {
        tokenizer: Box<Tokenizer>,
        filter: TokenFilter,
    },
    /// Apply the first stage to the input and each later stage to every
    /// token of the previous one
    Chain(TokenizerChain),
}

impl Tokenizer {
    #[must_use]
    pub fn whitespace() -> Self {
        Tokenizer::Whitespace
    }

    /// Unpadded character q-grams
    pub fn qgram(q: usize) -> Result<Self, ConfigError> {
        Ok(Tokenizer::QGram {
            q: non_zero_q(q)?,
            padding: None,
        })
    }

    /// Character q-grams padded with [`DEFAULT_PADDING`]
    pub fn qgram_with_padding(q: usize) -> Result<Self, ConfigError> {
        Self::qgram_with_padding_char(q, DEFAULT_PADDING)
    }

    pub fn qgram_with_padding_char(q: usize, padding: char) -> Result<Self, ConfigError> {
        Ok(Tokenizer::QGram {
            q: non_zero_q(q)?,
            padding: Some(padding),
        })
    }

    pub fn word_qgram(q: usize) -> Result<Self, ConfigError> {
        Ok(Tokenizer::WordQGram { q: non_zero_q(q)? })
    }

    pub fn pattern(pattern: &str) -> Result<Self, ConfigError> {
        Ok(Tokenizer::Pattern(Regex::new(pattern)?))
    }

    /// Wrap this tokenizer so tokens the filter rejects are dropped
    #[must_use]
    pub fn filter(self, filter: TokenFilter) -> Self {
        Tokenizer::Filter {
            tokenizer: Box::new(self),
            filter,
        }
    }

    /// Chain stages, flattening nested chains; a single stage is returned as is
    pub fn chain<I>(stages: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = Tokenizer>,
    {
        let mut chain = TokenizerChain::new(stages)?;
        if chain.stages.len() == 1 {
            return Ok(chain.stages.remove(0));
        }
        Ok(Tokenizer::Chain(chain))
    }

    /// Feed every token of `self` through `next`
    #[must_use]
    pub fn then(self, next: Tokenizer) -> Self {
        let mut stages = self.into_stages();
        stages.extend(next.into_stages());
        Tokenizer::Chain(TokenizerChain { stages })
    }

    fn into_stages(self) -> Vec<Tokenizer> {
        match self {
            Tokenizer::Chain(chain) => chain.stages,
            other => vec![other],
        }
    }

    /// Ordered tokens, duplicates preserved
    #[must_use]
    pub fn tokenize_to_list(&self, input: &str) -> Vec<String> {
        let mut out = Vec::new();
        self.tokenize_into(input, &mut out);
        out
    }

    #[must_use]
    pub fn tokenize_to_set(&self, input: &str) -> TokenSet {
        self.tokenize_to_list(input).into_iter().collect()
    }

    #[must_use]
    pub fn tokenize_to_multiset(&self, input: &str) -> Multiset {
        self.tokenize_to_list(input).into_iter().collect()
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Tokenizer::Whitespace => "whitespace",
            Tokenizer::QGram { padding: None, .. } => "qgram",
            Tokenizer::QGram { .. } => "qgram_padded",
            Tokenizer::WordQGram { .. } => "word_qgram",
            Tokenizer::Pattern(_) => "pattern",
            Tokenizer::Filter { .. } => "filter",
            Tokenizer::Chain(_) => "chain",
        }
    }

    fn tokenize_into(&self, input: &str, out: &mut Vec<String>) {
        if input.is_empty() {
            return;
        }
        match self {
            Tokenizer::Whitespace => out.extend(input.split_whitespace().map(str::to_owned)),
            Tokenizer::QGram { q, padding } => qgrams_into(input, q.get(), *padding, out),
            Tokenizer::WordQGram { q } => {
                let words: Vec<&str> = input.split_whitespace().collect();
                out.extend(words.windows(q.get()).map(|w| w.join(" ")));
            }
            Tokenizer::Pattern(regex) => out.extend(
                regex
                    .split(input)
                    .filter(|piece| !piece.is_empty())
                    .map(str::to_owned),
            ),
            Tokenizer::Filter { tokenizer, filter } => {
                let start = out.len();
                tokenizer.tokenize_into(input, out);
                let mut kept = out.split_off(start);
                kept.retain(|token| !filter.drops(token));
                out.extend(kept);
            }
            Tokenizer::Chain(chain) => {
                let mut tokens = vec![input.to_owned()];
                for stage in &chain.stages {
                    let mut next = Vec::with_capacity(tokens.len());
                    for token in &tokens {
                        stage.tokenize_into(token, &mut next);
                    }
                    tokens = next;
                }
                out.extend(tokens);
            }
        }
    }
}

fn non_zero_q(q: usize) -> Result<NonZeroUsize, ConfigError> {
    NonZeroUsize::new(q).ok_or(ConfigError::InvalidQ(q))
}

fn qgrams_into(input: &str, q: usize, padding: Option<char>, out: &mut Vec<String>) {
    let mut chars: Vec<char> = Vec::with_capacity(input.len() + 2 * (q - 1));
    if let Some(pad) = padding {
        chars.extend(std::iter::repeat(pad).take(q - 1));
        chars.extend(input.chars());
        chars.extend(std::iter::repeat(pad).take(q - 1));
    } else {
        chars.extend(input.chars());
    }

    if chars.len() < q {
        return;
    }
    out.extend(chars.windows(q).map(|w| w.iter().collect::<String>()));
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tokenizer::Whitespace => write!(f, "Whitespace"),
            Tokenizer::QGram { q, padding } => f
                .debug_struct("QGram")
                .field("q", q)
                .field("padding", padding)
                .finish(),
            Tokenizer::WordQGram { q } => f.debug_struct("WordQGram").field("q", q).finish(),
            Tokenizer::Pattern(regex) => write!(f, "Pattern({:?})", regex.as_str()),
            Tokenizer::Filter { tokenizer, filter } => f
                .debug_struct("Filter")
                .field("tokenizer", tokenizer)
                .field("filter", filter)
                .finish(),
            Tokenizer::Chain(chain) => f.debug_tuple("Chain").field(&chain.stages).finish(),
        }
    }
}

// ============================================================================
// TokenizerChain
// ============================================================================

/// Ordered, flat, non-empty list of tokenizer stages
#[derive(Clone, PartialEq)]
pub struct TokenizerChain {
    stages: Vec<Tokenizer>,
}

impl TokenizerChain {
    /// Flatten `stages` into one chain; an empty chain is rejected
    pub fn new<I>(stages: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = Tokenizer>,
    {
        let stages: Vec<Tokenizer> = stages.into_iter().flat_map(Tokenizer::into_stages).collect();
        if stages.is_empty() {
            return Err(ConfigError::EmptyChain("tokenizer"));
        }
        Ok(Self { stages })
    }

    #[must_use]
    pub fn stages(&self) -> &[Tokenizer] {
        &self.stages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl fmt::Debug for TokenizerChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.stages).finish()
    }
}

impl PartialEq for Tokenizer {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Tokenizer::Whitespace, Tokenizer::Whitespace) => true,
            (
                Tokenizer::QGram { q: qa, padding: pa },
                Tokenizer::QGram { q: qb, padding: pb },
            ) => qa == qb && pa == pb,
            (Tokenizer::WordQGram { q: qa }, Tokenizer::WordQGram { q: qb }) => qa == qb,
            (Tokenizer::Pattern(a), Tokenizer::Pattern(b)) => a.as_str() == b.as_str(),
            (
                Tokenizer::Filter {
                    tokenizer: ta,
                    filter: fa,
                },
                Tokenizer::Filter {
                    tokenizer: tb,
                    filter: fb,
                },
            ) => ta == tb && fa == fb,
            (Tokenizer::Chain(a), Tokenizer::Chain(b)) => a == b,
            _ => false,
        }
    }
}
