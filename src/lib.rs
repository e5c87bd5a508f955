//! FuzzySim - string similarity metrics with composable pipelines
//!
//! Scores pairs of strings in `[0, 1]`, 1 meaning identical as far as the
//! metric can tell.
//!
//! # Features
//! - Edit-distance, alignment, Jaro and subsequence kernels over strings
//! - Vector-space and set kernels over token sets and multisets
//! - Soundex and Monge–Elkan
//! - Pipelines that run a simplifier and a tokenizer in front of a token
//!   metric, fusing repeated simplifiers into one chain
//! - Unicode support: character kernels work on scalar values
//!
//! ```
//! use fuzzysim::{metrics, Simplifier};
//!
//! let metric = metrics::cosine_similarity().with_simplifier(Simplifier::Lowercase);
//! assert!((metric.compare("Test String1", "test string2") - 0.5).abs() < 1e-9);
//! ```
//!
//! Every value is immutable after construction and `Send + Sync`; one metric
//! can serve many threads without locking.

pub mod algorithms;
pub mod config;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod simplify;
pub mod tokenize;

pub use algorithms::{clamp_score, EditDistance, Similarity};
pub use config::{MetricKind, PipelineConfig, SimplifierConfig};
pub use error::ConfigError;
pub use pipeline::{DomainMetric, StringMetric, StringMetricBuilder};
pub use simplify::{compose, NormalizationForm, Simplifier, SimplifierChain};
pub use tokenize::{Multiset, QGramConfig, TokenFilter, TokenSet, Tokenizer, TokenizerChain};
