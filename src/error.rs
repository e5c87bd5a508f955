//! Construction-time errors.
//!
//! Every fallible constructor in the crate returns [`ConfigError`]. Comparing
//! two strings never fails: once a metric exists, `similarity` is total.

use thiserror::Error;

/// Errors raised while building simplifiers, tokenizers, metrics or pipelines
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// q-gram size must be at least 1
    #[error("q-gram size must be at least 1, got {0}")]
    InvalidQ(usize),

    /// Gap penalty was negative or not finite
    #[error("gap penalty must be a finite non-negative number, got {0}")]
    InvalidGap(f64),

    /// Any other numeric parameter outside its accepted range
    #[error("parameter '{name}' is invalid: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    /// A simplifier or tokenizer chain was built from an empty list
    #[error("{0} chain must contain at least one element")]
    EmptyChain(&'static str),

    /// Regular expression failed to compile
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Configuration named a metric this crate does not provide
    #[error("unknown metric: {0}")]
    UnknownMetric(String),
}

impl ConfigError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
