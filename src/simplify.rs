//! Simplifiers: deterministic string normalisation run before comparison
//!
//! A [`Simplifier`] maps a string to a simpler string. Every built-in maps the
//! empty string to the empty string and accepts any sequence of scalar values.
//!
//! Several simplifiers run in order through a [`SimplifierChain`]. Chains are
//! always flat: building a chain from chains splices their steps in place, so
//! two chains with the same steps compare equal however they were assembled.

use crate::algorithms::phonetic::soundex;
use crate::error::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Unicode normalisation form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationForm {
    Nfc,
    Nfd,
    Nfkc,
    Nfkd,
}

#[derive(Clone)]
pub enum Simplifier {
    /// Locale-insensitive lowercase
    Lowercase,
    /// Locale-insensitive uppercase
    Uppercase,
    /// Drop every char outside `[A-Za-z0-9_]`
    RemoveNonWord,
    /// Replace each run of chars outside `[A-Za-z0-9_]` with the string
    ReplaceNonWord(String),
    /// Decompose (NFD) and drop combining marks
    StripDiacritics,
    Normalize(NormalizationForm),
    /// Replace every match of `pattern`; `$1`-style group references expand
    Replace { pattern: Regex, replacement: String },
    /// Replace the input with its Soundex code
    Soundex,
    Chain(SimplifierChain),
    Custom {
        name: &'static str,
        apply: Arc<dyn Fn(&str) -> String + Send + Sync>,
    },
}

impl Simplifier {
    pub fn replace(pattern: &str, replacement: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Simplifier::Replace {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
        })
    }

    pub fn custom<F>(name: &'static str, apply: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Simplifier::Custom {
            name,
            apply: Arc::new(apply),
        }
    }

    /// Chain several simplifiers, first one runs first
    pub fn chain<I>(steps: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = Simplifier>,
    {
        Ok(Simplifier::Chain(SimplifierChain::new(steps)?))
    }

    #[must_use]
    pub fn apply(&self, input: &str) -> String {
        if input.is_empty() {
            return String::new();
        }
        match self {
            Simplifier::Lowercase => input.to_lowercase(),
            Simplifier::Uppercase => input.to_uppercase(),
            Simplifier::RemoveNonWord => input.chars().filter(|&c| is_word_char(c)).collect(),
            Simplifier::ReplaceNonWord(replacement) => replace_non_word(input, replacement),
            Simplifier::StripDiacritics => {
                input.nfd().filter(|&c| !is_combining_mark(c)).collect()
            }
            Simplifier::Normalize(form) => match form {
                NormalizationForm::Nfc => input.nfc().collect(),
                NormalizationForm::Nfd => input.nfd().collect(),
                NormalizationForm::Nfkc => input.nfkc().collect(),
                NormalizationForm::Nfkd => input.nfkd().collect(),
            },
            Simplifier::Replace {
                pattern,
                replacement,
            } => pattern.replace_all(input, replacement.as_str()).into_owned(),
            Simplifier::Soundex => soundex(input),
            Simplifier::Chain(chain) => chain.apply(input),
            Simplifier::Custom { apply, .. } => apply(input),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Simplifier::Lowercase => "lowercase",
            Simplifier::Uppercase => "uppercase",
            Simplifier::RemoveNonWord => "remove_non_word",
            Simplifier::ReplaceNonWord(_) => "replace_non_word",
            Simplifier::StripDiacritics => "strip_diacritics",
            Simplifier::Normalize(_) => "normalize",
            Simplifier::Replace { .. } => "replace",
            Simplifier::Soundex => "soundex",
            Simplifier::Chain(_) => "chain",
            Simplifier::Custom { name, .. } => *name,
        }
    }

    /// Steps this simplifier contributes to a chain
    fn into_steps(self) -> Vec<Simplifier> {
        match self {
            Simplifier::Chain(chain) => chain.steps,
            other => vec![other],
        }
    }
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn replace_non_word(input: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_run = false;
    for c in input.chars() {
        if is_word_char(c) {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push_str(replacement);
            in_run = true;
        }
    }
    out
}

/// Prepend `new` to `existing` so that `new` runs first.
///
/// The result is a single flat chain: `compose(new, [s1, …, sn])` is
/// `[new, s1, …, sn]` and `compose(new, s)` is `[new, s]`.
#[must_use]
pub fn compose(new: Simplifier, existing: Simplifier) -> Simplifier {
    let mut steps = new.into_steps();
    steps.extend(existing.into_steps());
    Simplifier::Chain(SimplifierChain { steps })
}

// ============================================================================
// SimplifierChain
// ============================================================================

/// Ordered, flat, non-empty list of simplifiers
///
/// `apply(s) = sn(…s1(s))`.
#[derive(Clone, PartialEq)]
pub struct SimplifierChain {
    steps: Vec<Simplifier>,
}

impl SimplifierChain {
    pub fn new<I>(steps: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = Simplifier>,
    {
        let steps: Vec<Simplifier> = steps.into_iter().flat_map(Simplifier::into_steps).collect();
        if steps.is_empty() {
            return Err(ConfigError::EmptyChain("simplifier"));
        }
        Ok(Self { steps })
    }

    #[must_use]
    pub fn steps(&self) -> &[Simplifier] {
        &self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn apply(&self, input: &str) -> String {
        let mut current = input.to_owned();
        for step in &self.steps {
            current = step.apply(&current);
        }
        current
    }
}

impl fmt::Debug for SimplifierChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.steps).finish()
    }
}

impl fmt::Debug for Simplifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Simplifier::ReplaceNonWord(replacement) => {
                f.debug_tuple("ReplaceNonWord").field(replacement).finish()
            }
            Simplifier::Normalize(form) => f.debug_tuple("Normalize").field(form).finish(),
            Simplifier::Replace {
                pattern,
                replacement,
            } => f
                .debug_struct("Replace")
                .field("pattern", &pattern.as_str())
                .field("replacement", replacement)
                .finish(),
            Simplifier::Chain(chain) => f.debug_tuple("Chain").field(chain).finish(),
            Simplifier::Custom { name, .. } => write!(f, "Custom({name})"),
            other => f.write_str(other.name()),
        }
    }
}

impl PartialEq for Simplifier {
    fn eq(&self, other: &Self) -> bool {
        use Simplifier::*;
        match (self, other) {
            (Lowercase, Lowercase)
            | (Uppercase, Uppercase)
            | (RemoveNonWord, RemoveNonWord)
            | (StripDiacritics, StripDiacritics)
            | (Soundex, Soundex) => true,
            (ReplaceNonWord(a), ReplaceNonWord(b)) => a == b,
            (Normalize(a), Normalize(b)) => a == b,
            (
                Replace {
                    pattern: pa,
                    replacement: ra,
                },
                Replace {
                    pattern: pb,
                    replacement: rb,
                },
            ) => pa.as_str() == pb.as_str() && ra == rb,
            (Chain(a), Chain(b)) => a == b,
            (Custom { apply: a, .. }, Custom { apply: b, .. }) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
