//! Soundex phonetic matching
//!
//! Strings are encoded by how they sound, then the codes are compared with
//! Jaro–Winkler. Names that collapse to the same code score 1.0 even when they
//! differ, and codes that share a leading letter and digits score partially.

use super::{JaroWinkler, Similarity};

/// Length of a Soundex code: one letter and three digits
pub const SOUNDEX_LENGTH: usize = 4;

/// Soundex similarity
///
/// Encodes both inputs with [`soundex`] and scores the codes with the default
/// [`JaroWinkler`]. Exactly one empty input scores 0.0 before encoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Soundex {
    codes: JaroWinkler,
}

impl Soundex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Score codes with a differently configured Jaro–Winkler
    #[must_use]
    pub fn with_code_metric(codes: JaroWinkler) -> Self {
        Self { codes }
    }

    /// Encode a string to its Soundex code
    #[must_use]
    pub fn encode(&self, s: &str) -> String {
        soundex(s)
    }
}

impl Similarity for Soundex {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        self.codes.similarity(&soundex(a), &soundex(b))
    }

    fn name(&self) -> &'static str {
        "soundex"
    }
}

/// Digit class of an uppercase ASCII letter. Vowels and `Y` map to `'0'`,
/// `H` and `W` to `None` because they are transparent to adjacency.
#[inline]
fn soundex_class(c: char) -> Option<char> {
    let digit = match c {
        'B' | 'F' | 'P' | 'V' => '1',
        'C' | 'G' | 'J' | 'K' | 'Q' | 'S' | 'X' | 'Z' => '2',
        'D' | 'T' => '3',
        'L' => '4',
        'M' | 'N' => '5',
        'R' => '6',
        'H' | 'W' => return None,
        _ => '0',
    };
    Some(digit)
}

/// Encode a string as American Soundex.
///
/// Non-ASCII-letters are ignored. The first letter is kept, the rest are
/// mapped to digit classes; adjacent letters of the same class collapse, a
/// vowel between them separates them, `H` and `W` do not. The code is padded
/// with `'0'` or truncated to four characters. Input without any ASCII letter
/// encodes to the empty string.
///
/// # Examples
/// ```
/// use fuzzysim::algorithms::phonetic::soundex;
/// assert_eq!(soundex("Robert"), "R163");
/// assert_eq!(soundex("Tannhauser"), "T526");
/// assert_eq!(soundex("Ashcraft"), "A261");
/// assert_eq!(soundex(""), "");
/// ```
#[must_use]
pub fn soundex(s: &str) -> String {
    let mut letters = s
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase());

    let Some(first) = letters.next() else {
        return String::new();
    };

    let mut code = String::with_capacity(SOUNDEX_LENGTH);
    code.push(first);
    let mut previous = soundex_class(first);

    for c in letters {
        if code.len() == SOUNDEX_LENGTH {
            break;
        }
        let Some(class) = soundex_class(c) else {
            continue;
        };
        if class != '0' && Some(class) != previous {
            code.push(class);
        }
        previous = Some(class);
    }

    while code.len() < SOUNDEX_LENGTH {
        code.push('0');
    }
    code
}

/// Whether two strings share a Soundex code. Inputs without letters never match.
#[must_use]
pub fn soundex_match(a: &str, b: &str) -> bool {
    let code = soundex(a);
    !code.is_empty() && code == soundex(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_codes() {
        assert_eq!(soundex("Robert"), "R163");
        assert_eq!(soundex("Rupert"), "R163");
        assert_eq!(soundex("Rubin"), "R150");
        assert_eq!(soundex("Tymczak"), "T522");
        assert_eq!(soundex("Pfister"), "P236");
        assert_eq!(soundex("Ozymandias"), "O255");
        assert_eq!(soundex("Travis"), "T612");
        assert_eq!(soundex("Trevor"), "T616");
        assert_eq!(soundex("lee"), "L000");
        assert_eq!(soundex("  o'brien "), "O165");
        assert_eq!(soundex("1234"), "");
    }

    #[test]
    fn test_h_and_w_do_not_separate() {
        // S and C share class 2 across the H
        assert_eq!(soundex("Ashcraft"), "A261");
        assert_eq!(soundex("Ashcroft"), "A261");
    }

    #[test]
    fn test_similarity() {
        let sx = Soundex::new();
        assert_eq!(sx.similarity("James", "Jones"), 1.0);
        assert!(approx_eq(sx.similarity("Tannhauser", "Ozymandias"), 0.5));
        assert!(approx_eq(sx.similarity("Travis", "Trevor"), 0.8833));
        assert!(approx_eq(sx.similarity("Marcus", "Marinus"), 0.8667));
        assert_eq!(sx.similarity("", "Jenkins"), 0.0);
        assert_eq!(sx.similarity("", ""), 1.0);
    }

    #[test]
    fn test_match() {
        assert!(soundex_match("Smith", "Smyth"));
        assert!(!soundex_match("Smith", "Jones"));
        assert!(!soundex_match("42", "17"));
    }
}
