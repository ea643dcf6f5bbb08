//! Structural splitting of identifier-like strings.
//!
//! Splitting happens before any dictionary lookup: a raw token such as
//! `build_Micropayment5HTMLServise` is broken on delimiters first, then on
//! case and digit boundaries, giving `build`, `Micropayment`, `5`, `HTML`,
//! `Servise`. No characters other than delimiters are ever dropped here.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref DELIMITERS: Regex = Regex::new(r"[\W_]+").unwrap();
    static ref EDGE_NOISE: Regex = Regex::new(r"^[\W_]+|[\W_]+$").unwrap();
    static ref DIGITS: Regex = Regex::new(r"\d").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Lower,
    Upper,
    Digit,
    Other,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_lowercase() {
            CharClass::Lower
        } else if c.is_uppercase() {
            CharClass::Upper
        } else if c.is_numeric() {
            CharClass::Digit
        } else {
            CharClass::Other
        }
    }
}

/// Split on every run of non-alphanumeric characters and underscores
pub fn split_alnum(s: &str) -> Vec<&str> {
    DELIMITERS.split(s).filter(|part| !part.is_empty()).collect()
}

/// Split a delimiter-free run at camelCase and letter/digit boundaries.
///
/// An uppercase letter followed by a lowercase one starts a new token, so
/// acronyms stay together: `HTTPServer` gives `HTTP`, `Server` and
/// `ASFRules` gives `ASF`, `Rules`.
pub fn split_case(s: &str) -> Vec<&str> {
    let indices: Vec<(usize, char)> = s.char_indices().collect();
    if indices.is_empty() {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut token_start = 0;

    for pos in 1..indices.len() {
        let prev = CharClass::of(indices[pos - 1].1);
        let cur = CharClass::of(indices[pos].1);
        if prev == cur {
            continue;
        }

        if prev == CharClass::Upper && cur == CharClass::Lower {
            // The capital belongs to the word that follows it
            let new_start = pos - 1;
            if new_start != token_start {
                parts.push(&s[indices[token_start].0..indices[new_start].0]);
                token_start = new_start;
            }
        } else {
            parts.push(&s[indices[token_start].0..indices[pos].0]);
            token_start = pos;
        }
    }
    parts.push(&s[indices[token_start].0..]);
    parts
}

/// Full structural split: delimiters first, then case and digit boundaries
pub fn split_lexeme(s: &str) -> Vec<String> {
    split_alnum(s)
        .into_iter()
        .flat_map(split_case)
        .map(str::to_string)
        .collect()
}

/// Remove leading and trailing delimiter noise
pub fn strip_noise(s: &str) -> String {
    EDGE_NOISE.replace_all(s, "").into_owned()
}

pub fn drop_digits(s: &str) -> String {
    DIGITS.replace_all(s, "").into_owned()
}

/// Decompose and strip combining marks so `Renée` compares as `Renee`
pub fn fold_diacritics(s: &str) -> String {
    s.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Collapse any whitespace runs into single spaces and trim the ends
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
