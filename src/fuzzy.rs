//! Fuzzy string scores on a 0-100 scale.
//!
//! `ratio` is the plain edit-distance score. `token_set_ratio` compares the
//! word sets of two strings so that word order and repeated words do not
//! matter: `"smith john"` and `"john smith john"` score 100.

use std::collections::BTreeSet;
use strsim::normalized_levenshtein;
use unicode_segmentation::UnicodeSegmentation;

/// Edit-distance similarity scaled to 0-100.
///
/// Equal strings score 100, including two empty ones; a single empty side
/// scores 0.
pub fn ratio(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    (normalized_levenshtein(a, b) * 100.0).round() as u8
}

/// Order and duplicate insensitive word-set similarity, 0-100
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let tokens_a = word_set(a);
    let tokens_b = word_set(b);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0;
    }

    let intersection = join(tokens_a.intersection(&tokens_b));
    let only_a = join(tokens_a.difference(&tokens_b));
    let only_b = join(tokens_b.difference(&tokens_a));

    let combined_a = join_nonempty(&intersection, &only_a);
    let combined_b = join_nonempty(&intersection, &only_b);

    ratio(&intersection, &combined_a)
        .max(ratio(&intersection, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

/// Candidates ranked by descending `ratio` against `word`; ties keep input order
pub fn fuzzy_distance<'a, I>(word: &str, candidates: I) -> Vec<(String, u8)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut distances: Vec<(String, u8)> = candidates
        .into_iter()
        .map(|candidate| (candidate.to_string(), ratio(word, candidate)))
        .collect();
    distances.sort_by(|a, b| b.1.cmp(&a.1));
    distances
}

fn word_set(s: &str) -> BTreeSet<String> {
    s.unicode_words().map(str::to_lowercase).collect()
}

fn join<'a, I: Iterator<Item = &'a String>>(words: I) -> String {
    words.map(String::as_str).collect::<Vec<_>>().join(" ")
}

fn join_nonempty(a: &str, b: &str) -> String {
    format!("{} {}", a, b).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio() {
        assert_eq!(ratio("smith", "smith"), 100);
        assert_eq!(ratio("", "smith"), 0);
        assert_eq!(ratio("", ""), 100);
        assert_eq!(ratio("smith", ""), 0);
        assert_eq!(token_set_ratio("", ""), 0);
        assert_eq!(ratio("example.com", "example.org"), 73);
        assert!(ratio("clazz", "class") > ratio("clazz", "close"));
    }

    #[test]
    fn test_token_set_ratio_ignores_order_and_duplicates() {
        assert_eq!(token_set_ratio("john smith", "smith john"), 100);
        assert_eq!(token_set_ratio("john smith", "john smith john"), 100);
        assert_eq!(token_set_ratio("smith", "john smith"), 100);
        assert_eq!(token_set_ratio("", "john"), 0);
        assert!(token_set_ratio("jane doe", "john smith") < 50);
    }

    #[test]
    fn test_fuzzy_distance_ranking() {
        let ranked = fuzzy_distance("clazz", ["close", "class", "claws"]);
        assert_eq!(ranked[0], ("class".to_string(), 60));
        assert_eq!(ranked.len(), 3);
        assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
    }
}
