//! Natural-language word dictionaries used by the segmenter.

use anyhow::{Context, Result};
use fst::automaton::Levenshtein;
use fst::{IntoStreamer, Set};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::TARGET_LEXEME;

const BUNDLED_WORDS: &str = include_str!("../../data/words.txt");

// Words at most this long get suggestions within one edit, longer ones two
const SHORT_WORD_LEN: usize = 4;

/// Exact membership plus fuzzy suggestions, the two capabilities the
/// segmenter needs from a dictionary
pub trait WordDictionary {
    fn check(&self, word: &str) -> bool;

    /// Candidate corrections for a word that failed `check`, unranked
    fn suggest(&self, word: &str) -> Result<Vec<String>>;
}

/// Word list compiled into a finite state transducer set
pub struct FstDictionary {
    words: Set<Vec<u8>>,
}

impl FstDictionary {
    /// Build from any word source; words are lowercased and deduplicated
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sorted: BTreeSet<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty() && !w.starts_with('#'))
            .collect();
        let words = Set::from_iter(sorted.iter()).context("Failed to build word set")?;
        Ok(Self { words })
    }

    /// Dictionary built from the word list shipped with the crate
    pub fn bundled() -> Result<Self> {
        Self::from_words(BUNDLED_WORDS.lines())
    }

    /// Load a newline-separated word list such as `/usr/share/dict/words`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list {}", path.display()))?;
        let dictionary = Self::from_words(content.lines())?;
        info!(
            target: TARGET_LEXEME,
            "Loaded {} dictionary words from {}",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordDictionary for FstDictionary {
    fn check(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    fn suggest(&self, word: &str) -> Result<Vec<String>> {
        let distance = if word.chars().count() <= SHORT_WORD_LEN { 1 } else { 2 };
        let automaton = Levenshtein::new(word, distance)
            .with_context(|| format!("Failed to build automaton for '{}'", word))?;
        let suggestions = self
            .words
            .search(automaton)
            .into_stream()
            .into_strs()
            .context("Dictionary contains non UTF-8 words")?;
        debug!(
            target: TARGET_LEXEME,
            "Dictionary suggested {} words for '{}'",
            suggestions.len(),
            word
        );
        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_membership() {
        let dictionary = FstDictionary::from_words(["Service", "class", "money"]).unwrap();
        assert_eq!(dictionary.len(), 3);
        assert!(dictionary.check("service"));
        assert!(dictionary.check("class"));
        assert!(!dictionary.check("clazz"));
    }

    #[test]
    fn test_suggestions() {
        let dictionary = FstDictionary::from_words(["service", "class", "money", "dialog"]).unwrap();
        let suggestions = dictionary.suggest("servise").unwrap();
        assert_eq!(suggestions, vec!["service".to_string()]);
        assert!(dictionary.suggest("maney").unwrap().contains(&"money".to_string()));
        assert!(dictionary.suggest("xyzzy").unwrap().is_empty());
    }

    #[test]
    fn test_bundled_dictionary() {
        let dictionary = FstDictionary::bundled().unwrap();
        assert!(!dictionary.is_empty());
        assert!(dictionary.check("open"));
        assert!(dictionary.check("source"));
        assert!(dictionary.check("service"));
        for word in ["the", "and", "read", "write", "hello"] {
            assert!(dictionary.check(word), "bundled dictionary lacks '{}'", word);
        }
    }

    #[test]
    fn test_bundled_words_segment_plain_identifiers() {
        let parser = crate::lexeme::LexemeParser::bundled().unwrap();
        let lexeme = parser.parse_lexeme("readTheFile");
        assert!(!lexeme.has_misses());
        assert_eq!(
            crate::lexeme::flatten_lexeme(&lexeme, false),
            vec!["read", "the", "file"]
        );
    }
}
