use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use super::dictionary::{FstDictionary, WordDictionary};
use super::split::{drop_digits, split_lexeme, strip_noise};
use super::terms::TermTable;
use super::types::{Lexeme, Segment, SubLexeme};
use super::TARGET_LEXEME;
use crate::fuzzy::fuzzy_distance;

// Shortest prefix considered a word candidate, in characters
const MIN_SEGMENT_CHARS: usize = 2;

// Number of ranked candidates kept on a fuzzy segment
const MAX_KEPT_DISTANCES: usize = 5;

/// Fuzzy matching thresholds on a 0-100 scale; `None` disables that step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterSettings {
    pub term_threshold: Option<u8>,
    pub dict_threshold: Option<u8>,
}

/// Splits identifier-like strings into dictionary words and known terms
pub struct LexemeParser {
    terms: TermTable,
    dictionary: Box<dyn WordDictionary + Send + Sync>,
    settings: SegmenterSettings,
}

impl LexemeParser {
    pub fn new(dictionary: impl WordDictionary + Send + Sync + 'static) -> Self {
        Self {
            terms: TermTable::new(),
            dictionary: Box::new(dictionary),
            settings: SegmenterSettings::default(),
        }
    }

    /// Parser over the bundled dictionary and term table
    pub fn bundled() -> Result<Self> {
        Ok(Self::new(FstDictionary::bundled()?).with_terms(TermTable::bundled()))
    }

    pub fn with_terms(mut self, terms: TermTable) -> Self {
        self.terms = terms;
        self
    }

    pub fn with_settings(mut self, settings: SegmenterSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn add_terms<I>(&mut self, terms: I)
    where
        I: IntoIterator<Item = (String, Option<String>)>,
    {
        self.terms.extend(terms);
    }

    pub fn terms(&self) -> &TermTable {
        &self.terms
    }

    pub fn settings(&self) -> SegmenterSettings {
        self.settings
    }

    /// Structurally split a raw token and segment every piece into words.
    ///
    /// Never fails: a piece that cannot be segmented, or whose segmentation
    /// errors, is kept verbatim as a single miss.
    pub fn parse_lexeme(&self, lexeme: &str) -> Lexeme {
        let clean = strip_noise(lexeme);
        let texts = if self.terms.contains(&clean.to_lowercase()) {
            vec![clean]
        } else {
            split_lexeme(lexeme)
        };

        let mut parts: Vec<SubLexeme> = texts
            .into_iter()
            .map(|text| {
                let segments = self.segment_into_words(&text).unwrap_or_else(|err| {
                    warn!(
                        target: TARGET_LEXEME,
                        "Failed to segment '{}' of lexeme '{}': {}", text, lexeme, err
                    );
                    vec![Segment::miss(&text)]
                });
                SubLexeme { text, segments }
            })
            .collect();

        if parts.is_empty() {
            parts.push(SubLexeme {
                text: lexeme.to_string(),
                segments: vec![Segment::miss(lexeme)],
            });
        }

        Lexeme {
            original_text: lexeme.to_string(),
            parts,
        }
    }

    /// Segment a delimiter-free string into the longest known words.
    ///
    /// Prefixes are tried longest first. When the remainder cannot be
    /// resolved, the last accepted word is excluded and segmentation starts
    /// over from the beginning. Every restart adds a new string to the
    /// exclusion set, so the loop terminates. With nothing accepted the
    /// whole input becomes a single miss.
    pub fn segment_into_words(&self, sub_lexeme: &str) -> Result<Vec<Segment>> {
        let mut exclude: HashSet<String> = HashSet::new();
        let mut mapped: HashMap<String, Option<Segment>> = HashMap::new();

        'restart: loop {
            let mut segments: Vec<Segment> = Vec::new();
            let mut remainder = sub_lexeme;

            while !remainder.is_empty() {
                match self.longest_prefix(remainder, &exclude, &mut mapped)? {
                    Some(segment) => {
                        remainder = &remainder[segment.text.len()..];
                        segments.push(segment);
                    }
                    None => match segments.last() {
                        Some(last) => {
                            debug!(
                                target: TARGET_LEXEME,
                                "Dead end after '{}' in '{}', restarting", last.text, sub_lexeme
                            );
                            exclude.insert(last.text.clone());
                            continue 'restart;
                        }
                        None => return Ok(vec![Segment::miss(sub_lexeme)]),
                    },
                }
            }

            return Ok(segments);
        }
    }

    fn longest_prefix(
        &self,
        remainder: &str,
        exclude: &HashSet<String>,
        mapped: &mut HashMap<String, Option<Segment>>,
    ) -> Result<Option<Segment>> {
        let boundaries: Vec<usize> = remainder
            .char_indices()
            .map(|(i, _)| i)
            .skip(1)
            .chain(std::iter::once(remainder.len()))
            .collect();

        // boundaries[k - 1] is the byte end of the first k characters
        for chars in (MIN_SEGMENT_CHARS..=boundaries.len()).rev() {
            let prefix = &remainder[..boundaries[chars - 1]];
            if exclude.contains(prefix) {
                continue;
            }
            let segment = match mapped.get(prefix) {
                Some(known) => known.clone(),
                None => {
                    let segment = self.map_segment(prefix)?;
                    mapped.insert(prefix.to_string(), segment.clone());
                    segment
                }
            };
            if segment.is_some() {
                return Ok(segment);
            }
        }
        Ok(None)
    }

    /// Resolve one candidate word, trying in order: exact term, digit-free
    /// term, fuzzy term, dictionary word, dictionary correction.
    pub fn map_segment(&self, segment: &str) -> Result<Option<Segment>> {
        let low = segment.to_lowercase();
        let digit_free = drop_digits(&low);

        if let Some(canonical) = self.terms.resolve(&low) {
            return Ok(Some(Segment::term(segment, &canonical, vec![(low, 100)])));
        }

        if !digit_free.is_empty() {
            if let Some(canonical) = self.terms.resolve(&digit_free) {
                return Ok(Some(Segment::term(
                    segment,
                    &canonical,
                    vec![(digit_free, 100)],
                )));
            }
        }

        if let Some(threshold) = self.settings.term_threshold {
            let mut distances = fuzzy_distance(&low, self.terms.keys());
            if let Some((term, score)) = distances.first().cloned() {
                if score >= threshold {
                    if let Some(canonical) = self.terms.resolve(&term) {
                        distances.truncate(MAX_KEPT_DISTANCES);
                        return Ok(Some(Segment::term(segment, &canonical, distances)));
                    }
                }
            }
        }

        if digit_free.is_empty() {
            return Ok(None);
        }

        if self.dictionary.check(&digit_free) {
            return Ok(Some(Segment::dict(segment, &digit_free)));
        }

        if let Some(threshold) = self.settings.dict_threshold {
            let suggestions = self.dictionary.suggest(&digit_free)?;
            let mut distances = fuzzy_distance(
                &digit_free,
                suggestions
                    .iter()
                    .map(String::as_str)
                    .filter(|word| word.chars().all(char::is_alphabetic)),
            );
            if let Some((word, score)) = distances.first().cloned() {
                if score >= threshold {
                    distances.truncate(MAX_KEPT_DISTANCES);
                    return Ok(Some(Segment::correction(segment, &word, distances)));
                }
            }
        }

        Ok(None)
    }
}
