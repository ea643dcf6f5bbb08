//! Custom terminology: project jargon, abbreviations and spelling variants
//! that a general dictionary does not know.

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;

use crate::util::{parse_two_column_table, read_two_column_table};

const BUNDLED_TERMS: &str = include_str!("../../data/terms.csv");

/// Mapping from lowercase term to its canonical replacement.
///
/// A `None` canonical value marks a term that is valid as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermTable {
    terms: BTreeMap<String, Option<String>>,
}

impl TermTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Terms shipped with the crate
    pub fn bundled() -> Self {
        Self::from_rows(parse_two_column_table(BUNDLED_TERMS))
    }

    /// Load a `term,canonical` table; an empty canonical keeps the term as typed
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_rows(read_two_column_table(path)?))
    }

    fn from_rows(rows: Vec<(String, String)>) -> Self {
        let mut table = Self::new();
        table.extend(
            rows.into_iter()
                .map(|(term, canonical)| (term, (!canonical.is_empty()).then_some(canonical))),
        );
        table
    }

    pub fn insert(&mut self, term: &str, canonical: Option<&str>) {
        self.terms.insert(
            term.to_lowercase(),
            canonical.map(|c| c.to_lowercase()),
        );
    }

    pub fn extend<I>(&mut self, terms: I)
    where
        I: IntoIterator<Item = (String, Option<String>)>,
    {
        for (term, canonical) in terms {
            self.insert(&term, canonical.as_deref());
        }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    /// Canonical value for a known term: the replacement, or the term itself
    pub fn resolve(&self, term: &str) -> Option<String> {
        self.terms
            .get(term)
            .map(|canonical| canonical.clone().unwrap_or_else(|| term.to_string()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_keeps_unmapped_terms() {
        let mut table = TermTable::new();
        table.insert("Clazz", Some("class"));
        table.insert("crud", None);

        assert_eq!(table.resolve("clazz"), Some("class".to_string()));
        assert_eq!(table.resolve("crud"), Some("crud".to_string()));
        assert_eq!(table.resolve("unknown"), None);
        assert!(!table.contains("Clazz"));
    }

    #[test]
    fn test_bundled_terms() {
        let table = TermTable::bundled();
        assert_eq!(table.resolve("servise"), Some("service".to_string()));
        assert_eq!(table.resolve("php5"), Some("php5".to_string()));
        assert!(!table.contains("term"));
    }
}
