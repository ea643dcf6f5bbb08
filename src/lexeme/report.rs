use std::collections::{BTreeMap, BTreeSet};

use super::types::Lexeme;

/// Ordered words of a lexeme: mapped values, and the verbatim text of
/// misses unless `skip_miss` is set
pub fn flatten_lexeme(lexeme: &Lexeme, skip_miss: bool) -> Vec<String> {
    lexeme
        .segments()
        .filter(|segment| !(skip_miss && segment.is_miss()))
        .map(|segment| segment.value().to_string())
        .collect()
}

/// Missed words across many lexemes, mapped to the lexemes they occurred in.
///
/// Useful for curating the custom term table: every key is a candidate
/// abbreviation or jargon word the dictionary did not know.
pub fn collect_misses<'a, I>(lexemes: I) -> BTreeMap<String, BTreeSet<String>>
where
    I: IntoIterator<Item = &'a Lexeme>,
{
    let mut misses: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for lexeme in lexemes {
        for segment in lexeme.segments().filter(|segment| segment.is_miss()) {
            misses
                .entry(segment.text.to_lowercase())
                .or_default()
                .insert(lexeme.original_text.clone());
        }
    }
    misses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexeme::{FstDictionary, LexemeParser};

    #[test]
    fn test_collect_misses() {
        let parser = LexemeParser::new(FstDictionary::from_words(["adapter", "data"]).unwrap());
        let lexemes: Vec<Lexeme> = ["HL7Adapter", "hlData", "DataAdapter"]
            .iter()
            .map(|l| parser.parse_lexeme(l))
            .collect();

        let misses = collect_misses(&lexemes);
        assert_eq!(misses.len(), 2);
        assert_eq!(
            misses["hl"].iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["HL7Adapter", "hlData"]
        );
        assert!(misses.contains_key("7"));
    }
}
