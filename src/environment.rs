use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::actor::{ActorParser, RoleTable};
use crate::lexeme::{FstDictionary, LexemeParser, SegmenterSettings, TermTable};
use crate::similarity::{SimilarityEvaluator, SimilaritySettings};

pub const CONFIG_VAR: &str = "ACTORGRAPH_CONFIG";
pub const ROLE_NAMES_VAR: &str = "ACTORGRAPH_ROLE_NAMES";

// Integer threshold overrides, applied in this order
const RATIO_OVERRIDES: [&str; 4] = [
    "ACTORGRAPH_MIN_NAME_RATIO",
    "ACTORGRAPH_MIN_EMAIL_DOMAIN_RATIO",
    "ACTORGRAPH_MIN_EMAIL_NAME_RATIO",
    "ACTORGRAPH_MIN_NAME_EMAIL_RATIO",
];

/// Retrieves an environment variable and splits it into a vector of strings based on a delimiter.
///
/// Empty items are dropped, so an unset variable yields an empty vector.
pub fn get_env_var_as_vec(var: &str, delimiter: char) -> Vec<String> {
    split_list(&env::var(var).unwrap_or_default(), delimiter)
}

fn split_list(value: &str, delimiter: char) -> Vec<String> {
    value
        .split(delimiter)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Everything needed to build the actor parser and similarity evaluator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub similarity: SimilaritySettings,
    pub segmenter: SegmenterSettings,
    /// Use the email-derived name when an actor has no display name
    pub name_from_email: bool,
    pub role_names_path: Option<PathBuf>,
    pub terms_path: Option<PathBuf>,
    /// Newline-separated word list such as `/usr/share/dict/words`; the
    /// bundled list is small and only covers common words
    pub dictionary_path: Option<PathBuf>,
    /// Extra names treated as the generic `role` type
    pub extra_role_names: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            similarity: SimilaritySettings::default(),
            segmenter: SegmenterSettings::default(),
            name_from_email: true,
            role_names_path: None,
            terms_path: None,
            dictionary_path: None,
            extra_role_names: Vec::new(),
        }
    }
}

impl ResolverConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Load the file named by `ACTORGRAPH_CONFIG`, if any, then apply the
    /// `ACTORGRAPH_*` overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = match env::var(CONFIG_VAR) {
            Ok(path) if !path.trim().is_empty() => {
                info!("Loading resolver config from {}", path);
                Self::from_file(path.trim())?
            }
            _ => Self::default(),
        };
        config.apply_overrides(|var| env::var(var).ok())?;
        Ok(config)
    }

    /// Apply overrides from any variable source
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        for var in RATIO_OVERRIDES {
            let Some(value) = lookup(var) else {
                continue;
            };
            let ratio: u8 = value
                .trim()
                .parse()
                .with_context(|| format!("{} must be an integer ratio, got '{}'", var, value))?;
            anyhow::ensure!(ratio <= 100, "{} must be between 0 and 100, got {}", var, ratio);

            let slot = match var {
                "ACTORGRAPH_MIN_NAME_RATIO" => &mut self.similarity.min_name_ratio,
                "ACTORGRAPH_MIN_EMAIL_DOMAIN_RATIO" => &mut self.similarity.min_email_domain_ratio,
                "ACTORGRAPH_MIN_EMAIL_NAME_RATIO" => &mut self.similarity.min_email_name_ratio,
                _ => &mut self.similarity.min_name_email_ratio,
            };
            *slot = ratio;
        }

        if let Some(names) = lookup(ROLE_NAMES_VAR) {
            self.extra_role_names.extend(split_list(&names, ','));
        }
        Ok(())
    }

    /// Build the lexeme and actor parsers, loading table files when set
    pub fn actor_parser(&self) -> Result<ActorParser> {
        let dictionary = match &self.dictionary_path {
            Some(path) => FstDictionary::from_file(path)?,
            None => FstDictionary::bundled()?,
        };
        let terms = match &self.terms_path {
            Some(path) => TermTable::from_file(path)?,
            None => TermTable::bundled(),
        };
        let mut role_names = match &self.role_names_path {
            Some(path) => RoleTable::from_file(path)?,
            None => RoleTable::bundled(),
        };
        role_names.add_role_names(self.extra_role_names.iter().map(|name| (name, "role")));

        let lexeme_parser = LexemeParser::new(dictionary)
            .with_terms(terms)
            .with_settings(self.segmenter);
        Ok(ActorParser::new(lexeme_parser).with_role_names(role_names))
    }

    pub fn evaluator(&self) -> SimilarityEvaluator {
        SimilarityEvaluator::new(self.similarity)
    }
}
