use serde::{Deserialize, Serialize};
use std::fmt;

// Default minimum ratios on the 0-100 scale
const MIN_NAME_RATIO: u8 = 55;
const MIN_EMAIL_DOMAIN_RATIO: u8 = 55;
const MIN_EMAIL_NAME_RATIO: u8 = 55;
const MIN_NAME_EMAIL_RATIO: u8 = 55;

/// Thresholds deciding when two actors may be the same identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilaritySettings {
    pub min_name_ratio: u8,
    pub min_email_domain_ratio: u8,
    pub min_email_name_ratio: u8,
    pub min_name_email_ratio: u8,
    // Adds the name-to-email-name cross check to the predicate chain
    pub match_name_to_email: bool,
}

impl Default for SimilaritySettings {
    fn default() -> Self {
        Self {
            min_name_ratio: MIN_NAME_RATIO,
            min_email_domain_ratio: MIN_EMAIL_DOMAIN_RATIO,
            min_email_name_ratio: MIN_EMAIL_NAME_RATIO,
            min_name_email_ratio: MIN_NAME_EMAIL_RATIO,
            match_name_to_email: false,
        }
    }
}

/// Independent predicates that can mark a pair as possibly identical
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityCheck {
    Identical,
    SimilarEmails,
    SimilarProperNames,
    SimilarNameToEmail,
}

impl fmt::Display for SimilarityCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimilarityCheck::Identical => write!(f, "identical"),
            SimilarityCheck::SimilarEmails => write!(f, "similar_emails"),
            SimilarityCheck::SimilarProperNames => write!(f, "similar_proper_names"),
            SimilarityCheck::SimilarNameToEmail => write!(f, "similar_name_to_email"),
        }
    }
}

/// Every comparison signal between two actors plus the overall verdict
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityRecord {
    pub possible: bool,
    // First predicate that reported a match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_check: Option<SimilarityCheck>,

    pub identical: bool,
    pub same_name: bool,
    pub same_email: bool,
    pub same_email_name: bool,

    pub name_ratio: u8,
    pub email_name_ratio: u8,
    pub email_domain_ratio: u8,
    // First actor's name against the second actor's email name
    pub name_to_email_ratio_1: u8,
    // First actor's email name against the second actor's name
    pub name_to_email_ratio_2: u8,

    pub proper_name_1: bool,
    pub proper_name_2: bool,
    pub proper_email_name_1: bool,
    pub proper_email_name_2: bool,
}
