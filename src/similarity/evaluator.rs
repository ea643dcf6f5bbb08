use tracing::debug;

use super::types::{SimilarityCheck, SimilarityRecord, SimilaritySettings};
use super::TARGET_SIMILARITY;
use crate::actor::{Actor, ParsedName};
use crate::fuzzy::{ratio, token_set_ratio};

/// Compare two parsed names on a 0-100 scale.
///
/// Two proper names are compared as word sets, so `smith john` matches
/// `john smith`. Role names and mixed pairs are usually single tokens, where
/// set comparison degenerates, so they use the plain edit ratio.
pub fn compare_names(a: &ParsedName, b: &ParsedName) -> u8 {
    if a.is_proper() && b.is_proper() {
        token_set_ratio(&a.name, &b.name)
    } else {
        ratio(&a.name, &b.name)
    }
}

/// Decides whether two actors may be the same real-world identity
#[derive(Debug, Clone)]
pub struct SimilarityEvaluator {
    settings: SimilaritySettings,
    checks: Vec<SimilarityCheck>,
}

impl Default for SimilarityEvaluator {
    fn default() -> Self {
        Self::new(SimilaritySettings::default())
    }
}

impl SimilarityEvaluator {
    pub fn new(settings: SimilaritySettings) -> Self {
        let mut checks = vec![
            SimilarityCheck::Identical,
            SimilarityCheck::SimilarEmails,
            SimilarityCheck::SimilarProperNames,
        ];
        if settings.match_name_to_email {
            checks.push(SimilarityCheck::SimilarNameToEmail);
        }
        Self { settings, checks }
    }

    pub fn settings(&self) -> &SimilaritySettings {
        &self.settings
    }

    /// Predicates in the order they are tried
    pub fn checks(&self) -> &[SimilarityCheck] {
        &self.checks
    }

    /// Compute every signal, then run the predicate chain until one matches
    pub fn evaluate(&self, actor: &Actor, other: &Actor) -> SimilarityRecord {
        let mut similarity = build_similarity(actor, other);
        similarity.matched_check = self
            .checks
            .iter()
            .copied()
            .find(|check| self.check(*check, &similarity));
        similarity.possible = similarity.matched_check.is_some();

        debug!(
            target: TARGET_SIMILARITY,
            "{} vs {}: possible={} via {:?} (name={}, email_name={}, domain={})",
            actor.actor_id(),
            other.actor_id(),
            similarity.possible,
            similarity.matched_check,
            similarity.name_ratio,
            similarity.email_name_ratio,
            similarity.email_domain_ratio
        );

        similarity
    }

    /// Evaluate a single predicate against precomputed signals
    pub fn check(&self, check: SimilarityCheck, s: &SimilarityRecord) -> bool {
        match check {
            SimilarityCheck::Identical => s.identical,
            SimilarityCheck::SimilarEmails => {
                s.same_email
                    || (s.email_domain_ratio >= self.settings.min_email_domain_ratio
                        && s.email_name_ratio >= self.settings.min_email_name_ratio)
            }
            SimilarityCheck::SimilarProperNames => {
                s.proper_name_1
                    && s.proper_name_2
                    && (s.same_name || s.name_ratio >= self.settings.min_name_ratio)
            }
            SimilarityCheck::SimilarNameToEmail => {
                s.name_to_email_ratio_1 >= self.settings.min_name_email_ratio
                    || s.name_to_email_ratio_2 >= self.settings.min_name_email_ratio
            }
        }
    }
}

/// All comparison signals between two actors, with `possible` left unset
pub fn build_similarity(actor: &Actor, other: &Actor) -> SimilarityRecord {
    let name = actor.parsed_name();
    let other_name = other.parsed_name();
    let email = actor.parsed_email();
    let other_email = other.parsed_email();

    SimilarityRecord {
        possible: false,
        matched_check: None,
        identical: actor.actor_id() == other.actor_id(),
        same_name: name.name == other_name.name,
        same_email: email.email == other_email.email,
        same_email_name: email.parsed_local_name.name == other_email.parsed_local_name.name,
        name_ratio: compare_names(name, other_name),
        email_name_ratio: compare_names(&email.parsed_local_name, &other_email.parsed_local_name),
        email_domain_ratio: ratio(&email.domain, &other_email.domain),
        name_to_email_ratio_1: compare_names(name, &other_email.parsed_local_name),
        name_to_email_ratio_2: compare_names(&email.parsed_local_name, other_name),
        proper_name_1: name.is_proper(),
        proper_name_2: other_name.is_proper(),
        proper_email_name_1: email.parsed_local_name.is_proper(),
        proper_email_name_2: other_email.parsed_local_name.is_proper(),
    }
}
