use anyhow::Result;
use tracing::debug;

use super::email::is_valid_email;
use super::roles::RoleTable;
use super::types::{Actor, NameType, ParsedEmail, ParsedName};
use super::TARGET_ACTOR;
use crate::lexeme::split::{collapse_whitespace, drop_digits, fold_diacritics, split_alnum};
use crate::lexeme::LexemeParser;

/// Turns raw (name, email) strings into comparable `Actor` records
pub struct ActorParser {
    lexeme_parser: LexemeParser,
    role_names: RoleTable,
}

impl ActorParser {
    pub fn new(lexeme_parser: LexemeParser) -> Self {
        Self {
            lexeme_parser,
            role_names: RoleTable::new(),
        }
    }

    /// Parser over the bundled dictionary, term table and role names
    pub fn bundled() -> Result<Self> {
        Ok(Self::new(LexemeParser::bundled()?).with_role_names(RoleTable::bundled()))
    }

    pub fn with_role_names(mut self, role_names: RoleTable) -> Self {
        self.role_names = role_names;
        self
    }

    pub fn add_role_names<I, N, R>(&mut self, name_roles: I)
    where
        I: IntoIterator<Item = (N, R)>,
        N: AsRef<str>,
        R: AsRef<str>,
    {
        self.role_names.add_role_names(name_roles);
    }

    pub fn lexeme_parser(&self) -> &LexemeParser {
        &self.lexeme_parser
    }

    /// Normalize a display name or email local part.
    ///
    /// Role names keep their lowercased form and take the role as their
    /// type; the lookup is on the lowercased name exactly as given. Everything else is segmented into words, stripped of digits and
    /// joined with single spaces.
    pub fn parse_name(&self, name: &str) -> ParsedName {
        let lower_name = name.to_lowercase();
        if let Some(role) = self.role_names.get(&lower_name) {
            debug!(target: TARGET_ACTOR, "'{}' is a role name ({})", name, role);
            return ParsedName {
                name: lower_name,
                name_type: role.clone(),
            };
        }

        let lexeme = self.lexeme_parser.parse_lexeme(&fold_diacritics(name));
        let joined = lexeme
            .segments()
            .map(|segment| segment.value())
            .collect::<Vec<_>>()
            .join(" ");
        let words = split_alnum(&drop_digits(&joined)).join(" ");

        ParsedName {
            name: collapse_whitespace(&words).to_lowercase(),
            name_type: NameType::Proper,
        }
    }

    pub fn parse_email(&self, email: &str) -> ParsedEmail {
        let lower_email = email.trim().to_lowercase();
        let valid = is_valid_email(&lower_email);
        let (local_part, domain) = match lower_email.split_once('@') {
            Some((local, domain)) => (local.to_string(), domain.to_string()),
            None => (lower_email.clone(), String::new()),
        };
        let parsed_local_name = self.parse_name(&local_part);

        ParsedEmail {
            email: lower_email,
            valid,
            local_part,
            domain,
            parsed_local_name,
        }
    }

    /// Build an `Actor`; an empty name is replaced by the name parsed from
    /// the email local part when `name_from_email` is set
    pub fn parse_actor(&self, name: &str, email: &str, name_from_email: bool) -> Actor {
        let parsed_email = self.parse_email(email);
        let name = if name.trim().is_empty() && name_from_email {
            parsed_email.parsed_local_name.name.clone()
        } else {
            name.to_string()
        };
        let parsed_name = self.parse_name(&name);
        Actor::new(&name, email, parsed_name, parsed_email)
    }
}
