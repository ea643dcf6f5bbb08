use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of identity a name denotes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum NameType {
    /// A name parsed as an individual's name
    Proper,
    /// A name the role table explicitly marks as belonging to a person
    Personal,
    /// A non-person actor such as a bot or shared account, with its label
    Role(String),
}

impl NameType {
    /// Whether names of this type take part in person-name matching
    pub fn is_proper(&self) -> bool {
        matches!(self, NameType::Proper | NameType::Personal)
    }
}

impl fmt::Display for NameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameType::Proper => write!(f, "proper"),
            NameType::Personal => write!(f, "personal"),
            NameType::Role(label) => write!(f, "{}", label),
        }
    }
}

impl From<&str> for NameType {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "proper" => NameType::Proper,
            "personal" => NameType::Personal,
            label => NameType::Role(label.to_string()),
        }
    }
}

impl From<String> for NameType {
    fn from(s: String) -> Self {
        NameType::from(s.as_str())
    }
}

impl From<NameType> for String {
    fn from(name_type: NameType) -> Self {
        name_type.to_string()
    }
}

/// A name normalized for comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedName {
    // Lowercase, space-joined words
    pub name: String,
    pub name_type: NameType,
}

impl ParsedName {
    pub fn is_proper(&self) -> bool {
        self.name_type.is_proper()
    }
}

/// An email address split into comparable parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEmail {
    // Lowercased address as given
    pub email: String,
    pub valid: bool,
    pub local_part: String,
    // Empty when the address has no '@'
    pub domain: String,
    pub parsed_local_name: ParsedName,
}

/// One raw (name, email) identity, before clustering.
///
/// Deserialization goes through `ActorRecord`, so a stored `actor_id` is
/// ignored and re-derived from the name and email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ActorRecord")]
pub struct Actor {
    name: String,
    email: String,
    actor_id: String,
    parsed_name: ParsedName,
    parsed_email: ParsedEmail,
}

impl Actor {
    pub fn new(name: &str, email: &str, parsed_name: ParsedName, parsed_email: ParsedEmail) -> Self {
        Actor {
            name: name.to_string(),
            email: email.to_string(),
            actor_id: actor_id(name, email),
            parsed_name,
            parsed_email,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Canonical key, lowercase `"{name} <{email}>"`
    pub fn actor_id(&self) -> &str {
        &self.actor_id
    }

    pub fn parsed_name(&self) -> &ParsedName {
        &self.parsed_name
    }

    pub fn parsed_email(&self) -> &ParsedEmail {
        &self.parsed_email
    }
}

/// Serialized form of an `Actor` without its derived key
#[derive(Deserialize)]
struct ActorRecord {
    name: String,
    email: String,
    parsed_name: ParsedName,
    parsed_email: ParsedEmail,
}

impl From<ActorRecord> for Actor {
    fn from(record: ActorRecord) -> Self {
        Actor::new(
            &record.name,
            &record.email,
            record.parsed_name,
            record.parsed_email,
        )
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Actor('{}')", self.actor_id)
    }
}

/// Canonical identity key for a raw name and email
pub fn actor_id(name: &str, email: &str) -> String {
    format!("{} <{}>", name, email).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_type_round_trip() {
        assert_eq!(NameType::from("Proper"), NameType::Proper);
        assert_eq!(NameType::from("personal"), NameType::Personal);
        assert_eq!(
            NameType::from("automation"),
            NameType::Role("automation".to_string())
        );
        assert_eq!(NameType::Role("automation".to_string()).to_string(), "automation");
        assert!(NameType::Personal.is_proper());
        assert!(!NameType::Role("role".to_string()).is_proper());

        let json = serde_json::to_string(&NameType::Role("automation".to_string())).unwrap();
        assert_eq!(json, "\"automation\"");
        let back: NameType = serde_json::from_str("\"proper\"").unwrap();
        assert_eq!(back, NameType::Proper);
    }

    #[test]
    fn test_actor_id_is_lowercase() {
        assert_eq!(actor_id("John", "X@Y.com"), "john <x@y.com>");
        assert_eq!(actor_id("", ""), " <>");
    }

    #[test]
    fn test_deserialized_actor_rederives_id() {
        let parsed_name = ParsedName {
            name: "john".to_string(),
            name_type: NameType::Proper,
        };
        let actor = Actor::new(
            "John",
            "j@x.com",
            parsed_name.clone(),
            ParsedEmail {
                email: "j@x.com".to_string(),
                valid: true,
                local_part: "j".to_string(),
                domain: "x.com".to_string(),
                parsed_local_name: parsed_name,
            },
        );

        let mut json = serde_json::to_value(&actor).unwrap();
        assert_eq!(json["actor_id"], "john <j@x.com>");
        json["actor_id"] = serde_json::Value::from("someone else <z@z>");

        let restored: Actor = serde_json::from_value(json).unwrap();
        assert_eq!(restored.actor_id(), "john <j@x.com>");
        assert_eq!(restored, actor);
    }
}
