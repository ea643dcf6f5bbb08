//! Email address syntax checks (RFC 5321/5322 dot-atom forms, no DNS).

use lazy_static::lazy_static;
use regex::Regex;

const MAX_LOCAL_PART_LEN: usize = 64;
const MAX_ADDRESS_LEN: usize = 254;

lazy_static! {
    static ref DOT_ATOM_LOCAL: Regex =
        Regex::new(r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*$")
            .unwrap();
    static ref QUOTED_LOCAL: Regex = Regex::new(r#"^"([^"\\\r\n]|\\.)*"$"#).unwrap();
    static ref HOSTNAME: Regex = Regex::new(
        r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    )
    .unwrap();
    static ref ADDRESS_LITERAL: Regex =
        Regex::new(r"^\[(\d{1,3}(\.\d{1,3}){3}|IPv6:[0-9a-fA-F:.]+)\]$").unwrap();
}

/// Whether `email` is a syntactically valid address
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_ADDRESS_LEN {
        return false;
    }
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > MAX_LOCAL_PART_LEN || domain.is_empty() {
        return false;
    }

    let local_ok = DOT_ATOM_LOCAL.is_match(local) || QUOTED_LOCAL.is_match(local);
    let domain_ok = HOSTNAME.is_match(domain.trim_end_matches('.'))
        || ADDRESS_LITERAL.is_match(domain);
    local_ok && domain_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_addresses() {
        assert!(is_valid_email("john.smith@example.com"));
        assert!(is_valid_email("john.smith257@example.com"));
        assert!(is_valid_email("admin@example.com"));
        assert!(is_valid_email("localdomain@localhost"));
        assert!(is_valid_email("o'brien+git@mail.example.org"));
        assert!(is_valid_email("\"john smith\"@example.com"));
        assert!(is_valid_email("root@[127.0.0.1]"));
    }

    #[test]
    fn test_invalid_addresses() {
        assert!(!is_valid_email("john.smith"));
        assert!(!is_valid_email("localdomain"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("john@"));
        assert!(!is_valid_email("john..smith@example.com"));
        assert!(!is_valid_email("john smith@example.com"));
        assert!(!is_valid_email("john@-example.com"));
        assert!(!is_valid_email(&format!("{}@example.com", "a".repeat(65))));
    }
}
