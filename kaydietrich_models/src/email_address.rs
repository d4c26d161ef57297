use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress(pub lettre::Address);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddressWithName(pub lettre::message::Mailbox);

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }

    pub fn with_name(self, name: String) -> EmailAddressWithName {
        EmailAddressWithName(lettre::message::Mailbox {
            name: Some(name),
            email: self.0,
        })
    }
}

impl EmailAddressWithName {
    pub fn into_email_address(self) -> EmailAddress {
        EmailAddress(self.0.email)
    }
}

impl FromStr for EmailAddress {
    type Err = <lettre::Address as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl FromStr for EmailAddressWithName {
    type Err = <lettre::message::Mailbox as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = <Self as FromStr>::Err;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Removes characters that cannot occur in an email address.
///
/// Mirrors the character set permitted in the local and domain parts, so a
/// value that survives sanitization unchanged is a candidate for parsing,
/// while smuggled whitespace, brackets or control characters are dropped
/// before the authoritative format check.
pub fn sanitize_email(value: &str) -> String {
    value
        .chars()
        .filter(|c| {
            c.is_ascii_alphanumeric()
                || matches!(
                    c,
                    '!' | '#'
                        | '$'
                        | '%'
                        | '&'
                        | '\''
                        | '*'
                        | '+'
                        | '-'
                        | '='
                        | '?'
                        | '^'
                        | '_'
                        | '`'
                        | '{'
                        | '|'
                        | '}'
                        | '~'
                        | '@'
                        | '.'
                        | '['
                        | ']'
                )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_valid_addresses() {
        assert_eq!(
            sanitize_email("max.mustermann@example.de"),
            "max.mustermann@example.de"
        );
    }

    #[test]
    fn sanitize_removes_whitespace_and_angle_brackets() {
        assert_eq!(
            sanitize_email("<max mustermann@example.de>\n"),
            "maxmustermann@example.de"
        );
    }

    #[test]
    fn parse_rejects_sanitized_garbage() {
        assert!(sanitize_email("not-an-email").parse::<EmailAddress>().is_err());
    }

    #[test]
    fn with_name_builds_a_mailbox() {
        let address: EmailAddress = "max@example.com".parse().unwrap();
        let mailbox = address.with_name("Max Mustermann".into());
        assert_eq!(mailbox.0.name.as_deref(), Some("Max Mustermann"));
        assert_eq!(AsRef::<str>::as_ref(&mailbox.0.email), "max@example.com");
    }
}
