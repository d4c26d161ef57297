use nutype::nutype;

use crate::email_address::EmailAddress;

/// A validated contact form submission.
///
/// All text fields have been stripped of markup and HTML-escaped; the email
/// address has been parsed. Submissions are never persisted, they only live
/// for the duration of a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: SubmissionName,
    pub email: EmailAddress,
    pub company: Option<SubmissionCompany>,
    pub message: SubmissionMessage,
}

#[nutype(
    sanitize(trim, with = sanitize_text),
    validate(len_char_min = 2, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct SubmissionName(String);

#[nutype(
    sanitize(trim, with = sanitize_text),
    validate(len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct SubmissionCompany(String);

#[nutype(
    sanitize(trim, with = sanitize_text),
    validate(len_char_min = 10, len_char_max = 4096),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct SubmissionMessage(String);

/// Strips markup tags, then escapes the remaining text for HTML contexts.
///
/// The resulting value is safe to embed in any output channel the
/// submission flows into (email body, log lines). Length validation runs
/// on the sanitized value, so escaping counts towards the limits.
fn sanitize_text(value: String) -> String {
    escape_html(&strip_tags(&value))
}

fn strip_tags(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_tag = false;
    for c in value.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markup() {
        let name = SubmissionName::try_from("<b>Max</b> Mustermann").unwrap();
        assert_eq!(*name, "Max Mustermann");
    }

    #[test]
    fn drops_unterminated_tag() {
        let name = SubmissionName::try_from("Max <script").unwrap();
        assert_eq!(*name, "Max");
    }

    #[test]
    fn escapes_special_characters() {
        let message = SubmissionMessage::try_from("Angebot \"Beratung\" & mehr, O'Brien").unwrap();
        assert_eq!(
            *message,
            "Angebot &quot;Beratung&quot; &amp; mehr, O&#039;Brien"
        );
    }

    #[test]
    fn trims_before_sanitizing() {
        let name = SubmissionName::try_from("  Max Mustermann  ").unwrap();
        assert_eq!(*name, "Max Mustermann");
    }

    #[test]
    fn preserves_unicode() {
        let message = SubmissionMessage::try_from("Grüße aus München, 日本語").unwrap();
        assert_eq!(*message, "Grüße aus München, 日本語");
    }

    #[test]
    fn name_too_short_after_sanitization() {
        assert_eq!(
            SubmissionName::try_from("<b>A</b>"),
            Err(SubmissionNameError::LenCharMinViolated)
        );
    }

    #[test]
    fn message_too_short() {
        assert_eq!(
            SubmissionMessage::try_from("Hallo"),
            Err(SubmissionMessageError::LenCharMinViolated)
        );
    }

    #[test]
    fn name_too_long() {
        assert_eq!(
            SubmissionName::try_from("x".repeat(257)),
            Err(SubmissionNameError::LenCharMaxViolated)
        );
    }

    #[test]
    fn company_has_no_minimum_length() {
        let company = SubmissionCompany::try_from("X").unwrap();
        assert_eq!(*company, "X");
    }

    #[test]
    fn serializes_transparently() {
        let name = SubmissionName::try_from("Max Mustermann").unwrap();
        assert_eq!(
            serde_json::to_value(name).unwrap(),
            serde_json::json!("Max Mustermann")
        );
    }
}
