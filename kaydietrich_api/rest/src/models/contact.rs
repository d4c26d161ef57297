use kaydietrich_core_contact_contracts::ContactRequest;
use serde::Deserialize;

/// Contact form payload as posted by the browser client.
///
/// Every field is optional at the wire level; the absence of a required
/// field is reported as a validation failure naming the field, not as a
/// malformed body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiContactSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Honeypot. The rendered form hides this input from humans.
    #[serde(default)]
    pub phone_confirm: Option<String>,
}

impl From<ApiContactSubmission> for ContactRequest {
    fn from(value: ApiContactSubmission) -> Self {
        Self {
            name: value.name,
            email: value.email,
            company: value.company,
            message: value.message,
            honeypot: value.phone_confirm,
        }
    }
}
