use std::{future::Future, net::IpAddr};

use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Runs a raw contact form submission through the gate sequence
    /// (required fields, honeypot, email format, lengths) and forwards it
    /// to the site owner by email.
    ///
    /// A submission that fills the honeypot field is absorbed: it is logged
    /// together with `client_ip` and reported as [`SubmissionOutcome::Absorbed`]
    /// without any email being sent. The caller must not expose the
    /// difference to the client.
    fn submit(
        &self,
        request: ContactRequest,
        client_ip: IpAddr,
    ) -> impl Future<Output = Result<SubmissionOutcome, ContactSubmitError>> + Send;
}

/// A contact form submission as it arrived on the wire, before any
/// validation or sanitization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
    /// Value of the hidden honeypot field. Humans never see the input, so
    /// any non-empty value marks the submission as automated.
    pub honeypot: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The submission was handed to the mail transport.
    Delivered,
    /// The honeypot was filled; the submission was dropped after logging.
    Absorbed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Company,
    Message,
}

impl ContactField {
    /// The wire name of the field, as used in request payloads and
    /// validation messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Company => "company",
            Self::Message => "message",
        }
    }
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("missing required field: {0}")]
    MissingField(ContactField),
    #[error("invalid email address")]
    InvalidEmail,
    #[error("field too short: {0}")]
    FieldTooShort(ContactField),
    #[error("field too long: {0}")]
    FieldTooLong(ContactField),
    #[error("failed to hand the message to the mail transport")]
    Send,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
