use std::{net::IpAddr, sync::Arc};

use chrono::{DateTime, Utc};
use kaydietrich_core_contact_contracts::{
    ContactField, ContactRequest, ContactService, ContactSubmitError, SubmissionOutcome,
};
use kaydietrich_email_contracts::{Email, EmailService};
use kaydietrich_models::{
    contact::{
        ContactSubmission, SubmissionCompany, SubmissionMessage, SubmissionMessageError,
        SubmissionName, SubmissionNameError,
    },
    email_address::{sanitize_email, EmailAddress},
};
use kaydietrich_shared_contracts::time::TimeService;
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Email, Time> {
    pub email: Email,
    pub time: Time,
    pub config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    pub recipient: Arc<EmailAddress>,
}

impl<EmailS, Time> ContactService for ContactServiceImpl<EmailS, Time>
where
    EmailS: EmailService,
    Time: TimeService,
{
    async fn submit(
        &self,
        request: ContactRequest,
        client_ip: IpAddr,
    ) -> Result<SubmissionOutcome, ContactSubmitError> {
        let name = required(request.name, ContactField::Name)?;
        let email = required(request.email, ContactField::Email)?;
        let message = required(request.message, ContactField::Message)?;

        // Bots fill every input they can find, humans never see this one.
        // Absorbed submissions get the same response as delivered ones, so
        // the sender cannot probe for the trap.
        if request.honeypot.is_some_and(|value| !value.trim().is_empty()) {
            warn!(%client_ip, "spam detected, absorbing submission");
            return Ok(SubmissionOutcome::Absorbed);
        }

        let email = sanitize_email(&email)
            .parse::<EmailAddress>()
            .map_err(|_| ContactSubmitError::InvalidEmail)?;

        let name = SubmissionName::try_from(name).map_err(|err| match err {
            SubmissionNameError::LenCharMinViolated => {
                ContactSubmitError::FieldTooShort(ContactField::Name)
            }
            SubmissionNameError::LenCharMaxViolated => {
                ContactSubmitError::FieldTooLong(ContactField::Name)
            }
        })?;

        let company = request
            .company
            .map(|company| company.trim().to_owned())
            .filter(|company| !company.is_empty())
            .map(SubmissionCompany::try_from)
            .transpose()
            .map_err(|_| ContactSubmitError::FieldTooLong(ContactField::Company))?;

        let message = SubmissionMessage::try_from(message).map_err(|err| match err {
            SubmissionMessageError::LenCharMinViolated => {
                ContactSubmitError::FieldTooShort(ContactField::Message)
            }
            SubmissionMessageError::LenCharMaxViolated => {
                ContactSubmitError::FieldTooLong(ContactField::Message)
            }
        })?;

        let submission = ContactSubmission {
            name,
            email,
            company,
            message,
        };

        let email = Email {
            recipient: (*self.config.recipient).clone(),
            subject: format!("Kontaktanfrage von {}", *submission.name),
            body: compose_body(&submission, self.time.now(), client_ip),
            reply_to: Some(
                submission
                    .email
                    .clone()
                    .with_name(submission.name.to_string()),
            ),
        };

        if !self.email.send(email).await? {
            error!(email = %submission.email, "failed to send contact form email");
            return Err(ContactSubmitError::Send);
        }

        info!(email = %submission.email, "contact form submitted successfully");
        Ok(SubmissionOutcome::Delivered)
    }
}

fn required(value: Option<String>, field: ContactField) -> Result<String, ContactSubmitError> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .ok_or(ContactSubmitError::MissingField(field))
}

fn compose_body(
    submission: &ContactSubmission,
    sent_at: DateTime<Utc>,
    client_ip: IpAddr,
) -> String {
    let heavy_rule = "=".repeat(50);
    let light_rule = "-".repeat(50);

    let mut body = format!(
        "Neue Kontaktanfrage über kaydietrich.de\n{heavy_rule}\n\nName:         {}\nE-Mail:       {}\n",
        *submission.name, submission.email,
    );

    if let Some(company) = &submission.company {
        body.push_str(&format!("Unternehmen:  {}\n", **company));
    }

    body.push_str(&format!(
        "\n{light_rule}\n\nNachricht:\n\n{}\n\n{heavy_rule}\nGesendet am:  {}\nIP-Adresse:   {client_ip}\n",
        *submission.message,
        sent_at.format("%d.%m.%Y %H:%M:%S"),
    ));

    body
}
