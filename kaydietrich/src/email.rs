use anyhow::Context;
use kaydietrich_config::EmailConfig;
use kaydietrich_email_impl::EmailServiceImpl;

/// Connect to the SMTP server
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    EmailServiceImpl::new(&config.smtp_url, config.from.clone())
        .context("Failed to connect to SMTP server")
}
