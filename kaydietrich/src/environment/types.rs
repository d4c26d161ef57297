use kaydietrich_core_contact_impl::ContactServiceImpl;
use kaydietrich_core_health_impl::HealthServiceImpl;
use kaydietrich_email_impl::EmailServiceImpl;
use kaydietrich_shared_impl::time::TimeServiceImpl;

// Email
pub type Email = EmailServiceImpl;

// Shared
pub type Time = TimeServiceImpl;

// Core
pub type Health = HealthServiceImpl<Time, Email>;
pub type Contact = ContactServiceImpl<Email, Time>;

// API
pub type RestServer = kaydietrich_api_rest::RestServer<Health, Contact>;
