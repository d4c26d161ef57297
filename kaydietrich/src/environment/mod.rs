use std::sync::Arc;

use anyhow::Context;
use kaydietrich_api_rest::{RealIpConfig, RestServerConfig};
use kaydietrich_config::Config;
use kaydietrich_core_contact_impl::{ContactServiceConfig, ContactServiceImpl};
use kaydietrich_core_health_impl::{HealthServiceConfig, HealthServiceImpl};
use kaydietrich_email_impl::EmailServiceImpl;
use kaydietrich_shared_impl::time::TimeServiceImpl;

pub mod types;

use types::RestServer;

/// Wires the service graph from the loaded configuration. All dependencies
/// are constructed here and handed to the server explicitly.
pub fn rest_server(config: &Config, email: EmailServiceImpl) -> anyhow::Result<RestServer> {
    let time = TimeServiceImpl;

    let health = HealthServiceImpl {
        time,
        email: email.clone(),
        config: HealthServiceConfig {
            cache_ttl: *config.health.cache_ttl,
        },
        state: Default::default(),
    };

    let contact = ContactServiceImpl {
        email,
        time,
        config: ContactServiceConfig {
            recipient: Arc::new(config.contact.recipient.clone()),
        },
    };

    let rest_config = RestServerConfig {
        allowed_origin: config
            .http
            .allowed_origin
            .parse()
            .with_context(|| format!("Invalid allowed origin {:?}", config.http.allowed_origin))?,
        real_ip_config: config.http.real_ip.as_ref().map(|real_ip| {
            Arc::new(RealIpConfig {
                header: real_ip.header.clone(),
                set_from: real_ip.set_from,
            })
        }),
    };

    Ok(RestServer {
        health,
        contact,
        config: rest_config,
    })
}
