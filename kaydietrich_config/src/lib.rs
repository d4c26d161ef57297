use std::{net::IpAddr, path::Path};

use anyhow::Context;
use config::{File, FileFormat};
use kaydietrich_models::email_address::{EmailAddress, EmailAddressWithName};
use serde::Deserialize;

mod duration;

pub use duration::Duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    /// The single origin allowed to call the JSON API from a browser.
    pub allowed_origin: String,
    pub real_ip: Option<RealIpConfig>,
}

#[derive(Debug, Deserialize)]
pub struct RealIpConfig {
    pub header: String,
    pub set_from: IpAddr,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    pub from: EmailAddressWithName,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub recipient: EmailAddress,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_config() {
        let content = r#"
            [http]
            host = "127.0.0.1"
            port = 8000
            allowed_origin = "https://kaydietrich.de"

            [http.real_ip]
            header = "X-Real-Ip"
            set_from = "10.0.0.1"

            [email]
            smtp_url = "smtp://localhost:25"
            from = "Kay Dietrich Website <noreply@kaydietrich.de>"

            [contact]
            recipient = "kontakt@kaydietrich.de"

            [health]
            cache_ttl = "30s"
        "#;

        let config: Config = config::Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.http.port, 8000);
        assert_eq!(config.http.allowed_origin, "https://kaydietrich.de");
        assert_eq!(
            config.http.real_ip.as_ref().unwrap().header,
            "X-Real-Ip"
        );
        assert_eq!(config.contact.recipient.as_str(), "kontakt@kaydietrich.de");
        assert_eq!(
            config.email.from.0.name.as_deref(),
            Some("Kay Dietrich Website")
        );
        assert_eq!(*config.health.cache_ttl, std::time::Duration::from_secs(30));
    }
}
