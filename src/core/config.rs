use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    FSError(#[from] std::io::Error),
    #[error(transparent)]
    SerdeError(#[from] toml::de::Error),
}

#[derive(Deserialize, Clone, Default)]
pub struct DB {
    pub database: String,
    pub host: String,
    pub user: String,
    pub password: String,
}

impl DB {
    fn is_valid(&self) -> bool {
        !self.database.is_empty()
            && !self.host.is_empty()
            && !self.password.is_empty()
            && !self.user.is_empty()
    }

    pub fn connection_string(&self) -> String {
        let password: String =
            url::form_urlencoded::byte_serialize(self.password.as_bytes()).collect();

        format!(
            "postgres://{}:{}@{}/{}",
            self.user, password, self.host, self.database
        )
    }
}

/// The identity provider that signs admin ID tokens, e.g.
/// `https://securetoken.google.com/<project>` with the project id as audience.
#[derive(Deserialize, Clone, Default)]
pub struct IdentityConfig {
    pub issuer_url: String,
    pub audience: String,
}

impl IdentityConfig {
    fn is_valid(&self) -> bool {
        !self.issuer_url.is_empty() && !self.audience.is_empty()
    }
}

#[derive(Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub cors_hosts: Vec<String>,
    pub bind_address: Option<String>,
    pub identity: IdentityConfig,
    pub db: DB,
}

impl Config {
    pub fn parse(path: Option<String>) -> Result<Self, ConfigError> {
        let path = path.unwrap_or("config.toml".to_string());
        let path = Path::new(path.as_str());
        let config_text = fs::read_to_string(path)?;

        let config: Config = toml::from_str(config_text.as_str())?;

        Ok(config)
    }

    pub fn is_valid(&self) -> bool {
        self.db.is_valid() && self.identity.is_valid()
    }

    pub fn bind_address(&self) -> &str {
        self.bind_address.as_deref().unwrap_or(DEFAULT_BIND_ADDRESS)
    }
}
