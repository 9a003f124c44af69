use std::env;

use auth::CredentialHasher;
use auth::DEFAULT_TTL_HOURS;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::account::models::AdminAllowlist;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub signing_secret: String,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    /// Employee emails granted the ADMIN role at login
    #[serde(default = "default_admin_emails")]
    pub emails: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    #[serde(default = "default_hash_cost")]
    pub hash_cost: u32,
}

fn default_max_connections() -> u32 {
    5
}

fn default_expiration_hours() -> i64 {
    DEFAULT_TTL_HOURS
}

fn default_admin_emails() -> Vec<String> {
    vec![AdminAllowlist::DEFAULT_ADMIN_EMAIL.to_string()]
}

fn default_hash_cost() -> u32 {
    CredentialHasher::DEFAULT_COST
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            emails: default_admin_emails(),
        }
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            hash_cost: default_hash_cost(),
        }
    }
}

impl JwtConfig {
    /// Secret shipped in `config/default.toml` for local runs only.
    pub const DEVELOPMENT_SECRET: &'static str = "dev-only-signing-secret-change-me-32b";

    pub fn uses_development_secret(&self) -> bool {
        self.signing_secret == Self::DEVELOPMENT_SECRET
    }

    /// Configured token lifetime; must be positive and representable.
    pub fn token_ttl(&self) -> Result<Duration, ConfigError> {
        Duration::try_hours(self.expiration_hours)
            .filter(|ttl| *ttl > Duration::zero())
            .ok_or_else(|| {
                ConfigError::Message(format!(
                    "jwt.expiration_hours out of range: {}",
                    self.expiration_hours
                ))
            })
    }
}

impl AdminConfig {
    pub fn allowlist(&self) -> AdminAllowlist {
        AdminAllowlist::new(&self.emails)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SIGNING_SECRET, DATABASE__URL, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: ADMIN__EMAILS=a@shop.test,b@shop.test overrides admin.emails
            .add_source(
                Environment::default()
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("admin.emails")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.check_signing_secret(&run_mode)?;

        Ok(config)
    }

    /// The development secret is only accepted in the development run mode.
    pub fn check_signing_secret(&self, run_mode: &str) -> Result<(), ConfigError> {
        if self.jwt.signing_secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.signing_secret must not be empty".to_string(),
            ));
        }
        if self.jwt.uses_development_secret() && run_mode != "development" {
            return Err(ConfigError::Message(format!(
                "jwt.signing_secret is the development placeholder in run mode {}; \
                 set JWT__SIGNING_SECRET",
                run_mode
            )));
        }
        Ok(())
    }
}
