use config::{Config, Environment, File};
use serde::Deserialize;

use crate::{error::StartupError, models::settings::SystemSettings};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_DATABASE_NAME: &str = "epi";
const DEFAULT_SESSION_TTL_SECS: i64 = 86400;
const MIN_SESSION_SECRET_LEN: usize = 32;

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub log: LogConfig,
    /// Initial values for the settings page; editable at runtime.
    #[serde(default)]
    pub system: SystemSettings,
}
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origin: String,
}
#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseConfig {
    /// Without a URI the service runs on the built-in sample records.
    pub uri: Option<String>,
    pub name: String,
}
#[derive(Clone, Debug, Deserialize)]
pub struct AuthConfig {
    pub session_secret: Option<String>,
    pub session_ttl_secs: i64,
    pub identity: IdentityConfig,
}
#[derive(Clone, Debug, Deserialize)]
pub struct IdentityConfig {
    pub audience: String,
    #[serde(default = "default_issuers")]
    pub issuers: Vec<String>,
    pub public_key_path: Option<String>,
    pub shared_secret: Option<String>,
}
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}
#[derive(Clone, Debug, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
}

fn default_issuers() -> Vec<String> {
    vec![
        "accounts.google.com".to_string(),
        "https://accounts.google.com".to_string(),
    ]
}

impl AppConfig {
    /// Reads defaults, then `config/default.*`, then `EPI_`-prefixed
    /// environment variables (`EPI_AUTH__SESSION_SECRET`, ...).
    pub fn load() -> Result<Self, StartupError> {
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("server.allowed_origin", DEFAULT_ALLOWED_ORIGIN)?
            .set_default("database.name", DEFAULT_DATABASE_NAME)?
            .set_default("auth.session_ttl_secs", DEFAULT_SESSION_TTL_SECS)?
            .set_default("log.level", "info")?
            .set_default("log.format", "pretty")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                Environment::with_prefix("EPI")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app: AppConfig = config.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    pub fn validate(&self) -> Result<(), StartupError> {
        match &self.auth.session_secret {
            Some(secret) if secret.len() >= MIN_SESSION_SECRET_LEN => (),
            _ => {
                return Err(StartupError::Invalid(format!(
                    "auth.session_secret must be at least {MIN_SESSION_SECRET_LEN} characters"
                )))
            }
        }
        if self.auth.session_ttl_secs <= 0 {
            return Err(StartupError::Invalid(
                "auth.session_ttl_secs must be positive".to_string(),
            ));
        }
        let identity = &self.auth.identity;
        if identity.public_key_path.is_some() == identity.shared_secret.is_some() {
            return Err(StartupError::Invalid(
                "exactly one of auth.identity.public_key_path or auth.identity.shared_secret is required"
                    .to_string(),
            ));
        }
        if identity.issuers.is_empty() {
            return Err(StartupError::Invalid(
                "auth.identity.issuers must not be empty".to_string(),
            ));
        }
        self.system
            .validate()
            .map_err(|code| StartupError::Invalid(format!("system settings: {code}")))
    }
}
