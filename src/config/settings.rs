//! Application settings.
//!
//! Secrets and admin bootstrap credentials come from the environment
//! (optionally a `.env` file). Non-secret metadata lives in a YAML file.

use std::env;
use std::str::FromStr;

use ::config::{ConfigError, File};
use jsonwebtoken::Algorithm;
use serde::Deserialize;

use super::constants::{
    DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES, DEFAULT_APP_DESCRIPTION, DEFAULT_APP_TITLE,
    DEFAULT_DATABASE_URL, DEFAULT_DOCS_URL, DEFAULT_REDOC_URL, DEFAULT_SETTINGS_PATH, DEFAULT_TOKEN_ALGORITHM,
    MAX_ACCESS_TOKEN_EXPIRE_MINUTES, MIN_SECRET_KEY_LENGTH,
};
use crate::errors::AppResult;

/// `app` section of the settings file
#[derive(Debug, Deserialize)]
#[serde(default)]
struct AppSection {
    title: String,
    description: String,
    docs_url: String,
    redoc_url: String,
    algorithm: String,
    access_token_expire_minutes: i64,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            title: DEFAULT_APP_TITLE.to_string(),
            description: DEFAULT_APP_DESCRIPTION.to_string(),
            docs_url: DEFAULT_DOCS_URL.to_string(),
            redoc_url: DEFAULT_REDOC_URL.to_string(),
            algorithm: DEFAULT_TOKEN_ALGORITHM.to_string(),
            access_token_expire_minutes: DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES,
        }
    }
}

/// `database` section of the settings file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DatabaseSection {
    uri: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    app: AppSection,
    database: DatabaseSection,
}

/// Credentials of the administrator created on bootstrap.
#[derive(Clone)]
pub struct AdminCredentials {
    pub fullname: String,
    pub email: String,
    password: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("fullname", &self.fullname)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl AdminCredentials {
    pub fn new(
        fullname: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            fullname: fullname.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Read `ADMIN_FULLNAME`, `ADMIN_EMAIL` and `ADMIN_PASSWORD`.
    /// All three must be set.
    fn from_env() -> Option<Self> {
        let fullname = env::var("ADMIN_FULLNAME").ok()?;
        let email = env::var("ADMIN_EMAIL").ok()?;
        let password = env::var("ADMIN_PASSWORD").ok()?;
        Some(Self::new(fullname, email, password))
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub title: String,
    pub description: String,
    pub version: String,
    pub docs_url: String,
    pub redoc_url: String,
    pub algorithm: Algorithm,
    pub access_token_expire_minutes: i64,
    pub database_url: String,
    secret_key: String,
    pub admin: Option<AdminCredentials>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("title", &self.title)
            .field("version", &self.version)
            .field("docs_url", &self.docs_url)
            .field("redoc_url", &self.redoc_url)
            .field("algorithm", &self.algorithm)
            .field("access_token_expire_minutes", &self.access_token_expire_minutes)
            .field("database_url", &"[REDACTED]")
            .field("secret_key", &"[REDACTED]")
            .field("admin", &self.admin)
            .finish()
    }
}

impl Config {
    /// Load configuration from the environment and the YAML settings file.
    ///
    /// A missing settings file falls back to defaults. `DATABASE_URL`
    /// overrides `database.uri`.
    ///
    /// # Errors
    /// Fails if the settings file is malformed, the algorithm is not an HMAC
    /// algorithm, or `SECRET_KEY` is missing (release builds) or too short.
    pub fn load(settings_path: Option<&str>) -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let path = settings_path.unwrap_or(DEFAULT_SETTINGS_PATH);
        let file: FileSettings = ::config::Config::builder()
            .add_source(File::with_name(path).required(false))
            .build()?
            .try_deserialize()?;

        let secret_key = match env::var("SECRET_KEY") {
            Ok(key) => key,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("SECRET_KEY not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            }
            Err(_) => {
                return Err(ConfigError::Message(
                    "SECRET_KEY environment variable must be set in production".to_string(),
                )
                .into())
            }
        };

        let database_url = env::var("DATABASE_URL")
            .ok()
            .or(file.database.uri)
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let admin = AdminCredentials::from_env();
        if admin.is_none() {
            tracing::debug!("Admin bootstrap credentials not set");
        }

        let config = Self {
            title: file.app.title,
            description: file.app.description,
            version: env!("CARGO_PKG_VERSION").to_string(),
            docs_url: file.app.docs_url,
            redoc_url: file.app.redoc_url,
            algorithm: parse_algorithm(&file.app.algorithm)?,
            access_token_expire_minutes: file.app.access_token_expire_minutes,
            database_url,
            secret_key,
            admin,
        };
        config.check()?;
        Ok(config)
    }

    /// Build a configuration with defaults around an explicit secret and
    /// database URL, without touching the environment.
    pub fn with_secret(secret_key: impl Into<String>, database_url: impl Into<String>) -> Self {
        Self {
            title: DEFAULT_APP_TITLE.to_string(),
            description: DEFAULT_APP_DESCRIPTION.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            docs_url: DEFAULT_DOCS_URL.to_string(),
            redoc_url: DEFAULT_REDOC_URL.to_string(),
            algorithm: Algorithm::HS256,
            access_token_expire_minutes: DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES,
            database_url: database_url.into(),
            secret_key: secret_key.into(),
            admin: None,
        }
    }

    /// Get secret key bytes for token signing/verification.
    pub fn secret_key_bytes(&self) -> &[u8] {
        self.secret_key.as_bytes()
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.secret_key.len() < MIN_SECRET_KEY_LENGTH {
            return Err(ConfigError::Message(format!(
                "SECRET_KEY must be at least {} characters long",
                MIN_SECRET_KEY_LENGTH
            )));
        }
        let lifetime = self.access_token_expire_minutes;
        if !(1..=MAX_ACCESS_TOKEN_EXPIRE_MINUTES).contains(&lifetime) {
            return Err(ConfigError::Message(format!(
                "app.access_token_expire_minutes must be between 1 and {}",
                MAX_ACCESS_TOKEN_EXPIRE_MINUTES
            )));
        }
        Ok(())
    }
}

/// Parse a JWT algorithm name. Tokens are signed with a shared secret,
/// so only the HMAC family is accepted.
fn parse_algorithm(name: &str) -> Result<Algorithm, ConfigError> {
    match Algorithm::from_str(name) {
        Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Ok(alg),
        _ => Err(ConfigError::Message(format!(
            "Unsupported token algorithm: {}",
            name
        ))),
    }
}
