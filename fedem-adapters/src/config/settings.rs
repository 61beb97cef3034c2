use std::sync::LazyLock;
use std::time::Duration;

use http::HeaderValue;
use secrecy::Secret;
use serde::Deserialize;

use crate::auth::JwtConfig;

use super::constants::{env, jwt, prod};

static SETTINGS: LazyLock<Settings> =
    LazyLock::new(|| Settings::build().expect("Failed to load configuration"));

/// Service configuration, loaded once from an optional JSON file with
/// environment variables overriding the secrets.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub auth: AuthSettings,
    pub postgres: PostgresSettings,
    pub email_client: EmailClientSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub address: String,
    pub allowed_origins: Option<AllowedOrigins>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: Secret<String>,
    pub admin_email: String,
    pub reset_link_base: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub operator: String,
    pub timeout_in_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

impl Settings {
    pub fn load() -> &'static Settings {
        &SETTINGS
    }

    fn build() -> Result<Self, config::ConfigError> {
        let allowed_origins = std::env::var(env::ALLOWED_ORIGINS_ENV_VAR)
            .ok()
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .collect::<Vec<_>>()
            });

        config::Config::builder()
            .set_default("app.address", prod::APP_ADDRESS)?
            .set_default("email_client.base_url", prod::email_client::BASE_URL)?
            .set_default("email_client.sender", prod::email_client::SENDER)?
            .set_default(
                "email_client.timeout_in_millis",
                prod::email_client::TIMEOUT.as_millis() as u64,
            )?
            .add_source(config::File::with_name("config/settings").required(false))
            .set_override_option("auth.jwt_secret", std::env::var(env::JWT_SECRET_ENV_VAR).ok())?
            .set_override_option(
                "auth.admin_email",
                std::env::var(env::ADMIN_EMAIL_ENV_VAR).ok(),
            )?
            .set_override_option(
                "auth.reset_link_base",
                std::env::var(env::RESET_LINK_BASE_ENV_VAR).ok(),
            )?
            .set_override_option(
                "postgres.url",
                std::env::var(env::DATABASE_URL_ENV_VAR).ok(),
            )?
            .set_override_option(
                "email_client.auth_token",
                std::env::var(env::POSTMARK_AUTH_TOKEN_ENV_VAR).ok(),
            )?
            .set_override_option(
                "email_client.operator",
                std::env::var(env::OPERATOR_EMAIL_ENV_VAR).ok(),
            )?
            .set_override_option("app.allowed_origins", allowed_origins)?
            .build()?
            .try_deserialize()
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.auth.jwt_secret.clone(),
            ttl_seconds: jwt::ACCESS_TOKEN_TTL_SECONDS,
            issuer: jwt::ISSUER.to_string(),
            audience: jwt::AUDIENCE.to_string(),
        }
    }
}

/// CORS origin allow-list.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|candidate| self.0.iter().any(|allowed| allowed == candidate))
            .unwrap_or(false)
    }
}
