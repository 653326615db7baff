//! Process Configuration
//!
//! Reads the environment (after `.env` has been loaded) into the values the
//! server needs at startup.

use anyhow::{Context, bail};
use auth::AuthConfig;
use base64::Engine;
use base64::engine::general_purpose;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration
#[derive(Debug)]
pub struct ApiConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub port: u16,
    pub auth: AuthConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let defaults = AuthConfig::default();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret_b64) => general_purpose::STANDARD
                .decode(secret_b64.trim())
                .context("JWT_SECRET must be standard base64")?,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using a random secret for this process");
                AuthConfig::with_random_secret().jwt_secret
            }
            Err(_) => bail!("JWT_SECRET must be set in production"),
        };

        let password_pepper = env::var("PASSWORD_PEPPER")
            .ok()
            .filter(|p| !p.is_empty())
            .map(String::into_bytes);

        let auth = AuthConfig {
            jwt_secret,
            access_token_ttl: Duration::from_secs(parse_or(
                "ACCESS_TOKEN_TTL_SECS",
                defaults.access_token_ttl.as_secs(),
            )?),
            refresh_token_ttl: Duration::from_secs(parse_or(
                "REFRESH_TOKEN_TTL_SECS",
                defaults.refresh_token_ttl.as_secs(),
            )?),
            password_pepper,
            ..defaults
        };

        Ok(Self {
            database_url,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 5)?,
            port: parse_or("APP_PORT", 8080)?,
            auth,
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset
fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_default_when_unset() {
        let value: u64 = parse_or("API_TEST_SURELY_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }
}
