//! Central module for application-wide configuration settings.
//!
//! Settings are read once at startup from the environment (optionally seeded
//! from a `.env` file) and handed to the parts of the service that need them.

use anyhow::{Context, Result, bail, ensure};
use std::env;

/// Lowest and highest bcrypt cost factors accepted by the hasher.
const MIN_HASH_COST: u32 = 4;
const MAX_HASH_COST: u32 = 31;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expires_in_seconds: u64,
    pub server_port: u16,
    pub password_enforce_min_length: bool,
    pub password_hash_cost: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// `from_env` is a thin wrapper over this; tests pass a map instead of
    /// touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = lookup("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = lookup("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET not set")?;
        ensure!(!jwt_secret.trim().is_empty(), "JWT_SECRET must not be empty");

        let jwt_expires_in_seconds = lookup("JWT_EXPIRES_IN_SECONDS")
            .unwrap_or_else(|| "86400".to_string())
            .parse::<u64>()
            .context("JWT_EXPIRES_IN_SECONDS must be a valid number")?;

        let server_port = lookup("SERVER_PORT")
            .unwrap_or_else(|| "1323".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        let password_enforce_min_length = match lookup("PASSWORD_ENFORCE_MIN_LENGTH") {
            Some(value) => parse_flag(&value)
                .context("PASSWORD_ENFORCE_MIN_LENGTH must be true or false")?,
            None => true,
        };

        let password_hash_cost = lookup("PASSWORD_HASH_COST")
            .unwrap_or_else(|| bcrypt::DEFAULT_COST.to_string())
            .parse::<u32>()
            .context("PASSWORD_HASH_COST must be a valid number")?;
        ensure!(
            (MIN_HASH_COST..=MAX_HASH_COST).contains(&password_hash_cost),
            "PASSWORD_HASH_COST must be between {} and {}",
            MIN_HASH_COST,
            MAX_HASH_COST
        );

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            jwt_expires_in_seconds,
            server_port,
            password_enforce_min_length,
            password_hash_cost,
        })
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("unrecognised flag value '{}'", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.max_connections, 5);
        assert_eq!(config.acquire_timeout_seconds, 3);
        assert_eq!(config.jwt_expires_in_seconds, 86400);
        assert_eq!(config.server_port, 1323);
        assert!(config.password_enforce_min_length);
        assert_eq!(config.password_hash_cost, bcrypt::DEFAULT_COST);
    }

    #[test]
    fn test_secret_is_required() {
        let missing = Config::from_lookup(lookup_from(&[("DATABASE_URL", "sqlite::memory:")]));
        assert!(missing.is_err());

        let blank = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "   "),
        ]));
        assert!(blank.is_err());
    }

    #[test]
    fn test_password_policy_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "s3cret"),
            ("PASSWORD_ENFORCE_MIN_LENGTH", "off"),
            ("PASSWORD_HASH_COST", "6"),
        ]))
        .unwrap();

        assert!(!config.password_enforce_min_length);
        assert_eq!(config.password_hash_cost, 6);
    }

    #[test]
    fn test_rejects_out_of_range_cost() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "s3cret"),
            ("PASSWORD_HASH_COST", "2"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_garbage_flag() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "s3cret"),
            ("PASSWORD_ENFORCE_MIN_LENGTH", "maybe"),
        ]));
        assert!(result.is_err());
    }
}
