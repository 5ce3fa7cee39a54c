//! Server configuration from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` loads `.env` (if present) and then builds a [`ServerConfig`] once at
//! startup. Handlers read the config through `AppState`; nothing else touches
//! the process environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SESSION_TTL_HOURS: i32 = 24 * 7;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Optional Resend credentials for delivering access codes by email.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResendConfig {
    pub api_key: String,
    pub from: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    /// Mark session cookies `Secure`.
    pub cookie_secure: bool,
    pub session_ttl_hours: i32,
    /// Return issued access codes in the API response (local development).
    pub email_code_echo: bool,
    pub resend: Option<ResendConfig>,
}

impl ServerConfig {
    /// Build the config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value does
    /// not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value does
    /// not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let resend = match (lookup("RESEND_API_KEY"), lookup("RESEND_FROM")) {
            (Some(api_key), Some(from)) if !api_key.trim().is_empty() && !from.trim().is_empty() => {
                Some(ResendConfig { api_key, from })
            }
            _ => None,
        };

        Ok(Self {
            database_url,
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            db_max_connections: positive_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
            cookie_secure: bool_or(&lookup, "COOKIE_SECURE", false)?,
            session_ttl_hours: positive_or(&lookup, "SESSION_TTL_HOURS", DEFAULT_SESSION_TTL_HOURS)?,
            email_code_echo: bool_or(&lookup, "EMAIL_CODE_ECHO", false)?,
            resend,
        })
    }
}

/// Parse a boolean flag. Accepts `1/true/yes/on` and `0/false/no/off`,
/// case-insensitively and ignoring surrounding whitespace.
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn bool_or<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) if value.trim().is_empty() => Ok(default),
        Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid { key, value }),
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) if value.trim().is_empty() => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

/// Like [`parse_or`], but the value must be greater than zero.
fn positive_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialOrd + Default,
{
    let value = parse_or(lookup, key, default)?;
    if value > T::default() {
        Ok(value)
    } else {
        Err(ConfigError::Invalid { key, value: lookup(key).unwrap_or_default() })
    }
}
