use std::time::Duration;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables already in the process.
///
/// `.env` files are not read here; the binary loads them before argument
/// parsing so that clap's `env` fallbacks see them too.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a config that
/// talks to a local API on port 8080.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_base_url = parse_base_url(&or_default(
        "STOREFRONT_API_BASE_URL",
        "http://localhost:8080",
    ))?;
    let env = parse_environment(&or_default("STOREFRONT_ENV", "development"))?;
    let log_level = or_default("STOREFRONT_LOG_LEVEL", "info");
    let user_agent = or_default("STOREFRONT_USER_AGENT", "storefront/0.1 (cli)");

    let request_timeout = match parse_u64("STOREFRONT_REQUEST_TIMEOUT_SECS", "30")? {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };

    let poll_interval_secs = parse_u64("STOREFRONT_POLL_INTERVAL_SECS", "5")?;
    if poll_interval_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOREFRONT_POLL_INTERVAL_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let confirmation_secs = parse_u64("STOREFRONT_CONFIRMATION_SECS", "3")?;

    Ok(AppConfig {
        api_base_url,
        env,
        log_level,
        request_timeout,
        user_agent,
        poll_interval: Duration::from_secs(poll_interval_secs),
        confirmation_ttl: Duration::from_secs(confirmation_secs),
    })
}

/// Validate the API origin and strip any trailing slashes.
fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOREFRONT_API_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{raw}'"),
        });
    }
    Ok(trimmed.to_string())
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STOREFRONT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
