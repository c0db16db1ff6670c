use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can pass a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_id = |var: &str| -> Result<u64, ConfigError> {
        let raw = require(var)?;
        raw.trim()
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let shop_domain = normalize_shop_domain(&require("SHOPIFY_STORE")?);
    let access_token = require("SHOPIFY_ACCESS_TOKEN")?;
    let collection_id = parse_id("SHOPIFY_COLLECTION_ID")?;
    let location_id = parse_id("SHOPIFY_LOCATION_ID")?;
    let api_version = or_default("SHOPIFY_API_VERSION", "2024-01");

    let env = parse_environment(&or_default("SHOPLOAD_ENV", "development"))?;
    let log_level = or_default("SHOPLOAD_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("SHOPLOAD_REQUEST_TIMEOUT_SECS", "30")?;
    let max_retries = parse_u32("SHOPLOAD_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("SHOPLOAD_RETRY_BACKOFF_BASE_MS", "500")?;
    let purge_concurrency = parse_usize("SHOPLOAD_PURGE_CONCURRENCY", "8")?;
    if purge_concurrency == 0 {
        return Err(invalid(
            "SHOPLOAD_PURGE_CONCURRENCY",
            "must be at least 1".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        log_level,
        shop_domain,
        access_token,
        api_version,
        collection_id,
        location_id,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        purge_concurrency,
    })
}

/// Accepts either a bare shop name (`acme`) or a host (`acme.myshopify.com`,
/// optionally with a scheme) and returns the host.
fn normalize_shop_domain(raw: &str) -> String {
    let host = raw
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');
    if host.contains('.') {
        host.to_string()
    } else {
        format!("{host}.myshopify.com")
    }
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHOPLOAD_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
