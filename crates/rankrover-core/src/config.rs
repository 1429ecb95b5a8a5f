use crate::app_config::{AppConfig, Environment};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed. Provider API keys are
/// optional — a missing key disables that provider rather than failing
/// startup.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration via the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the process environment so
/// tests drive it with a plain `HashMap` lookup — no `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("RANKROVER_ENV", "development"));
    let bind_addr = parse_addr("RANKROVER_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("RANKROVER_LOG_LEVEL", "info");

    let serpapi_key = lookup("SERPAPI_KEY").ok();
    let openai_api_key = lookup("OPENAI_API_KEY").ok();
    let deepseek_api_key = lookup("DEEPSEEK_API_KEY").ok();

    let request_timeout_secs = parse_u64("RANKROVER_REQUEST_TIMEOUT_SECS", "30")?;
    let tracker_search_count = parse_usize("RANKROVER_SEARCH_COUNT", "20")?;
    let tracker_max_retries = parse_u32("RANKROVER_MAX_RETRIES", "3")?;
    let tracker_retry_backoff_base_ms = parse_u64("RANKROVER_RETRY_BACKOFF_BASE_MS", "300")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        serpapi_key,
        openai_api_key,
        deepseek_api_key,
        request_timeout_secs,
        tracker_search_count,
        tracker_max_retries,
        tracker_retry_backoff_base_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
