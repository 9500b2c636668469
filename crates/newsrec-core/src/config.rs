use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub(crate) const DEFAULT_NEWS_API_BASE_URL: &str = "https://newsapi.org/v2";
/// User agent sent when `NEWSREC_USER_AGENT` is unset.
pub const DEFAULT_USER_AGENT: &str = "newsrec/0.1 (article-recommender)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
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
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("NEWSREC_ENV", "development"))?;

    // A blank key is treated the same as an absent one.
    let news_api_key = lookup("NEWS_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty());
    let news_api_base_url = or_default("NEWS_API_BASE_URL", DEFAULT_NEWS_API_BASE_URL);

    let log_level = or_default("NEWSREC_LOG_LEVEL", "info");
    let log_dir = PathBuf::from(or_default("NEWSREC_LOG_DIR", "logs"));
    let raw_dir = PathBuf::from(or_default("NEWSREC_RAW_DIR", "data/raw"));
    let processed_dir = PathBuf::from(or_default("NEWSREC_PROCESSED_DIR", "data/processed"));
    let model_dir = PathBuf::from(or_default("NEWSREC_MODEL_DIR", "models"));

    let request_timeout_secs = parse_u64("NEWSREC_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "NEWSREC_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("NEWSREC_USER_AGENT", DEFAULT_USER_AGENT);

    Ok(AppConfig {
        env,
        news_api_key,
        news_api_base_url,
        log_level,
        log_dir,
        raw_dir,
        processed_dir,
        model_dir,
        request_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "NEWSREC_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
