use std::collections::HashMap;
use std::env::VarError;
use std::path::Path;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("NEWS_API_KEY", "test_api_key_123");
    m.insert("NEWS_API_BASE_URL", "https://newsapi.org/v2");
    m
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "NEWSREC_ENV"));
}

#[test]
fn build_app_config_reads_api_key_and_base_url() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.news_api_key.as_deref(), Some("test_api_key_123"));
    assert_eq!(cfg.news_api_base_url, "https://newsapi.org/v2");
    assert_eq!(cfg.require_news_api_key().unwrap(), "test_api_key_123");
}

#[test]
fn build_app_config_defaults() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert!(cfg.news_api_key.is_none());
    assert_eq!(cfg.news_api_base_url, DEFAULT_NEWS_API_BASE_URL);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.log_dir, Path::new("logs"));
    assert_eq!(cfg.raw_dir, Path::new("data/raw"));
    assert_eq!(cfg.processed_dir, Path::new("data/processed"));
    assert_eq!(cfg.model_dir, Path::new("models"));
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
}

#[test]
fn missing_api_key_fails_when_required() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let err = cfg.require_news_api_key().unwrap_err();
    assert!(
        matches!(err, ConfigError::MissingEnvVar(ref v) if v == "NEWS_API_KEY"),
        "expected MissingEnvVar(NEWS_API_KEY), got: {err:?}"
    );
}

#[test]
fn blank_api_key_is_treated_as_missing() {
    let mut map = full_env();
    map.insert("NEWS_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.news_api_key.is_none());
    assert!(cfg.require_news_api_key().is_err());
}

#[test]
fn request_timeout_override() {
    let mut map = full_env();
    map.insert("NEWSREC_REQUEST_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 60);
}

#[test]
fn request_timeout_invalid() {
    let mut map = full_env();
    map.insert("NEWSREC_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEWSREC_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(NEWSREC_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn request_timeout_zero_is_rejected() {
    let mut map = full_env();
    map.insert("NEWSREC_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
}

#[test]
fn directory_overrides() {
    let mut map = full_env();
    map.insert("NEWSREC_RAW_DIR", "/tmp/raw");
    map.insert("NEWSREC_PROCESSED_DIR", "/tmp/processed");
    map.insert("NEWSREC_MODEL_DIR", "/tmp/models");
    map.insert("NEWSREC_LOG_DIR", "/tmp/logs");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.raw_dir, Path::new("/tmp/raw"));
    assert_eq!(cfg.processed_dir, Path::new("/tmp/processed"));
    assert_eq!(cfg.model_dir, Path::new("/tmp/models"));
    assert_eq!(cfg.log_dir, Path::new("/tmp/logs"));
}

#[test]
fn debug_output_redacts_api_key() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("test_api_key_123"));
    assert!(rendered.contains("[redacted]"));
}
