use std::path::PathBuf;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub news_api_key: Option<String>,
    pub news_api_base_url: String,
    pub log_level: String,
    pub log_dir: PathBuf,
    pub raw_dir: PathBuf,
    pub processed_dir: PathBuf,
    pub model_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl AppConfig {
    /// Returns the NewsAPI credential.
    ///
    /// Only the fetch path needs the key, so it is optional at load time and
    /// enforced here before any request is built.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if `NEWS_API_KEY` is unset or blank.
    pub fn require_news_api_key(&self) -> Result<&str, ConfigError> {
        self.news_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("NEWS_API_KEY".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field(
                "news_api_key",
                &self.news_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("news_api_base_url", &self.news_api_base_url)
            .field("log_level", &self.log_level)
            .field("log_dir", &self.log_dir)
            .field("raw_dir", &self.raw_dir)
            .field("processed_dir", &self.processed_dir)
            .field("model_dir", &self.model_dir)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
