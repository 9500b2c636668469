//! HTTP client for the NewsAPI REST API.
//!
//! Wraps `reqwest` with NewsAPI-specific error handling and API key
//! management. The key travels in the `X-Api-Key` header, never in the URL,
//! so request URLs are safe to log and to embed in errors.

use std::time::Duration;

use newsrec_core::{AppConfig, DEFAULT_USER_AGENT};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Url};

use crate::error::NewsApiError;
use crate::types::{ArticlesResponse, ErrorBody, EverythingQuery, TopHeadlinesQuery};

/// Client for the NewsAPI REST API.
///
/// Use [`NewsApiClient::new`] with the application config, or
/// [`NewsApiClient::with_base_url`] to point at a mock server in tests.
/// Failed requests are not retried; a failure fails the batch.
pub struct NewsApiClient {
    client: Client,
    base_url: Url,
}

impl NewsApiClient {
    /// Creates a client from the application config.
    ///
    /// # Errors
    ///
    /// Returns [`NewsApiError::Config`] if `NEWS_API_KEY` is not configured,
    /// or any error from [`NewsApiClient::with_options`].
    pub fn new(config: &AppConfig) -> Result<Self, NewsApiError> {
        let api_key = config.require_news_api_key()?;
        Self::with_options(
            api_key,
            config.request_timeout_secs,
            &config.news_api_base_url,
            &config.user_agent,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// See [`NewsApiClient::with_options`].
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, NewsApiError> {
        Self::with_options(api_key, timeout_secs, base_url, DEFAULT_USER_AGENT)
    }

    /// Creates a client with every knob explicit.
    ///
    /// # Errors
    ///
    /// - [`NewsApiError::InvalidApiKey`] if the key cannot be sent as a header.
    /// - [`NewsApiError::InvalidBaseUrl`] if `base_url` does not parse.
    /// - [`NewsApiError::Http`] if the `reqwest::Client` cannot be constructed.
    pub fn with_options(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
        user_agent: &str,
    ) -> Result<Self, NewsApiError> {
        let mut key_header =
            HeaderValue::from_str(api_key).map_err(|_| NewsApiError::InvalidApiKey)?;
        key_header.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("X-Api-Key", key_header);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        // Normalise: a trailing slash makes `Url::join` append endpoint names
        // instead of replacing the last path segment (`/v2`).
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| NewsApiError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Fetches top headlines for a country, optionally filtered by category.
    ///
    /// # Errors
    ///
    /// - [`NewsApiError::Api`] if NewsAPI returns an error envelope.
    /// - [`NewsApiError::Http`] on network failure.
    /// - [`NewsApiError::UnexpectedStatus`] on a non-2xx status without an
    ///   error envelope.
    /// - [`NewsApiError::Deserialize`] if the body has the wrong shape.
    pub async fn fetch_top_headlines(
        &self,
        query: &TopHeadlinesQuery,
    ) -> Result<ArticlesResponse, NewsApiError> {
        let url = self.build_url("top-headlines", &query.params())?;
        let response = self.fetch_articles(&url).await?;
        tracing::info!(
            count = response.articles.len(),
            country = %query.country,
            "fetched top headlines"
        );
        Ok(response)
    }

    /// Searches all indexed articles via the `everything` endpoint.
    ///
    /// # Errors
    ///
    /// Same as [`NewsApiClient::fetch_top_headlines`].
    pub async fn fetch_everything(
        &self,
        query: &EverythingQuery,
    ) -> Result<ArticlesResponse, NewsApiError> {
        let url = self.build_url("everything", &query.params())?;
        let response = self.fetch_articles(&url).await?;
        tracing::info!(
            count = response.articles.len(),
            query = %query.query,
            "fetched articles"
        );
        Ok(response)
    }

    /// Builds the endpoint URL with percent-encoded query parameters.
    fn build_url(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Url, NewsApiError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| NewsApiError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    async fn fetch_articles(&self, url: &Url) -> Result<ArticlesResponse, NewsApiError> {
        let body = self.request_json(url).await?;
        Self::check_api_error(&body)?;
        ArticlesResponse::from_value(body).map_err(|e| NewsApiError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Sends a GET request and parses the body as JSON.
    ///
    /// A non-2xx response is reported as [`NewsApiError::Api`] when the body
    /// is a NewsAPI error envelope, otherwise as
    /// [`NewsApiError::UnexpectedStatus`].
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, NewsApiError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
                Self::check_api_error(&value)?;
            }
            tracing::error!(status = status.as_u16(), url = %url, "NewsAPI request failed");
            return Err(NewsApiError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        serde_json::from_str(&body).map_err(|e| NewsApiError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Checks the top-level `"status"` field and returns an error if it
    /// indicates failure.
    fn check_api_error(body: &serde_json::Value) -> Result<(), NewsApiError> {
        let Ok(parsed) = serde_json::from_value::<ErrorBody>(body.clone()) else {
            return Ok(());
        };
        if parsed.status != "error" {
            return Ok(());
        }
        let code = parsed.code.unwrap_or_else(|| "unknown".to_string());
        let message = parsed
            .message
            .unwrap_or_else(|| "unknown error".to_string());
        tracing::error!(code = %code, message = %message, "NewsAPI returned an error");
        Err(NewsApiError::Api { code, message })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
