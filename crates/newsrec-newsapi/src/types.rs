//! NewsAPI request parameters and response envelopes.
//!
//! Successful responses look like
//! `{"status": "ok", "totalResults": N, "articles": [...]}`; failures use
//! `{"status": "error", "code": "...", "message": "..."}`.

use chrono::NaiveDate;
use newsrec_core::RawArticle;
use serde::{Deserialize, Serialize};

/// Parsed `top-headlines` / `everything` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlesResponse {
    pub status: String,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub articles: Vec<RawArticle>,
}

/// Same envelope with articles left untyped so one bad entry cannot sink
/// the whole batch.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LenientEnvelope {
    status: String,
    #[serde(default)]
    total_results: u64,
    #[serde(default)]
    articles: Vec<serde_json::Value>,
}

impl ArticlesResponse {
    /// Builds a response from a JSON body, skipping article entries that do
    /// not have the NewsAPI article shape.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the top-level envelope is malformed.
    pub fn from_value(body: serde_json::Value) -> Result<Self, serde_json::Error> {
        let envelope: LenientEnvelope = serde_json::from_value(body)?;
        let received = envelope.articles.len();

        let articles: Vec<RawArticle> = envelope
            .articles
            .into_iter()
            .filter_map(|value| serde_json::from_value::<RawArticle>(value).ok())
            .collect();

        if articles.len() < received {
            tracing::debug!(
                received,
                kept = articles.len(),
                "skipped article entries that did not match the expected shape"
            );
        }

        Ok(Self {
            status: envelope.status,
            total_results: envelope.total_results,
            articles,
        })
    }
}

/// Error body returned by NewsAPI alongside `"status": "error"`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub status: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Parameters for `GET /top-headlines`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopHeadlinesQuery {
    /// Two-letter country code, e.g. `de` or `us`.
    pub country: String,
    /// Optional category such as `technology` or `business`.
    pub category: Option<String>,
    pub page_size: u32,
}

impl Default for TopHeadlinesQuery {
    fn default() -> Self {
        Self {
            country: "de".to_string(),
            category: None,
            page_size: 100,
        }
    }
}

impl TopHeadlinesQuery {
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("country", self.country.clone()),
            ("pageSize", self.page_size.to_string()),
        ];
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            params.push(("category", category.to_string()));
        }
        params
    }
}

/// Parameters for `GET /everything`, always sorted by `publishedAt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EverythingQuery {
    pub query: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub language: String,
    pub page_size: u32,
}

impl EverythingQuery {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            from: None,
            to: None,
            language: "de".to_string(),
            page_size: 100,
        }
    }

    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", self.query.clone()),
            ("language", self.language.clone()),
            ("pageSize", self.page_size.to_string()),
            ("sortBy", "publishedAt".to_string()),
        ];
        if let Some(from) = self.from {
            params.push(("from", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.to {
            params.push(("to", to.format("%Y-%m-%d").to_string()));
        }
        params
    }
}
