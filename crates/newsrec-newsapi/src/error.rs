use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the NewsAPI client and snapshot helpers.
#[derive(Debug, Error)]
pub enum NewsApiError {
    /// Required configuration was missing before any request was made.
    #[error(transparent)]
    Config(#[from] newsrec_core::ConfigError),

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// NewsAPI answered with `"status": "error"`.
    #[error("NewsAPI error ({code}): {message}")]
    Api { code: String, message: String },

    /// Non-2xx response without a readable NewsAPI error body.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// The API key contains bytes that cannot be sent in an HTTP header.
    #[error("NEWS_API_KEY is not a valid header value")]
    InvalidApiKey,

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode snapshot {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
