use std::path::PathBuf;

use newsrec_processing::ProcessingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecommenderError {
    #[error("cannot train on an empty article table")]
    EmptyCorpus,

    #[error("no term survived tokenization and document-frequency filtering")]
    EmptyVocabulary,

    #[error("invalid vectorizer configuration: {0}")]
    InvalidConfig(String),

    #[error("article {article_id} not found (model has {num_articles} articles)")]
    ArticleNotFound {
        article_id: usize,
        num_articles: usize,
    },

    #[error("unsupported model format version {found} (expected {expected})")]
    UnsupportedFormat { found: u32, expected: u32 },

    /// The artifact parsed but its parts do not fit together.
    #[error("corrupt model artifact {path}: {reason}")]
    CorruptModel { path: PathBuf, reason: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Processing(#[from] ProcessingError),
}
