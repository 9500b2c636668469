//! Cleaning and feature extraction for fetched articles, plus the CSV
//! hand-off table consumed by training.

pub mod cleaner;
pub mod error;
pub mod features;
pub mod table;

pub use cleaner::{clean_article, clean_articles, parse_published_at};
pub use error::ProcessingError;
pub use features::{compute_features, extract_features};
pub use table::{list_processed_files, processed_file_name, read_processed, write_processed};

use newsrec_core::{FeaturizedArticle, RawArticle};

/// Runs cleaning followed by feature extraction over one batch.
#[must_use]
pub fn featurize(articles: &[RawArticle]) -> Vec<FeaturizedArticle> {
    let cleaned = clean_articles(articles);
    let featurized = extract_features(cleaned);
    tracing::info!(
        received = articles.len(),
        kept = featurized.len(),
        "processed article batch"
    );
    featurized
}
