//! Derived columns for cleaned articles.

use chrono::{Datelike, Timelike};
use newsrec_core::{ArticleFeatures, CleanedArticle, DayOfWeek, FeaturizedArticle};

/// Attaches feature columns to every row. Row count and order are unchanged.
#[must_use]
pub fn extract_features(articles: Vec<CleanedArticle>) -> Vec<FeaturizedArticle> {
    articles
        .into_iter()
        .map(|article| {
            let features = compute_features(&article);
            FeaturizedArticle { article, features }
        })
        .collect()
}

/// Computes the feature columns for one article.
///
/// Calendar fields use the timestamp's own offset. A missing timestamp
/// leaves `day_of_week` and `hour` empty rather than inventing a date.
#[must_use]
pub fn compute_features(article: &CleanedArticle) -> ArticleFeatures {
    ArticleFeatures {
        content_length: article.content.chars().count(),
        word_count: article.content.split_whitespace().count(),
        has_image: article.url_to_image.is_some(),
        day_of_week: article
            .published_at
            .map(|ts| DayOfWeek::from(ts.weekday())),
        hour: article.published_at.map(|ts| ts.hour()),
    }
}
