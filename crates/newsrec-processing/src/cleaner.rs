//! Normalization of [`RawArticle`]s into [`CleanedArticle`] rows.
//!
//! Rows without a usable title or content are dropped, and repeated titles
//! keep only their first occurrence in input order. Neither case is an
//! error: malformed input simply does not make it into the table.

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use newsrec_core::{CleanedArticle, RawArticle};

/// Offset-less timestamp layouts, interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Layouts with a numeric offset that RFC 3339 parsing rejects.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Cleans a batch of raw articles.
///
/// Output order follows input order. The returned table never contains two
/// rows with the same title.
#[must_use]
pub fn clean_articles(articles: &[RawArticle]) -> Vec<CleanedArticle> {
    let mut seen_titles: HashSet<String> = HashSet::with_capacity(articles.len());
    let mut cleaned = Vec::with_capacity(articles.len());
    let mut missing_fields = 0usize;
    let mut duplicates = 0usize;

    for raw in articles {
        let Some(article) = clean_article(raw) else {
            missing_fields += 1;
            continue;
        };
        if !seen_titles.insert(article.title.clone()) {
            duplicates += 1;
            continue;
        }
        cleaned.push(article);
    }

    tracing::debug!(
        received = articles.len(),
        kept = cleaned.len(),
        missing_fields,
        duplicates,
        "cleaned articles"
    );
    cleaned
}

/// Normalizes one article, or returns `None` if its title or content is
/// absent or blank after trimming.
#[must_use]
pub fn clean_article(raw: &RawArticle) -> Option<CleanedArticle> {
    let title = trimmed(raw.title.as_deref())?;
    let content = trimmed(raw.content.as_deref())?;

    Some(CleanedArticle {
        title,
        description: trimmed(raw.description.as_deref()),
        content,
        url: trimmed(raw.url.as_deref()),
        url_to_image: trimmed(raw.url_to_image.as_deref()),
        published_at: raw.published_at.as_deref().and_then(parse_published_at),
        source_name: raw
            .source
            .as_ref()
            .and_then(|source| trimmed(source.name.as_deref())),
        author: trimmed(raw.author.as_deref()),
    })
}

/// Parses a `publishedAt` value, keeping whatever offset it carries.
///
/// Accepts RFC 3339 (`2024-01-15T10:00:00Z`), numeric offsets without a
/// colon, offset-less date-times and bare dates; the last two are read as
/// UTC. Anything else yields `None`.
#[must_use]
pub fn parse_published_at(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts);
    }

    if let Some(ts) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(ts);
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc().fixed_offset())
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
#[path = "cleaner_test.rs"]
mod tests;
