//! `fetch` command: pull articles from NewsAPI into raw snapshots.

use newsrec_core::AppConfig;
use newsrec_newsapi::{save_response, EverythingQuery, NewsApiClient, TopHeadlinesQuery};

/// Fetches top headlines for `country` and a full-text search for `query`,
/// saving each response under the raw dir.
///
/// # Errors
///
/// Fails before any request if `NEWS_API_KEY` is missing, and on the first
/// request or write failure. Nothing is retried.
pub(crate) async fn run_fetch(
    config: &AppConfig,
    country: &str,
    query: &str,
    language: &str,
    page_size: u32,
    category: Option<&str>,
) -> anyhow::Result<()> {
    let client = NewsApiClient::new(config)?;

    let headlines = TopHeadlinesQuery {
        country: country.to_string(),
        category: category.map(ToOwned::to_owned),
        page_size,
    };
    let response = client.fetch_top_headlines(&headlines).await?;
    let path = save_response(
        &config.raw_dir,
        &format!("top_headlines_{}", slug(country)),
        &response,
    )?;
    println!(
        "saved {} top headlines to {}",
        response.articles.len(),
        path.display()
    );

    let search = EverythingQuery {
        language: language.to_string(),
        page_size,
        ..EverythingQuery::new(query)
    };
    let response = client.fetch_everything(&search).await?;
    let path = save_response(&config.raw_dir, &search_prefix(query, language), &response)?;
    println!(
        "saved {} '{query}' articles to {}",
        response.articles.len(),
        path.display()
    );

    Ok(())
}

/// Snapshot prefix for a full-text search, e.g. `technology_news_de`.
pub(crate) fn search_prefix(query: &str, language: &str) -> String {
    format!("{}_news_{}", slug(query), slug(language))
}

/// Lowercases and replaces anything but ASCII alphanumerics with `_`.
fn slug(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.trim().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        "query".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_prefix_matches_snapshot_naming() {
        assert_eq!(search_prefix("technology", "de"), "technology_news_de");
    }

    #[test]
    fn search_prefix_sanitizes_query() {
        assert_eq!(
            search_prefix("Green Energy / Solar", "en"),
            "green_energy_solar_news_en"
        );
        assert_eq!(search_prefix("???", "de"), "query_news_de");
    }
}
