use chrono::{Datelike, Timelike};
use newsrec_core::RawSource;

use super::*;

fn raw(value: serde_json::Value) -> RawArticle {
    serde_json::from_value(value).expect("fixture should deserialize")
}

fn sample_articles() -> Vec<RawArticle> {
    vec![
        raw(serde_json::json!({
            "title": "Test Article 1",
            "description": "Description 1",
            "content": "This is a test content with some words in it",
            "url": "http://example.com/1",
            "urlToImage": "http://example.com/img1.jpg",
            "publishedAt": "2024-01-01T10:00:00Z",
            "source": { "name": "Test Source" },
            "author": "Test Author"
        })),
        raw(serde_json::json!({
            "title": "Test Article 2",
            "description": "Description 2",
            "content": "Another test content here with more words",
            "url": "http://example.com/2",
            "urlToImage": null,
            "publishedAt": "2024-01-02T12:00:00Z",
            "source": { "name": "Test Source 2" },
            "author": "Another Author"
        })),
        raw(serde_json::json!({
            "title": "Duplicate Article",
            "description": "Duplicate",
            "content": "Duplicate content",
            "url": "http://example.com/3",
            "urlToImage": null,
            "publishedAt": "2024-01-03T14:00:00Z",
            "source": { "name": "Source 3" },
            "author": "Author 3"
        })),
        raw(serde_json::json!({
            "title": "Duplicate Article",
            "description": "Duplicate",
            "content": "Different content but same title",
            "url": "http://example.com/4",
            "urlToImage": null,
            "publishedAt": "2024-01-03T15:00:00Z",
            "source": { "name": "Source 4" },
            "author": "Author 4"
        })),
    ]
}

#[test]
fn clean_articles_removes_one_duplicate() {
    let cleaned = clean_articles(&sample_articles());
    assert_eq!(cleaned.len(), 3);
    assert!(cleaned.iter().all(|a| a.published_at.is_some()));
}

#[test]
fn duplicate_keeps_first_occurrence() {
    let cleaned = clean_articles(&sample_articles());
    let dupes: Vec<_> = cleaned
        .iter()
        .filter(|a| a.title == "Duplicate Article")
        .collect();
    assert_eq!(dupes.len(), 1);
    assert_eq!(dupes[0].content, "Duplicate content");
    assert_eq!(dupes[0].url.as_deref(), Some("http://example.com/3"));
}

#[test]
fn duplicate_detection_uses_trimmed_title() {
    let articles = vec![
        raw(serde_json::json!({ "title": "Same", "content": "first" })),
        raw(serde_json::json!({ "title": "  Same  ", "content": "second" })),
    ];
    let cleaned = clean_articles(&articles);
    assert_eq!(cleaned.len(), 1);
    assert_eq!(cleaned[0].content, "first");
}

#[test]
fn output_preserves_input_order() {
    let cleaned = clean_articles(&sample_articles());
    let titles: Vec<&str> = cleaned.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Test Article 1", "Test Article 2", "Duplicate Article"]
    );
}

#[test]
fn clean_articles_removes_nulls() {
    let articles = vec![
        raw(serde_json::json!({
            "title": "Complete Article",
            "content": "Content",
            "publishedAt": "2024-01-01T10:00:00Z",
            "source": { "name": "Source" }
        })),
        raw(serde_json::json!({
            "title": "Missing Content",
            "content": null,
            "publishedAt": "2024-01-01T10:00:00Z"
        })),
        raw(serde_json::json!({
            "title": null,
            "content": "Content",
            "publishedAt": "2024-01-01T10:00:00Z"
        })),
    ];

    let cleaned = clean_articles(&articles);
    assert_eq!(cleaned.len(), 1);
    assert_eq!(cleaned[0].title, "Complete Article");
}

#[test]
fn blank_title_or_content_is_dropped() {
    let articles = vec![
        raw(serde_json::json!({ "title": "   ", "content": "Content" })),
        raw(serde_json::json!({ "title": "Title", "content": "\n\t " })),
    ];
    assert!(clean_articles(&articles).is_empty());
}

#[test]
fn extracts_source_name() {
    let cleaned = clean_articles(&sample_articles());
    assert_eq!(cleaned[0].source_name.as_deref(), Some("Test Source"));
    assert_eq!(cleaned[1].source_name.as_deref(), Some("Test Source 2"));
}

#[test]
fn missing_source_mapping_yields_none() {
    let article = RawArticle {
        title: Some("No source".to_string()),
        content: Some("Body".to_string()),
        source: None,
        ..RawArticle::default()
    };
    let cleaned = clean_article(&article).unwrap();
    assert!(cleaned.source_name.is_none());

    let article = RawArticle {
        source: Some(RawSource {
            id: Some("spiegel".to_string()),
            name: None,
        }),
        ..article
    };
    assert!(clean_article(&article).unwrap().source_name.is_none());
}

#[test]
fn strips_whitespace() {
    let articles = vec![raw(serde_json::json!({
        "title": "  Article with spaces  ",
        "description": "  Description  ",
        "content": "  Content  ",
        "url": "http://example.com/1",
        "urlToImage": null,
        "publishedAt": "2024-01-01T10:00:00Z",
        "source": { "name": "Source" },
        "author": "Author"
    }))];

    let cleaned = clean_articles(&articles);
    assert_eq!(cleaned[0].title, "Article with spaces");
    assert_eq!(cleaned[0].description.as_deref(), Some("Description"));
    assert_eq!(cleaned[0].content, "Content");
}

#[test]
fn empty_optional_fields_become_none() {
    let article = raw(serde_json::json!({
        "title": "Title",
        "content": "Body",
        "description": "  ",
        "urlToImage": ""
    }));
    let cleaned = clean_article(&article).unwrap();
    assert!(cleaned.description.is_none());
    assert!(cleaned.url_to_image.is_none());
}

#[test]
fn unparsable_timestamp_keeps_row() {
    let articles = vec![raw(serde_json::json!({
        "title": "Bad date",
        "content": "Body",
        "publishedAt": "yesterday-ish"
    }))];
    let cleaned = clean_articles(&articles);
    assert_eq!(cleaned.len(), 1);
    assert!(cleaned[0].published_at.is_none());
}

#[test]
fn parse_published_at_keeps_offset() {
    let ts = parse_published_at("2024-01-15T10:30:00+01:00").unwrap();
    assert_eq!(ts.hour(), 10);
    assert_eq!(ts.offset().local_minus_utc(), 3600);
}

#[test]
fn parse_published_at_accepts_zulu_and_fraction() {
    let ts = parse_published_at("2024-01-15T23:59:59.123Z").unwrap();
    assert_eq!(ts.hour(), 23);
    assert_eq!(ts.day(), 15);
}

#[test]
fn parse_published_at_accepts_offset_without_colon() {
    let ts = parse_published_at("2024-01-15T10:00:00+0200").unwrap();
    assert_eq!(ts.offset().local_minus_utc(), 7200);
}

#[test]
fn parse_published_at_reads_naive_as_utc() {
    let ts = parse_published_at("2024-01-15 08:00:00").unwrap();
    assert_eq!(ts.hour(), 8);
    assert_eq!(ts.offset().local_minus_utc(), 0);

    let date_only = parse_published_at("2024-01-15").unwrap();
    assert_eq!(date_only.hour(), 0);
}

#[test]
fn parse_published_at_rejects_garbage() {
    assert!(parse_published_at("").is_none());
    assert!(parse_published_at("not a date").is_none());
    assert!(parse_published_at("2024-13-45T99:00:00Z").is_none());
}

#[test]
fn never_grows_the_table() {
    let articles = sample_articles();
    assert!(clean_articles(&articles).len() <= articles.len());
    assert!(clean_articles(&[]).is_empty());
}
