//! The processed-article CSV: the hand-off file between featurization and
//! training.
//!
//! One row per article, columns in [`COLUMNS`] order. Absent values are empty
//! cells and timestamps are RFC 3339 strings.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use csv::{ReaderBuilder, WriterBuilder};
use newsrec_core::{ArticleFeatures, CleanedArticle, DayOfWeek, FeaturizedArticle};
use serde::{Deserialize, Serialize};

use crate::error::ProcessingError;

/// Header of the processed table.
pub const COLUMNS: [&str; 13] = [
    "title",
    "description",
    "content",
    "url",
    "urlToImage",
    "publishedAt",
    "source_name",
    "author",
    "content_length",
    "word_count",
    "has_image",
    "day_of_week",
    "hour",
];

const PROCESSED_SUFFIX: &str = "_processed.csv";

/// Flat CSV row; `FeaturizedArticle` nests, which the CSV serializer rejects.
#[derive(Debug, Serialize, Deserialize)]
struct ArticleRecord {
    title: String,
    description: Option<String>,
    content: String,
    url: Option<String>,
    #[serde(rename = "urlToImage")]
    url_to_image: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<DateTime<FixedOffset>>,
    source_name: Option<String>,
    author: Option<String>,
    content_length: usize,
    word_count: usize,
    has_image: bool,
    day_of_week: Option<DayOfWeek>,
    hour: Option<u32>,
}

impl ArticleRecord {
    /// Why this row could not have come from [`write_processed`], if it
    /// could not.
    fn invalid_reason(&self) -> Option<&'static str> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            Some("title and content must be non-empty")
        } else if self.hour.is_some_and(|h| h > 23) {
            Some("hour must be between 0 and 23")
        } else if self.word_count == 0 {
            Some("word_count must be at least 1")
        } else {
            None
        }
    }
}

impl From<&FeaturizedArticle> for ArticleRecord {
    fn from(row: &FeaturizedArticle) -> Self {
        let a = &row.article;
        let f = &row.features;
        Self {
            title: a.title.clone(),
            description: a.description.clone(),
            content: a.content.clone(),
            url: a.url.clone(),
            url_to_image: a.url_to_image.clone(),
            published_at: a.published_at,
            source_name: a.source_name.clone(),
            author: a.author.clone(),
            content_length: f.content_length,
            word_count: f.word_count,
            has_image: f.has_image,
            day_of_week: f.day_of_week,
            hour: f.hour,
        }
    }
}

impl From<ArticleRecord> for FeaturizedArticle {
    fn from(r: ArticleRecord) -> Self {
        FeaturizedArticle {
            article: CleanedArticle {
                title: r.title,
                description: r.description,
                content: r.content,
                url: r.url,
                url_to_image: r.url_to_image,
                published_at: r.published_at,
                source_name: r.source_name,
                author: r.author,
            },
            features: ArticleFeatures {
                content_length: r.content_length,
                word_count: r.word_count,
                has_image: r.has_image,
                day_of_week: r.day_of_week,
                hour: r.hour,
            },
        }
    }
}

/// File name for the processed table derived from a raw snapshot stem.
#[must_use]
pub fn processed_file_name(stem: &str) -> String {
    format!("{stem}{PROCESSED_SUFFIX}")
}

/// Writes `rows` to `path`, creating parent directories. The header is
/// written even for an empty table.
///
/// # Errors
///
/// Returns [`ProcessingError::Io`] if the parent directory cannot be created
/// and [`ProcessingError::Csv`] on any write failure.
pub fn write_processed(path: &Path, rows: &[FeaturizedArticle]) -> Result<(), ProcessingError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ProcessingError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let csv_err = |e| ProcessingError::Csv {
        path: path.to_path_buf(),
        source: e,
    };

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;
    writer.write_record(COLUMNS).map_err(csv_err)?;
    for row in rows {
        writer.serialize(ArticleRecord::from(row)).map_err(csv_err)?;
    }
    writer.flush().map_err(|e| ProcessingError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), rows = rows.len(), "wrote processed table");
    Ok(())
}

/// Reads a processed table written by [`write_processed`].
///
/// # Errors
///
/// Returns [`ProcessingError::Csv`] if the file cannot be opened or a row
/// does not parse, and [`ProcessingError::InvalidRow`] if a row has an empty
/// title or content, an hour above 23, or a zero word count.
pub fn read_processed(path: &Path) -> Result<Vec<FeaturizedArticle>, ProcessingError> {
    let csv_err = |e| ProcessingError::Csv {
        path: path.to_path_buf(),
        source: e,
    };

    let mut reader = ReaderBuilder::new().from_path(path).map_err(csv_err)?;
    let mut rows = Vec::new();

    for (idx, result) in reader.deserialize::<ArticleRecord>().enumerate() {
        let record = result.map_err(csv_err)?;
        if let Some(reason) = record.invalid_reason() {
            return Err(ProcessingError::InvalidRow {
                path: path.to_path_buf(),
                row: idx + 1,
                reason: reason.to_string(),
            });
        }
        rows.push(FeaturizedArticle::from(record));
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), "read processed table");
    Ok(rows)
}

/// Lists `*_processed.csv` files in `dir`, sorted by file name.
///
/// A missing directory yields an empty list.
///
/// # Errors
///
/// Returns [`ProcessingError::Io`] if the directory exists but cannot be read.
pub fn list_processed_files(dir: &Path) -> Result<Vec<PathBuf>, ProcessingError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let io_err = |e| ProcessingError::Io {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_processed = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(PROCESSED_SUFFIX));
        if is_processed && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use crate::featurize;

    use super::*;

    fn sample_rows() -> Vec<FeaturizedArticle> {
        let raw: Vec<newsrec_core::RawArticle> = serde_json::from_value(serde_json::json!([
            {
                "source": { "id": null, "name": "Spiegel" },
                "author": "John Doe",
                "title": "Breaking: New AI Model Released",
                "description": "Scientists have released a new AI model",
                "url": "https://spiegel.de/article1",
                "urlToImage": "https://spiegel.de/image1.jpg",
                "publishedAt": "2024-01-15T10:00:00+01:00",
                "content": "This is the full content, with a comma and \"quotes\""
            },
            {
                "source": { "id": null, "name": "News" },
                "author": null,
                "title": "Market Trends Show Growth",
                "description": null,
                "url": "https://news.de/article3",
                "urlToImage": null,
                "publishedAt": "not a timestamp",
                "content": "Recent market trends\nindicate strong growth"
            }
        ]))
        .unwrap();
        featurize(&raw)
    }

    #[test]
    fn write_then_read_reproduces_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir
            .path()
            .join("data")
            .join("processed")
            .join(processed_file_name("test_articles"));

        let rows = sample_rows();
        write_processed(&path, &rows).unwrap();
        let loaded = read_processed(&path).unwrap();

        assert_eq!(loaded, rows);
        assert_eq!(loaded[0].article.published_at, rows[0].article.published_at);
        assert!(loaded[1].features.hour.is_none());
    }

    #[test]
    fn header_matches_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t_processed.csv");
        write_processed(&path, &sample_rows()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, COLUMNS.join(","));
        assert!(text.contains("Monday"));
        assert!(text.contains("true"));
    }

    #[test]
    fn empty_table_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty_processed.csv");
        write_processed(&path, &[]).unwrap();
        assert!(read_processed(&path).unwrap().is_empty());
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("title,"));
    }

    #[test]
    fn read_rejects_blank_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad_processed.csv");
        let mut text = COLUMNS.join(",");
        text.push_str("\n,,Body,,,,,,4,1,false,,\n");
        std::fs::write(&path, text).unwrap();

        let err = read_processed(&path).unwrap_err();
        assert!(matches!(err, ProcessingError::InvalidRow { row: 1, .. }));
    }

    fn write_single_row(dir: &Path, row: &str) -> PathBuf {
        let path = dir.join("bad_processed.csv");
        let mut text = COLUMNS.join(",");
        text.push('\n');
        text.push_str(row);
        text.push('\n');
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn read_rejects_hour_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_single_row(dir.path(), "Title,,Body,,,,,,4,1,false,,30");

        let err = read_processed(&path).unwrap_err();
        match err {
            ProcessingError::InvalidRow { row, reason, .. } => {
                assert_eq!(row, 1);
                assert!(reason.contains("hour"), "unexpected reason {reason}");
            }
            other => panic!("expected InvalidRow, got {other:?}"),
        }
    }

    #[test]
    fn read_rejects_zero_word_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_single_row(dir.path(), "Title,,Body,,,,,,4,0,false,,");

        let err = read_processed(&path).unwrap_err();
        match err {
            ProcessingError::InvalidRow { row, reason, .. } => {
                assert_eq!(row, 1);
                assert!(reason.contains("word_count"), "unexpected reason {reason}");
            }
            other => panic!("expected InvalidRow, got {other:?}"),
        }
    }

    #[test]
    fn read_accepts_last_hour_of_day() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_single_row(dir.path(), "Title,,Body,,,,,,4,1,false,,23");

        let rows = read_processed(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].features.hour, Some(23));
    }

    #[test]
    fn read_missing_file_is_csv_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_processed(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, ProcessingError::Csv { .. }));
    }

    #[test]
    fn list_processed_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b_processed.csv", "a_processed.csv", "notes.txt", "raw.json"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        let files = list_processed_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a_processed.csv", "b_processed.csv"]);
    }

    #[test]
    fn list_processed_files_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_processed_files(&dir.path().join("missing"))
            .unwrap()
            .is_empty());
    }
}
