//! Article records at each pipeline stage.

use chrono::{DateTime, FixedOffset, Weekday};
use serde::{Deserialize, Serialize};

/// Publisher block nested inside a NewsAPI article: `{ "id": ..., "name": ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// One article exactly as the fetch collaborator delivered it.
///
/// Every field is optional on the wire; validity is decided by the cleaner,
/// not by deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    #[serde(default)]
    pub source: Option<RawSource>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    /// ISO-8601 timestamp string, unparsed.
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// A normalized article row.
///
/// `title` and `content` are trimmed and non-empty. Optional text fields
/// are trimmed and `None` when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedArticle {
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    /// Parsed timestamp in the offset it was published with. `None` when the
    /// raw value was missing or unparsable.
    pub published_at: Option<DateTime<FixedOffset>>,
    pub source_name: Option<String>,
    pub author: Option<String>,
}

/// Full English weekday name, as written to the processed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Columns derived from a [`CleanedArticle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleFeatures {
    /// Character count of `content`.
    pub content_length: usize,
    /// Whitespace-delimited token count of `content`.
    pub word_count: usize,
    pub has_image: bool,
    pub day_of_week: Option<DayOfWeek>,
    /// Hour of day, 0-23, in the timestamp's own offset.
    pub hour: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturizedArticle {
    pub article: CleanedArticle,
    pub features: ArticleFeatures,
}

impl FeaturizedArticle {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.article.title
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.article.content
    }
}
