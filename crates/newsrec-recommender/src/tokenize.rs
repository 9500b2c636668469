//! Text tokenization for the TF-IDF vectorizer.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RecommenderError;

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few",
    "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "if", "in", "into", "is", "it", "its", "itself",
    "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on",
    "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same",
    "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
];

const GERMAN_STOP_WORDS: &[&str] = &[
    "aber", "alle", "allem", "allen", "aller", "alles", "als", "also", "am", "an", "ander",
    "andere", "anderen", "anderer", "anderes", "auch", "auf", "aus", "bei", "bin", "bis", "bist",
    "da", "damit", "dann", "das", "dass", "dein", "deine", "dem", "den", "denn", "der", "des",
    "dich", "die", "dies", "diese", "diesem", "diesen", "dieser", "dieses", "dir", "doch", "dort",
    "du", "durch", "ein", "eine", "einem", "einen", "einer", "eines", "einige", "er", "es",
    "etwas", "euch", "euer", "für", "gegen", "gewesen", "hab", "habe", "haben", "hat", "hatte",
    "hier", "hin", "hinter", "ich", "ihm", "ihn", "ihnen", "ihr", "ihre", "im", "in", "indem",
    "ins", "ist", "jede", "jedem", "jeden", "jeder", "jedes", "jetzt", "kann", "kein", "keine",
    "können", "man", "manche", "mein", "meine", "mich", "mir", "mit", "muss", "nach", "nicht",
    "nichts", "noch", "nun", "nur", "ob", "oder", "ohne", "schon", "sehr", "sein", "seine",
    "sich", "sie", "sind", "so", "solche", "soll", "sondern", "um", "und", "uns", "unser",
    "unter", "viel", "vom", "von", "vor", "war", "waren", "was", "weg", "weil", "weiter",
    "welche", "wenn", "werden", "wie", "wieder", "will", "wir", "wird", "wo", "wurde", "zu",
    "zum", "zur", "zwischen", "über",
];

/// Which stop-word lists the tokenizer removes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopWords {
    English,
    German,
    #[default]
    Both,
    None,
}

impl StopWords {
    fn words(self) -> impl Iterator<Item = &'static str> {
        let (english, german): (&[&str], &[&str]) = match self {
            Self::English => (ENGLISH_STOP_WORDS, &[]),
            Self::German => (&[], GERMAN_STOP_WORDS),
            Self::Both => (ENGLISH_STOP_WORDS, GERMAN_STOP_WORDS),
            Self::None => (&[], &[]),
        };
        english.iter().chain(german).copied()
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::German => "german",
            Self::Both => "both",
            Self::None => "none",
        }
    }
}

impl fmt::Display for StopWords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StopWords {
    type Err = RecommenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" => Ok(Self::English),
            "german" => Ok(Self::German),
            "both" => Ok(Self::Both),
            "none" => Ok(Self::None),
            other => Err(RecommenderError::InvalidConfig(format!(
                "unknown stop-word list '{other}'; expected english, german, both, or none"
            ))),
        }
    }
}

/// Splits text into lowercase terms.
///
/// Tokens are maximal runs of alphanumeric characters. Single-character
/// tokens, purely numeric tokens and stop words are dropped.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stop_words: HashSet<&'static str>,
}

impl Tokenizer {
    #[must_use]
    pub fn new(stop_words: StopWords) -> Self {
        Self {
            stop_words: stop_words.words().collect(),
        }
    }

    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| token.chars().count() >= 2)
            .filter(|token| !token.chars().all(char::is_numeric))
            .filter(|token| !self.stop_words.contains(token))
            .map(ToOwned::to_owned)
            .collect()
    }
}
