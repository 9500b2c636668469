//! TF-IDF vectorizer.
//!
//! Weights are raw term counts times the smoothed inverse document frequency
//! `ln((1 + n) / (1 + df)) + 1`, and every row is L2-normalized so that a dot
//! product between two rows is their cosine similarity.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::RecommenderError;
use crate::sparse::CsrMatrix;
use crate::tokenize::{StopWords, Tokenizer};

/// Default cap on the vocabulary size.
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Vectorizer settings, stored in the model so queries reuse them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfConfig {
    pub stop_words: StopWords,
    /// Minimum number of documents a term must appear in.
    pub min_df: usize,
    /// Maximum fraction of documents a term may appear in.
    pub max_df: f64,
    /// Keep only this many of the most frequent terms.
    pub max_features: Option<usize>,
}

impl Default for TfidfConfig {
    fn default() -> Self {
        Self {
            stop_words: StopWords::Both,
            min_df: 1,
            max_df: 1.0,
            max_features: Some(DEFAULT_MAX_FEATURES),
        }
    }
}

impl TfidfConfig {
    /// # Errors
    ///
    /// Returns [`RecommenderError::InvalidConfig`] if `min_df` is zero,
    /// `max_df` is outside `(0, 1]`, or `max_features` is `Some(0)`.
    pub fn validate(&self) -> Result<(), RecommenderError> {
        if self.min_df == 0 {
            return Err(RecommenderError::InvalidConfig(
                "min_df must be at least 1".to_string(),
            ));
        }
        if !(self.max_df > 0.0 && self.max_df <= 1.0) {
            return Err(RecommenderError::InvalidConfig(format!(
                "max_df must be in (0, 1], got {}",
                self.max_df
            )));
        }
        if self.max_features == Some(0) {
            return Err(RecommenderError::InvalidConfig(
                "max_features must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// A fitted vocabulary with its IDF weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "VectorizerState", into = "VectorizerState")]
pub struct TfidfVectorizer {
    config: TfidfConfig,
    /// Column index to term, in lexicographic order.
    terms: Vec<String>,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    tokenizer: Tokenizer,
}

/// Persisted form; the lookup map and tokenizer are rebuilt on load.
#[derive(Clone, Serialize, Deserialize)]
struct VectorizerState {
    config: TfidfConfig,
    terms: Vec<String>,
    idf: Vec<f64>,
}

impl From<TfidfVectorizer> for VectorizerState {
    fn from(v: TfidfVectorizer) -> Self {
        Self {
            config: v.config,
            terms: v.terms,
            idf: v.idf,
        }
    }
}

impl TryFrom<VectorizerState> for TfidfVectorizer {
    type Error = String;

    fn try_from(state: VectorizerState) -> Result<Self, Self::Error> {
        if state.terms.len() != state.idf.len() {
            return Err(format!(
                "vocabulary has {} terms but {} idf weights",
                state.terms.len(),
                state.idf.len()
            ));
        }
        Ok(Self::from_parts(state.config, state.terms, state.idf))
    }
}

impl PartialEq for TfidfVectorizer {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config && self.terms == other.terms && self.idf == other.idf
    }
}

impl TfidfVectorizer {
    fn from_parts(config: TfidfConfig, terms: Vec<String>, idf: Vec<f64>) -> Self {
        let vocabulary = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();
        let tokenizer = Tokenizer::new(config.stop_words);
        Self {
            config,
            terms,
            vocabulary,
            idf,
            tokenizer,
        }
    }

    /// Learns the vocabulary and IDF weights from `documents` and returns the
    /// vectorizer together with the weighted document-term matrix.
    ///
    /// # Errors
    ///
    /// Returns [`RecommenderError::InvalidConfig`] for bad settings,
    /// [`RecommenderError::EmptyCorpus`] for zero documents and
    /// [`RecommenderError::EmptyVocabulary`] if every term is filtered out.
    #[allow(clippy::cast_precision_loss)]
    pub fn fit(
        config: TfidfConfig,
        documents: &[&str],
    ) -> Result<(Self, CsrMatrix), RecommenderError> {
        config.validate()?;
        if documents.is_empty() {
            return Err(RecommenderError::EmptyCorpus);
        }

        let tokenizer = Tokenizer::new(config.stop_words);
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenizer.tokenize(d)).collect();

        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        let mut corpus_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
            for term in tokens {
                *corpus_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let n_docs = documents.len();
        let max_count = config.max_df * n_docs as f64;
        let mut candidates: Vec<(&str, usize)> = doc_freq
            .iter()
            .filter(|&(_, &df)| df >= config.min_df && df as f64 <= max_count)
            .map(|(&term, _)| (term, corpus_freq.get(term).copied().unwrap_or(0)))
            .collect();

        if let Some(limit) = config.max_features {
            if candidates.len() > limit {
                candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
                candidates.truncate(limit);
            }
        }
        candidates.sort_by(|a, b| a.0.cmp(b.0));

        if candidates.is_empty() {
            return Err(RecommenderError::EmptyVocabulary);
        }

        let n = n_docs as f64;
        let idf: Vec<f64> = candidates
            .iter()
            .map(|(term, _)| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        let terms: Vec<String> = candidates.iter().map(|(t, _)| (*t).to_string()).collect();

        let vectorizer = Self::from_parts(config, terms, idf);
        let rows: Vec<Vec<(usize, f64)>> = tokenized.iter().map(|t| vectorizer.weigh(t)).collect();
        let matrix = CsrMatrix::from_rows(&rows, vectorizer.terms.len());

        tracing::debug!(
            documents = n_docs,
            vocabulary_size = vectorizer.terms.len(),
            nnz = matrix.nnz(),
            "fitted tf-idf vectorizer"
        );
        Ok((vectorizer, matrix))
    }

    /// Projects free text into the fitted space as sorted `(column, weight)`
    /// pairs. Terms outside the vocabulary are ignored.
    #[must_use]
    pub fn transform(&self, text: &str) -> Vec<(usize, f64)> {
        self.weigh(&self.tokenizer.tokenize(text))
    }

    #[allow(clippy::cast_precision_loss)]
    fn weigh(&self, tokens: &[String]) -> Vec<(usize, f64)> {
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for token in tokens {
            if let Some(&col) = self.vocabulary.get(token) {
                *counts.entry(col).or_insert(0) += 1;
            }
        }

        let mut row: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(col, count)| (col, count as f64 * self.idf[col]))
            .collect();

        let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut row {
                *w /= norm;
            }
        }
        row
    }

    #[must_use]
    pub fn config(&self) -> &TfidfConfig {
        &self.config
    }

    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[must_use]
    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    #[must_use]
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }
}
