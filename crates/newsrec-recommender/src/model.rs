//! The fitted recommender: similarity queries, statistics and persistence.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, FixedOffset, Utc};
use newsrec_core::FeaturizedArticle;
use serde::{Deserialize, Serialize};

use crate::error::RecommenderError;
use crate::sparse::CsrMatrix;
use crate::vectorizer::TfidfVectorizer;

/// Version written into every artifact. Loading any other version fails.
pub const FORMAT_VERSION: u32 = 1;

/// One ranked neighbour of a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub article_id: usize,
    pub title: String,
    pub source_name: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<DateTime<FixedOffset>>,
    pub similarity_score: f64,
}

/// Summary numbers for a fitted model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelStatistics {
    pub num_articles: usize,
    /// `(rows, columns)` of the TF-IDF matrix.
    pub feature_matrix_shape: (usize, usize),
    pub vocabulary_size: usize,
    /// Fraction of zero cells in the matrix.
    pub sparsity: f64,
}

/// An immutable content-based recommender over a featurized article table.
///
/// Row `i` of the matrix is the TF-IDF vector of `articles[i]`, and `i` is
/// the article identifier used by every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommenderModel {
    trained_at: DateTime<Utc>,
    vectorizer: TfidfVectorizer,
    matrix: CsrMatrix,
    articles: Vec<FeaturizedArticle>,
}

#[derive(Serialize)]
struct ArtifactRef<'a> {
    format_version: u32,
    model: &'a RecommenderModel,
}

#[derive(Deserialize)]
struct Artifact {
    model: RecommenderModel,
}

#[derive(Deserialize)]
struct VersionProbe {
    format_version: u32,
}

impl RecommenderModel {
    pub(crate) fn new(
        trained_at: DateTime<Utc>,
        vectorizer: TfidfVectorizer,
        matrix: CsrMatrix,
        articles: Vec<FeaturizedArticle>,
    ) -> Self {
        Self {
            trained_at,
            vectorizer,
            matrix,
            articles,
        }
    }

    #[must_use]
    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }

    #[must_use]
    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    #[must_use]
    pub fn matrix(&self) -> &CsrMatrix {
        &self.matrix
    }

    #[must_use]
    pub fn articles(&self) -> &[FeaturizedArticle] {
        &self.articles
    }

    #[must_use]
    pub fn num_articles(&self) -> usize {
        self.articles.len()
    }

    /// Looks up an article by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RecommenderError::ArticleNotFound`] if `article_id` is out of
    /// range.
    pub fn article(&self, article_id: usize) -> Result<&FeaturizedArticle, RecommenderError> {
        self.articles
            .get(article_id)
            .ok_or(RecommenderError::ArticleNotFound {
                article_id,
                num_articles: self.articles.len(),
            })
    }

    /// Returns up to `n` other articles ranked by descending cosine
    /// similarity to `article_id`. Equal scores keep row order.
    ///
    /// # Errors
    ///
    /// Returns [`RecommenderError::ArticleNotFound`] if `article_id` is out of
    /// range.
    pub fn recommend(
        &self,
        article_id: usize,
        n: usize,
    ) -> Result<Vec<Recommendation>, RecommenderError> {
        self.article(article_id)?;
        let query = self.matrix.dense_row(article_id);
        let scores = self.matrix.mul_dense(&query);

        let ranked = rank(
            scores
                .into_iter()
                .enumerate()
                .filter(|&(idx, _)| idx != article_id),
            n,
        );
        tracing::debug!(article_id, requested = n, returned = ranked.len(), "recommend");
        Ok(self.to_recommendations(ranked))
    }

    /// Ranks every article against free text projected through the fitted
    /// vocabulary. Text with no known terms scores 0.0 everywhere.
    #[must_use]
    pub fn recommend_for_text(&self, text: &str, n: usize) -> Vec<Recommendation> {
        let mut query = vec![0.0; self.matrix.n_cols()];
        for (col, weight) in self.vectorizer.transform(text) {
            query[col] = weight;
        }
        let scores = self.matrix.mul_dense(&query);
        let ranked = rank(scores.into_iter().enumerate(), n);
        self.to_recommendations(ranked)
    }

    #[must_use]
    pub fn statistics(&self) -> ModelStatistics {
        ModelStatistics {
            num_articles: self.articles.len(),
            feature_matrix_shape: self.matrix.shape(),
            vocabulary_size: self.vectorizer.vocabulary_size(),
            sparsity: self.matrix.sparsity(),
        }
    }

    /// Writes the model as a versioned JSON artifact, creating parent
    /// directories.
    ///
    /// # Errors
    ///
    /// Returns [`RecommenderError::Io`] or [`RecommenderError::Json`] with the
    /// target path on failure.
    pub fn save(&self, path: &Path) -> Result<(), RecommenderError> {
        let io_err = |e| RecommenderError::Io {
            path: path.to_path_buf(),
            source: e,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| RecommenderError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
        let artifact = ArtifactRef {
            format_version: FORMAT_VERSION,
            model: self,
        };
        serde_json::to_writer(&mut writer, &artifact).map_err(|e| RecommenderError::Json {
            path: path.to_path_buf(),
            source: e,
        })?;
        writer.flush().map_err(io_err)?;

        tracing::info!(
            path = %path.display(),
            num_articles = self.articles.len(),
            "saved recommender model"
        );
        Ok(())
    }

    /// Reads an artifact written by [`RecommenderModel::save`].
    ///
    /// # Errors
    ///
    /// Returns [`RecommenderError::UnsupportedFormat`] for a different format
    /// version, [`RecommenderError::CorruptModel`] if the parts are
    /// inconsistent, and [`RecommenderError::Io`] or
    /// [`RecommenderError::Json`] on read or parse failures.
    pub fn load(path: &Path) -> Result<Self, RecommenderError> {
        let json_err = |e| RecommenderError::Json {
            path: path.to_path_buf(),
            source: e,
        };
        let text = fs::read_to_string(path).map_err(|e| RecommenderError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let probe: VersionProbe = serde_json::from_str(&text).map_err(json_err)?;
        if probe.format_version != FORMAT_VERSION {
            return Err(RecommenderError::UnsupportedFormat {
                found: probe.format_version,
                expected: FORMAT_VERSION,
            });
        }

        let artifact: Artifact = serde_json::from_str(&text).map_err(json_err)?;
        let model = artifact.model;
        model.check_consistency().map_err(|reason| RecommenderError::CorruptModel {
            path: path.to_path_buf(),
            reason,
        })?;

        tracing::info!(
            path = %path.display(),
            num_articles = model.articles.len(),
            vocabulary_size = model.vectorizer.vocabulary_size(),
            "loaded recommender model"
        );
        Ok(model)
    }

    fn check_consistency(&self) -> Result<(), String> {
        self.matrix.validate()?;
        if self.matrix.n_rows() != self.articles.len() {
            return Err(format!(
                "matrix has {} rows for {} articles",
                self.matrix.n_rows(),
                self.articles.len()
            ));
        }
        if self.matrix.n_cols() != self.vectorizer.vocabulary_size() {
            return Err(format!(
                "matrix has {} columns for a vocabulary of {}",
                self.matrix.n_cols(),
                self.vectorizer.vocabulary_size()
            ));
        }
        Ok(())
    }

    fn to_recommendations(&self, ranked: Vec<(usize, f64)>) -> Vec<Recommendation> {
        ranked
            .into_iter()
            .map(|(idx, score)| {
                let article = &self.articles[idx].article;
                Recommendation {
                    article_id: idx,
                    title: article.title.clone(),
                    source_name: article.source_name.clone(),
                    url: article.url.clone(),
                    published_at: article.published_at,
                    similarity_score: score,
                }
            })
            .collect()
    }
}

/// Sorts by descending score, then ascending index, and keeps the first `n`.
fn rank(scored: impl Iterator<Item = (usize, f64)>, n: usize) -> Vec<(usize, f64)> {
    if n == 0 {
        return Vec::new();
    }
    let mut scored: Vec<(usize, f64)> = scored.collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    scored.truncate(n);
    scored
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
