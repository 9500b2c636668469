//! Training entry points: fit a [`RecommenderModel`] from featurized rows or a
//! processed CSV, and write timestamped artifacts.

use std::path::{Path, PathBuf};

use chrono::Utc;
use newsrec_core::FeaturizedArticle;

use crate::error::RecommenderError;
use crate::model::RecommenderModel;
use crate::vectorizer::{TfidfConfig, TfidfVectorizer};

#[derive(Debug, Clone)]
pub struct RecommenderTrainer {
    config: TfidfConfig,
    model_dir: PathBuf,
}

impl RecommenderTrainer {
    /// Trainer with default vectorizer settings saving into `model_dir`.
    #[must_use]
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self::with_config(model_dir, TfidfConfig::default())
    }

    #[must_use]
    pub fn with_config(model_dir: impl Into<PathBuf>, config: TfidfConfig) -> Self {
        Self {
            config,
            model_dir: model_dir.into(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &TfidfConfig {
        &self.config
    }

    #[must_use]
    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    /// Fits a model over the `content` of every article. Row order becomes
    /// the article identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RecommenderError::EmptyCorpus`] for an empty table,
    /// [`RecommenderError::EmptyVocabulary`] if no term survives filtering,
    /// and [`RecommenderError::InvalidConfig`] for bad vectorizer settings.
    pub fn fit(
        &self,
        articles: Vec<FeaturizedArticle>,
    ) -> Result<RecommenderModel, RecommenderError> {
        if articles.is_empty() {
            return Err(RecommenderError::EmptyCorpus);
        }

        let documents: Vec<&str> = articles.iter().map(FeaturizedArticle::content).collect();
        let (vectorizer, matrix) = TfidfVectorizer::fit(self.config.clone(), &documents)?;
        let model = RecommenderModel::new(Utc::now(), vectorizer, matrix, articles);

        let stats = model.statistics();
        tracing::info!(
            num_articles = stats.num_articles,
            vocabulary_size = stats.vocabulary_size,
            sparsity = stats.sparsity,
            stop_words = %self.config.stop_words,
            "trained recommender"
        );
        Ok(model)
    }

    /// Reads a processed table and fits a model on it.
    ///
    /// # Errors
    ///
    /// Returns [`RecommenderError::Processing`] if the CSV cannot be read,
    /// plus every error of [`RecommenderTrainer::fit`].
    pub fn train_from_csv(&self, path: &Path) -> Result<RecommenderModel, RecommenderError> {
        let articles = newsrec_processing::read_processed(path)?;
        tracing::info!(path = %path.display(), rows = articles.len(), "loaded training table");
        self.fit(articles)
    }

    /// Saves `model` as `recommender_<YYYYMMDD_HHMMSS>.json` in the model
    /// directory, stamped with the model's training time.
    ///
    /// # Errors
    ///
    /// Returns [`RecommenderError::Io`] or [`RecommenderError::Json`] if the
    /// artifact cannot be written.
    pub fn save_model(&self, model: &RecommenderModel) -> Result<PathBuf, RecommenderError> {
        let file_name = format!(
            "recommender_{}.json",
            model.trained_at().format("%Y%m%d_%H%M%S")
        );
        let path = self.model_dir.join(file_name);
        model.save(&path)?;
        Ok(path)
    }
}
