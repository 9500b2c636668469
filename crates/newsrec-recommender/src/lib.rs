//! Content-based article recommender.
//!
//! [`RecommenderTrainer`] fits a TF-IDF representation of each article's
//! content and produces a [`RecommenderModel`], which answers "more like this"
//! queries by cosine similarity and persists itself as a JSON artifact.

pub mod error;
pub mod model;
pub mod sparse;
pub mod tokenize;
pub mod trainer;
pub mod vectorizer;

pub use error::RecommenderError;
pub use model::{ModelStatistics, Recommendation, RecommenderModel, FORMAT_VERSION};
pub use sparse::CsrMatrix;
pub use tokenize::{StopWords, Tokenizer};
pub use trainer::RecommenderTrainer;
pub use vectorizer::{TfidfConfig, TfidfVectorizer, DEFAULT_MAX_FEATURES};
