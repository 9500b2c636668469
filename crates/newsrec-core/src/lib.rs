//! Shared domain types and configuration for the newsrec workspace.
//!
//! Articles move through three shapes: [`RawArticle`] as delivered by the
//! NewsAPI collaborator, [`CleanedArticle`] after normalization and
//! deduplication, and [`FeaturizedArticle`] once derived columns are attached.

pub mod app_config;
pub mod article;
pub mod config;
pub mod error;

pub use app_config::{AppConfig, Environment};
pub use article::{
    ArticleFeatures, CleanedArticle, DayOfWeek, FeaturizedArticle, RawArticle, RawSource,
};
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_USER_AGENT};
pub use error::ConfigError;
