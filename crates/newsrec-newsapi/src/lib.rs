//! NewsAPI ingestion: a thin REST client for the `top-headlines` and
//! `everything` endpoints plus raw JSON snapshots on disk.

pub mod client;
pub mod error;
pub mod snapshot;
pub mod types;

pub use client::NewsApiClient;
pub use error::NewsApiError;
pub use snapshot::{load_response, save_response};
pub use types::{ArticlesResponse, EverythingQuery, TopHeadlinesQuery};
