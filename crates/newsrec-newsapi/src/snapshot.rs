//! Raw response snapshots: the verbatim NewsAPI payload saved as JSON so
//! later stages can be re-run without another fetch.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::NewsApiError;
use crate::types::ArticlesResponse;

/// Writes `response` as pretty JSON to `<dir>/<prefix>_<YYYYMMDD_HHMMSS>.json`,
/// stamped in UTC like model artifacts.
///
/// Creates `dir` if needed and returns the path written.
///
/// # Errors
///
/// Returns [`NewsApiError::Io`] if the directory or file cannot be written,
/// or [`NewsApiError::Encode`] if serialization fails.
pub fn save_response(
    dir: &Path,
    prefix: &str,
    response: &ArticlesResponse,
) -> Result<PathBuf, NewsApiError> {
    fs::create_dir_all(dir).map_err(|e| NewsApiError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("{prefix}_{timestamp}.json"));

    let file = File::create(&path).map_err(|e| NewsApiError::Io {
        path: path.clone(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, response).map_err(|e| NewsApiError::Encode {
        path: path.clone(),
        source: e,
    })?;
    writer.flush().map_err(|e| NewsApiError::Io {
        path: path.clone(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), count = response.articles.len(), "saved raw snapshot");
    Ok(path)
}

/// Reads a snapshot written by [`save_response`] (or any NewsAPI payload).
///
/// Article entries with an unexpected shape are skipped.
///
/// # Errors
///
/// Returns [`NewsApiError::Io`] if the file cannot be opened, or
/// [`NewsApiError::Deserialize`] if it is not a NewsAPI envelope.
pub fn load_response(path: &Path) -> Result<ArticlesResponse, NewsApiError> {
    let file = File::open(path).map_err(|e| NewsApiError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let deserialize_err = |e| NewsApiError::Deserialize {
        context: path.display().to_string(),
        source: e,
    };
    let value: serde_json::Value =
        serde_json::from_reader(BufReader::new(file)).map_err(deserialize_err)?;
    ArticlesResponse::from_value(value).map_err(deserialize_err)
}
