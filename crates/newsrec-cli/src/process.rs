//! `process` command: raw snapshots to processed CSV tables.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use newsrec_core::AppConfig;
use newsrec_newsapi::load_response;
use newsrec_processing::{featurize, processed_file_name, write_processed};

/// Cleans and featurizes each snapshot in `inputs`, or every `*.json` in the
/// raw dir when none are given, writing one processed table per snapshot.
///
/// # Errors
///
/// Returns an error if there is nothing to process or any snapshot cannot be
/// read or written.
pub(crate) fn run_process(config: &AppConfig, inputs: &[PathBuf]) -> anyhow::Result<()> {
    let inputs = if inputs.is_empty() {
        list_raw_snapshots(&config.raw_dir)?
    } else {
        inputs.to_vec()
    };
    if inputs.is_empty() {
        bail!("no raw snapshots found in {}", config.raw_dir.display());
    }

    for input in &inputs {
        let response = load_response(input)?;
        let rows = featurize(&response.articles);
        let output = processed_path(&config.processed_dir, input);
        write_processed(&output, &rows)?;
        println!(
            "{}: {} of {} articles -> {}",
            input.display(),
            rows.len(),
            response.articles.len(),
            output.display()
        );
    }
    Ok(())
}

/// `<processed_dir>/<stem>_processed.csv` for a raw snapshot path.
pub(crate) fn processed_path(processed_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "articles".into(), |s| s.to_string_lossy());
    processed_dir.join(processed_file_name(&stem))
}

/// `*.json` files directly inside `dir`, sorted by name. A missing directory
/// yields an empty list.
pub(crate) fn list_raw_snapshots(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))? {
        let path = entry?.path();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
