//! `train` command: fit, save and smoke-test a recommender.

use std::path::{Path, PathBuf};

use anyhow::bail;
use newsrec_core::AppConfig;
use newsrec_processing::list_processed_files;
use newsrec_recommender::{RecommenderTrainer, StopWords, TfidfConfig};

/// Number of sample recommendations logged after training.
const SAMPLE_RECOMMENDATIONS: usize = 5;

/// Trains on `input`, or on the first processed table in sorted order, saves
/// the artifact and logs statistics plus sample recommendations for
/// article 0.
///
/// # Errors
///
/// Returns an error if no processed table exists, training fails, or the
/// model cannot be saved.
pub(crate) fn run_train(
    config: &AppConfig,
    input: Option<&Path>,
    max_features: usize,
    stop_words: StopWords,
) -> anyhow::Result<()> {
    let input = resolve_input(&config.processed_dir, input)?;
    tracing::info!(path = %input.display(), "starting recommender training");

    let trainer = RecommenderTrainer::with_config(
        &config.model_dir,
        TfidfConfig {
            stop_words,
            max_features: Some(max_features),
            ..TfidfConfig::default()
        },
    );
    let model = trainer.train_from_csv(&input)?;

    let stats = model.statistics();
    tracing::info!(
        articles = stats.num_articles,
        features = stats.feature_matrix_shape.1,
        vocabulary = stats.vocabulary_size,
        sparsity = %format!("{:.2}%", stats.sparsity * 100.0),
        "model statistics"
    );

    let path = trainer.save_model(&model)?;
    println!("saved model to {}", path.display());

    let query = model.article(0)?;
    tracing::info!(title = %truncate_chars(query.title(), 60), "query article");
    for (rank, rec) in model
        .recommend(0, SAMPLE_RECOMMENDATIONS)?
        .iter()
        .enumerate()
    {
        tracing::info!(
            rank = rank + 1,
            article_id = rec.article_id,
            title = %truncate_chars(&rec.title, 50),
            score = %format!("{:.3}", rec.similarity_score),
            "recommendation"
        );
    }

    tracing::info!("training completed");
    Ok(())
}

/// The explicit input, or the first `*_processed.csv` in `processed_dir`.
pub(crate) fn resolve_input(processed_dir: &Path, input: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(path) = input {
        return Ok(path.to_path_buf());
    }
    match list_processed_files(processed_dir)?.into_iter().next() {
        Some(path) => Ok(path),
        None => bail!(
            "no processed CSV files found in {}; run `newsrec process` first",
            processed_dir.display()
        ),
    }
}

/// First `max` characters of `text`, with `...` appended when cut.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
