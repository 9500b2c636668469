//! Read-only commands against a saved model: `recommend` and `stats`.

use std::path::Path;

use anyhow::bail;
use newsrec_recommender::{Recommendation, RecommenderModel};

/// Prints the `count` nearest neighbours of `article_id`, or of `text`.
///
/// # Errors
///
/// Returns an error if the model cannot be loaded, the article does not
/// exist, or neither an article nor text was given.
pub(crate) fn run_recommend(
    model_path: &Path,
    article_id: Option<usize>,
    text: Option<&str>,
    count: usize,
) -> anyhow::Result<()> {
    let model = RecommenderModel::load(model_path)?;

    let recommendations = match (article_id, text) {
        (Some(id), _) => {
            let article = model.article(id)?;
            println!("Recommendations for [{id}] {}:", article.title());
            model.recommend(id, count)?
        }
        (None, Some(text)) => {
            println!("Recommendations for \"{text}\":");
            model.recommend_for_text(text, count)
        }
        (None, None) => bail!("either --article-id or --text is required"),
    };

    if recommendations.is_empty() {
        println!("  (none)");
    }
    for (rank, rec) in recommendations.iter().enumerate() {
        println!("{}", format_recommendation(rank + 1, rec));
    }
    Ok(())
}

/// Prints the statistics of a saved model.
///
/// # Errors
///
/// Returns an error if the model cannot be loaded.
pub(crate) fn run_stats(model_path: &Path) -> anyhow::Result<()> {
    let model = RecommenderModel::load(model_path)?;
    let stats = model.statistics();
    let (rows, cols) = stats.feature_matrix_shape;

    println!("Model: {}", model_path.display());
    println!("  Trained at: {}", model.trained_at().format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  Articles: {}", stats.num_articles);
    println!("  Features: {cols} ({rows} x {cols})");
    println!("  Vocabulary: {} unique words", stats.vocabulary_size);
    println!("  Sparsity: {:.2}%", stats.sparsity * 100.0);
    println!("  Stop words: {}", model.vectorizer().config().stop_words);
    Ok(())
}

fn format_recommendation(rank: usize, rec: &Recommendation) -> String {
    let source = rec
        .source_name
        .as_deref()
        .map(|s| format!(" ({s})"))
        .unwrap_or_default();
    format!(
        "  {rank}. [{}] {}{source} (Score: {:.3})",
        rec.article_id, rec.title, rec.similarity_score
    )
}
