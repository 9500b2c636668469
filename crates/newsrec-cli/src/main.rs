mod fetch;
mod logging;
mod process;
mod query;
mod train;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use newsrec_recommender::{StopWords, DEFAULT_MAX_FEATURES};

#[derive(Debug, Parser)]
#[command(name = "newsrec")]
#[command(about = "News article ingestion and content-based recommendation")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch top headlines and a keyword search from NewsAPI and save raw snapshots
    Fetch {
        /// Country for top headlines
        #[arg(long, default_value = "de")]
        country: String,
        /// Keyword for the full-text search
        #[arg(long, default_value = "technology")]
        query: String,
        /// Language for the full-text search
        #[arg(long, default_value = "de")]
        language: String,
        /// Articles per request
        #[arg(long, default_value_t = 50)]
        page_size: u32,
        /// Restrict top headlines to a category (e.g., business)
        #[arg(long)]
        category: Option<String>,
    },
    /// Clean and featurize raw snapshots into processed CSV tables
    Process {
        /// Raw snapshot to process; repeatable (defaults to every snapshot in the raw dir)
        #[arg(long = "input")]
        inputs: Vec<PathBuf>,
    },
    /// Train a recommender from a processed table and save the model
    Train {
        /// Processed CSV (defaults to the first one in the processed dir)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Maximum vocabulary size
        #[arg(long, default_value_t = DEFAULT_MAX_FEATURES)]
        max_features: usize,
        /// Stop-word lists to remove: both, english, german, or none
        #[arg(long, default_value = "both")]
        stop_words: StopWords,
    },
    /// Show articles similar to a stored article or to free text
    Recommend {
        /// Model artifact to query
        #[arg(long)]
        model: PathBuf,
        /// Identifier (row index) of the article to find neighbours for
        #[arg(long, required_unless_present = "text", conflicts_with = "text")]
        article_id: Option<usize>,
        /// Free text to rank articles against
        #[arg(long)]
        text: Option<String>,
        /// Number of recommendations
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
    },
    /// Print statistics of a saved model
    Stats {
        /// Model artifact to inspect
        #[arg(long)]
        model: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = newsrec_core::load_app_config()?;
    logging::init_tracing(&config)?;
    tracing::debug!(env = %config.env, "configuration loaded");

    match command {
        Commands::Fetch {
            country,
            query,
            language,
            page_size,
            category,
        } => {
            fetch::run_fetch(
                &config,
                &country,
                &query,
                &language,
                page_size,
                category.as_deref(),
            )
            .await?;
        }
        Commands::Process { inputs } => process::run_process(&config, &inputs)?,
        Commands::Train {
            input,
            max_features,
            stop_words,
        } => train::run_train(&config, input.as_deref(), max_features, stop_words)?,
        Commands::Recommend {
            model,
            article_id,
            text,
            count,
        } => query::run_recommend(&model, article_id, text.as_deref(), count)?,
        Commands::Stats { model } => query::run_stats(&model)?,
    }

    Ok(())
}
