//! Tracing subscriber setup: one filter, console and `app.log` outputs.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::Context;
use newsrec_core::AppConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// File name of the log inside `log_dir`.
pub(crate) const LOG_FILE_NAME: &str = "app.log";

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over the configured level. Events go to stdout and are
/// appended, without ANSI colours, to `<log_dir>/app.log`.
///
/// # Errors
///
/// Returns an error if the filter is invalid, the log file cannot be opened,
/// or a subscriber is already installed.
pub(crate) fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .with_context(|| format!("invalid log level '{}'", config.log_level))?;

    fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("failed to create log dir {}", config.log_dir.display()))?;
    let log_path = config.log_dir.join(LOG_FILE_NAME);
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(log_file)))
        .try_init()
        .context("failed to install tracing subscriber")?;
    Ok(())
}
