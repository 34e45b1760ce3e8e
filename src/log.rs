use crate::errors::{Result, ShellError, ShellErrorType};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, Registry};

const MAX_LOG_AGE_DAYS: i64 = 30;

pub fn init_logging(
    log_dir: &Path,
    level: tracing::Level,
) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_file = get_log_location(log_dir)?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();
    // The subscriber should be an append-only file

    let formatter = BunyanFormattingLayer::new("treefs".into(), non_blocking);

    let subscriber = Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatter);
    tracing::subscriber::set_global_default(subscriber).map_err(|e| {
        ShellError::new(
            ShellErrorType::IOError,
            format!("Failed to install log subscriber: {}", e),
        )
    })?;

    Ok(guard)
}

fn get_log_location(log_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(log_dir)?;
    let timestamp = Utc::now().format("%Y-%m-%d-%H-%M-%S");
    let log_file = log_dir.join(format!("treefs-{}.log", timestamp));
    clean_logfiles(log_dir)?;
    Ok(log_file)
}

/// Deletes logfiles older than thirty days. Returns how many were removed.
pub(crate) fn clean_logfiles(log_dir: &Path) -> Result<usize> {
    let mut removed = 0;
    for file in std::fs::read_dir(log_dir)? {
        let file = file?;
        let metadata = file.metadata()?;
        if !metadata.is_file() {
            continue;
        }
        let modified: chrono::DateTime<Utc> = chrono::DateTime::from(metadata.modified()?);
        let age = Utc::now().signed_duration_since(modified);
        if age.num_days() > MAX_LOG_AGE_DAYS {
            std::fs::remove_file(file.path())?;
            removed += 1;
        }
    }
    Ok(removed)
}
