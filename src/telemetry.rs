use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::{FeedError, Result};

/// Where log lines go. The chart owns the terminal, so it can only log to a
/// file; the other modes keep stdout for data and log to stderr.
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Disabled,
}

fn filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy()
}

pub fn init(target: LogTarget<'_>) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(filter());
    let installed = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|err| FeedError::Logging(format!("{}: {}", path.display(), err)))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        LogTarget::Disabled => return Ok(()),
    };
    installed.map_err(|err| FeedError::Logging(err.to_string()))
}
