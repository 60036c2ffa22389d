//! Error type shared by the sink, the producer and the front ends.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The rolling sink must retain at least one sample.
    #[error("sink capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    /// A cadence of zero would spin without sleeping.
    #[error("{0} period must be greater than zero")]
    InvalidPeriod(&'static str),

    #[error("failed to start producer thread: {0}")]
    ThreadSpawn(#[source] io::Error),

    #[error("producer thread panicked")]
    ProducerPanicked,

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to install signal handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("failed to encode sample: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, FeedError>;
