//! Live-updating chart fed by a background sample producer.
//!
//! A [`producer::Producer`] generates one timestamped value per period and
//! publishes it into a bounded [`sink::RollingSink`]; the terminal chart in
//! [`ui`] redraws whatever the sink holds on its own cadence. The
//! [`fixture`] module is unrelated example input for rustfmt and clippy.

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod fixture;
pub mod producer;
pub mod sample;
pub mod sink;
pub mod stream;
pub mod telemetry;
pub mod ui;
pub mod util;

pub use config::FeedConfig;
pub use error::{FeedError, Result};
pub use producer::{Producer, ProducerHandle, StopSignal, UniformSource, ValueSource};
pub use sample::Sample;
pub use sink::{RollingSink, SampleSink, SinkSnapshot};
