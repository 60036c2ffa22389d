//! Headless mode: samples are kept in the rolling sink and also written to
//! an output as JSON lines.

use std::io::Write;
use std::sync::{mpsc, Arc};

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::config::FeedConfig;
use crate::error::Result;
use crate::producer::{Producer, StopSignal, UniformSource};
use crate::sample::Sample;
use crate::sink::{RollingSink, SampleSink};

/// Forwards every sample to the rolling sink and to a channel.
pub struct TeeSink {
    inner: Arc<RollingSink>,
    tx: Mutex<mpsc::Sender<Sample>>,
}

impl TeeSink {
    pub fn new(inner: Arc<RollingSink>, tx: mpsc::Sender<Sample>) -> Self {
        Self {
            inner,
            tx: Mutex::new(tx),
        }
    }
}

impl SampleSink for TeeSink {
    fn publish(&self, sample: Sample) {
        self.inner.publish(sample);
        if self.tx.lock().send(sample).is_err() {
            debug!("stream receiver gone, sample kept in sink only");
        }
    }
}

/// Stop signal fired by Ctrl-C. Can only be installed once per process.
pub fn interrupt_signal() -> Result<StopSignal> {
    let stop = StopSignal::new();
    let on_interrupt = stop.clone();
    ctrlc::set_handler(move || {
        info!("interrupt received, stopping producer");
        on_interrupt.stop();
    })?;
    Ok(stop)
}

/// Runs the producer until `limit` samples were written or `stop` fires.
/// Returns the number of samples written to `out`.
pub fn run<W: Write>(
    config: &FeedConfig,
    limit: Option<u64>,
    stop: StopSignal,
    mut out: W,
) -> Result<u64> {
    config.validate()?;
    let sink = Arc::new(RollingSink::new(config.capacity)?);
    let (tx, rx) = mpsc::channel();
    let tee = Arc::new(TeeSink::new(Arc::clone(&sink), tx));

    if limit == Some(0) {
        return Ok(0);
    }

    let handle = Producer::new(tee, UniformSource::new(config.seed))
        .with_stop_signal(stop.clone())
        .spawn(config.period)?;

    let mut written = 0u64;
    // The sender lives inside the producer, so this ends once it stops.
    while let Ok(sample) = rx.recv() {
        serde_json::to_writer(&mut out, &sample)?;
        writeln!(out)?;
        out.flush()?;
        written += 1;
        if limit.is_some_and(|limit| written >= limit) {
            stop.stop();
            break;
        }
    }

    let ticks = handle.join()?;
    info!(written, ticks, retained = sink.len(), "stream finished");
    Ok(written)
}
