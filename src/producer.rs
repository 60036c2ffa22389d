//! Periodic sample generator running on its own thread.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{error, info, trace};

use crate::constants::PRODUCER_THREAD_NAME;
use crate::error::{FeedError, Result};
use crate::sample::{Clock, Sample};
use crate::sink::SampleSink;

/// Supplies the scalar part of each sample.
pub trait ValueSource: Send {
    fn next_value(&mut self) -> f64;
}

impl<F> ValueSource for F
where
    F: FnMut() -> f64 + Send,
{
    fn next_value(&mut self) -> f64 {
        self()
    }
}

/// Uniform values in `[0, 1)`.
pub struct UniformSource {
    rng: StdRng,
}

impl UniformSource {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl ValueSource for UniformSource {
    fn next_value(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

struct StopState {
    stopped: Mutex<bool>,
    wake: Condvar,
}

/// Cloneable cancellation flag for the producer loop.
///
/// The loop holds the flag's lock while it ticks, so once [`StopSignal::stop`]
/// returns no further tick can start or be in flight.
#[derive(Clone)]
pub struct StopSignal {
    inner: Arc<StopState>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StopState {
                stopped: Mutex::new(false),
                wake: Condvar::new(),
            }),
        }
    }

    pub fn stop(&self) {
        let mut stopped = self.inner.stopped.lock();
        *stopped = true;
        self.inner.wake.notify_all();
    }

    pub fn is_stopped(&self) -> bool {
        *self.inner.stopped.lock()
    }

    /// Calls `f` once per `period` until stopped. Returns the call count.
    fn every(&self, period: Duration, mut f: impl FnMut()) -> u64 {
        let mut calls = 0;
        let mut stopped = self.inner.stopped.lock();
        loop {
            // A period too long to represent as an Instant waits for stop only.
            let deadline = Instant::now().checked_add(period);
            while !*stopped {
                match deadline {
                    Some(deadline) => {
                        if self.inner.wake.wait_until(&mut stopped, deadline).timed_out() {
                            break;
                        }
                    }
                    None => self.inner.wake.wait(&mut stopped),
                }
            }
            if *stopped {
                return calls;
            }
            f();
            calls += 1;
        }
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Producer<S: ?Sized, V> {
    sink: Arc<S>,
    source: V,
    clock: Clock,
    stop: StopSignal,
}

impl<S, V> Producer<S, V>
where
    S: SampleSink + ?Sized,
    V: ValueSource,
{
    pub fn new(sink: Arc<S>, source: V) -> Self {
        Self {
            sink,
            source,
            clock: Clock::new(),
            stop: StopSignal::new(),
        }
    }

    /// Replaces the producer's stop signal with one owned by the caller.
    pub fn with_stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Generates one sample and publishes it.
    pub fn tick(&mut self) -> Sample {
        let sample = Sample::new(self.clock.now(), self.source.next_value());
        self.sink.publish(sample);
        trace!(timestamp = sample.timestamp, value = sample.value, "sample published");
        sample
    }

    /// Sleeps `period`, ticks, and repeats until the stop signal fires.
    pub fn run_forever(&mut self, period: Duration) -> Result<u64> {
        if period.is_zero() {
            return Err(FeedError::InvalidPeriod("producer"));
        }
        info!(period_ms = period.as_millis() as u64, "producer started");
        let stop = self.stop.clone();
        let ticks = stop.every(period, || {
            self.tick();
        });
        info!(ticks, "producer stopped");
        Ok(ticks)
    }
}

impl<S, V> Producer<S, V>
where
    S: SampleSink + ?Sized + 'static,
    V: ValueSource + 'static,
{
    /// Runs [`Producer::run_forever`] on a dedicated thread.
    pub fn spawn(mut self, period: Duration) -> Result<ProducerHandle> {
        if period.is_zero() {
            return Err(FeedError::InvalidPeriod("producer"));
        }
        let stop = self.stop_signal();
        let thread = thread::Builder::new()
            .name(PRODUCER_THREAD_NAME.to_string())
            .spawn(move || self.run_forever(period))
            .map_err(FeedError::ThreadSpawn)?;
        Ok(ProducerHandle {
            stop,
            thread: Some(thread),
        })
    }
}

/// Owner of a running producer thread. Dropping it stops the producer.
pub struct ProducerHandle {
    stop: StopSignal,
    thread: Option<JoinHandle<Result<u64>>>,
}

impl ProducerHandle {
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Stops the producer and waits for it, returning the tick count.
    pub fn join(mut self) -> Result<u64> {
        self.stop.stop();
        match self.thread.take() {
            Some(thread) => thread.join().unwrap_or_else(|_| {
                error!("producer thread panicked");
                Err(FeedError::ProducerPanicked)
            }),
            None => Ok(0),
        }
    }
}

impl Drop for ProducerHandle {
    fn drop(&mut self) {
        self.stop.stop();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("producer thread panicked");
            }
        }
    }
}
