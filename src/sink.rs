//! Bounded rolling store of samples shared between the producer and the
//! chart.

use std::collections::VecDeque;

use parking_lot::Mutex;
use tracing::debug;

use crate::error::{FeedError, Result};
use crate::sample::Sample;

/// Anything the producer can hand samples to.
pub trait SampleSink: Send + Sync {
    fn publish(&self, sample: Sample);
}

struct SinkState {
    samples: VecDeque<Sample>,
    published: u64,
    evicted: u64,
}

/// Point-in-time copy of a [`RollingSink`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SinkSnapshot {
    pub samples: Vec<Sample>,
    pub published: u64,
    pub evicted: u64,
}

/// FIFO buffer that never holds more than `capacity` samples.
///
/// Push, eviction and the counters are updated under one lock, so readers
/// never observe the buffer above capacity.
pub struct RollingSink {
    capacity: usize,
    state: Mutex<SinkState>,
}

impl RollingSink {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(FeedError::InvalidCapacity(capacity));
        }
        debug!(capacity, "rolling sink created");
        Ok(Self {
            capacity,
            state: Mutex::new(SinkState {
                samples: VecDeque::with_capacity(capacity),
                published: 0,
                evicted: 0,
            }),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.state.lock().samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().samples.is_empty()
    }

    pub fn latest(&self) -> Option<Sample> {
        self.state.lock().samples.back().copied()
    }

    /// Retained samples, oldest first.
    pub fn samples(&self) -> Vec<Sample> {
        self.state.lock().samples.iter().copied().collect()
    }

    pub fn snapshot(&self) -> SinkSnapshot {
        let state = self.state.lock();
        SinkSnapshot {
            samples: state.samples.iter().copied().collect(),
            published: state.published,
            evicted: state.evicted,
        }
    }
}

impl SampleSink for RollingSink {
    fn publish(&self, sample: Sample) {
        let mut state = self.state.lock();
        state.samples.push_back(sample);
        state.published += 1;
        if state.samples.len() > self.capacity && state.samples.pop_front().is_some() {
            state.evicted += 1;
        }
    }
}
