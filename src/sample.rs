use std::time::Instant;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped scalar observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
    /// Value in `[0, 1)` when produced by the default source.
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp: f64, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Timestamp as local wall-clock time, falling back to the epoch for
    /// values chrono cannot represent.
    pub fn local_time(&self) -> DateTime<Local> {
        to_local(self.timestamp)
    }
}

/// Converts epoch seconds to local time.
pub fn to_local(timestamp: f64) -> DateTime<Local> {
    let secs = timestamp.floor();
    let nanos = ((timestamp - secs) * 1e9) as u32;
    Utc.timestamp_opt(secs as i64, nanos)
        .single()
        .unwrap_or_default()
        .with_timezone(&Local)
}

/// Wall-clock anchored monotonic clock.
///
/// Readings never go backwards even if the system clock is adjusted while
/// the producer runs.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    anchor_secs: f64,
    anchor: Instant,
}

impl Clock {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            anchor_secs: now.timestamp_micros() as f64 / 1e6,
            anchor: Instant::now(),
        }
    }

    pub fn now(&self) -> f64 {
        self.anchor_secs + self.anchor.elapsed().as_secs_f64()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_non_decreasing() {
        let clock = Clock::new();
        let mut last = clock.now();
        for _ in 0..1000 {
            let next = clock.now();
            assert!(next >= last);
            last = next;
        }
    }

    #[test]
    fn clock_starts_near_wall_time() {
        let clock = Clock::new();
        let wall = Utc::now().timestamp() as f64;
        assert!((clock.now() - wall).abs() < 5.0);
    }

    #[test]
    fn sample_serializes_as_flat_object() {
        let json = serde_json::to_value(Sample::new(1.5, 0.25)).unwrap();
        assert_eq!(json, serde_json::json!({ "timestamp": 1.5, "value": 0.25 }));
    }

    #[test]
    fn local_time_keeps_whole_seconds() {
        let sample = Sample::new(1_700_000_000.75, 0.0);
        assert_eq!(sample.local_time().timestamp(), 1_700_000_000);
    }
}
