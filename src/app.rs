use std::{sync::Arc, time::Instant};

use chrono::{DateTime, Local};

use crate::sample::Sample;
use crate::sink::RollingSink;

// Main application state, rebuilt from the sink on every redraw
pub struct App {
    pub sink: Arc<RollingSink>,
    pub points: Vec<(f64, f64)>,
    pub latest: Option<Sample>,
    pub window_min: f64,
    pub window_max: f64,
    pub window_mean: f64,
    pub published: u64,
    pub evicted: u64,
    pub peak_record: (f64, DateTime<Local>),
    pub last_tick: Instant,
}

impl App {
    pub fn new(sink: Arc<RollingSink>) -> App {
        App {
            points: Vec::with_capacity(sink.capacity()),
            sink,
            latest: None,
            window_min: 0.0,
            window_max: 0.0,
            window_mean: 0.0,
            published: 0,
            evicted: 0,
            peak_record: (0.0, Local::now()),
            last_tick: Instant::now(),
        }
    }

    pub fn on_tick(&mut self) {
        let snapshot = self.sink.snapshot();

        self.points = snapshot.samples.iter().map(|s| (s.timestamp, s.value)).collect();
        self.latest = snapshot.samples.last().copied();
        self.published = snapshot.published;
        self.evicted = snapshot.evicted;

        if snapshot.samples.is_empty() {
            self.window_min = 0.0;
            self.window_max = 0.0;
            self.window_mean = 0.0;
            return;
        }

        let values = snapshot.samples.iter().map(|s| s.value);
        self.window_min = values.clone().fold(f64::INFINITY, f64::min);
        self.window_max = values.clone().fold(f64::NEG_INFINITY, f64::max);
        self.window_mean = values.sum::<f64>() / snapshot.samples.len() as f64;

        // Peak over the whole run, checked against every sample that landed
        // since the previous redraw
        let highest = snapshot
            .samples
            .iter()
            .copied()
            .reduce(|best, s| if s.value > best.value { s } else { best });
        if let Some(highest) = highest {
            if highest.value > self.peak_record.0 {
                self.peak_record = (highest.value, highest.local_time());
            }
        }
    }

    /// Time range covered by the retained samples, widened to at least one
    /// second so the chart never gets a degenerate axis.
    pub fn x_bounds(&self) -> [f64; 2] {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if last.0 - first.0 >= 1.0 => [first.0, last.0],
            (Some(first), _) => [first.0, first.0 + 1.0],
            _ => [0.0, 1.0],
        }
    }
}
