use std::time::Duration;

use crate::constants::{DEFAULT_CAPACITY, PRODUCER_PERIOD_MS, REDRAW_RATE_MS};
use crate::error::{FeedError, Result};

/// Runtime knobs for the feed: how much history to keep and how often
/// samples are produced and the chart is redrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedConfig {
    pub capacity: usize,
    pub period: Duration,
    pub redraw: Duration,
    pub seed: Option<u64>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            period: Duration::from_millis(PRODUCER_PERIOD_MS),
            redraw: Duration::from_millis(REDRAW_RATE_MS),
            seed: None,
        }
    }
}

impl FeedConfig {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(FeedError::InvalidCapacity(self.capacity));
        }
        if self.period.is_zero() {
            return Err(FeedError::InvalidPeriod("producer"));
        }
        if self.redraw.is_zero() {
            return Err(FeedError::InvalidPeriod("redraw"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_streaming_cadence() {
        let config = FeedConfig::default();
        assert_eq!(config.capacity, 200);
        assert_eq!(config.period, Duration::from_secs(1));
        assert_eq!(config.redraw, Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_capacity_and_periods() {
        let config = FeedConfig { capacity: 0, ..FeedConfig::default() };
        assert!(matches!(config.validate(), Err(FeedError::InvalidCapacity(0))));

        let config = FeedConfig { period: Duration::ZERO, ..FeedConfig::default() };
        assert!(matches!(config.validate(), Err(FeedError::InvalidPeriod("producer"))));

        let config = FeedConfig { redraw: Duration::ZERO, ..FeedConfig::default() };
        assert!(matches!(config.validate(), Err(FeedError::InvalidPeriod("redraw"))));
    }
}
