pub const DEFAULT_CAPACITY: usize = 200;
pub const PRODUCER_PERIOD_MS: u64 = 1000;
pub const REDRAW_RATE_MS: u64 = 100;

pub const CHART_TITLE: &str = " Real-time Data Streaming ";
pub const PRODUCER_THREAD_NAME: &str = "live-feed-producer";
