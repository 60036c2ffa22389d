use chrono::{DateTime, Local};

// Format function: fixed precision for values on the unit interval
pub fn format_value(value: f64) -> String {
    format!("{:.3}", value)
}

pub fn format_clock(time: &DateTime<Local>) -> String {
    time.format("%H:%M:%S").to_string()
}

// Large counters get a k/M suffix so the side panel stays narrow
pub fn format_count(count: u64) -> String {
    const K: u64 = 1000;
    const M: u64 = 1000 * K;
    if count >= M {
        format!("{:.2}M", count as f64 / M as f64)
    } else if count >= K {
        format!("{:.1}k", count as f64 / K as f64)
    } else {
        format!("{}", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_pick_a_suffix() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_500), "1.5k");
        assert_eq!(format_count(2_500_000), "2.50M");
    }

    #[test]
    fn values_use_three_decimals() {
        assert_eq!(format_value(0.5), "0.500");
        assert_eq!(format_value(0.12345), "0.123");
    }
}
