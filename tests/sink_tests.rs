use std::sync::Arc;
use std::thread;

use live_feed::{RollingSink, Sample, SampleSink};
use proptest::prelude::*;

#[test]
fn test_capacity_three_keeps_last_three() {
    let sink = RollingSink::new(3).unwrap();
    for (i, v) in [0.1, 0.2, 0.3, 0.4, 0.5].into_iter().enumerate() {
        sink.publish(Sample::new(i as f64, v));
    }
    let values: Vec<f64> = sink.samples().iter().map(|s| s.value).collect();
    assert_eq!(values, vec![0.3, 0.4, 0.5]);
}

#[test]
fn test_default_capacity_rolls_at_200() {
    let sink = RollingSink::new(200).unwrap();
    for i in 0..250 {
        sink.publish(Sample::new(f64::from(i), 0.5));
    }
    let samples = sink.samples();
    assert_eq!(samples.len(), 200);
    assert_eq!(samples[0].timestamp, 50.0);
    assert_eq!(samples[199].timestamp, 249.0);
}

#[test]
fn test_concurrent_publishers_stay_bounded() {
    let sink = Arc::new(RollingSink::new(64).unwrap());
    let writers: Vec<_> = (0..4)
        .map(|w| {
            let sink = Arc::clone(&sink);
            thread::spawn(move || {
                for i in 0..1000 {
                    sink.publish(Sample::new(f64::from(w * 1000 + i), 0.5));
                }
            })
        })
        .collect();

    let reader = {
        let sink = Arc::clone(&sink);
        thread::spawn(move || {
            for _ in 0..1000 {
                let snap = sink.snapshot();
                assert!(snap.samples.len() <= 64);
                assert_eq!(snap.published - snap.evicted, snap.samples.len() as u64);
            }
        })
    };

    for w in writers {
        w.join().unwrap();
    }
    reader.join().unwrap();

    let snap = sink.snapshot();
    assert_eq!(snap.samples.len(), 64);
    assert_eq!(snap.published, 4000);
    assert_eq!(snap.evicted, 4000 - 64);
}

proptest! {
    #[test]
    fn prop_length_is_min_of_ticks_and_capacity(capacity in 1usize..50, ticks in 0usize..200) {
        let sink = RollingSink::new(capacity).unwrap();
        for i in 0..ticks {
            sink.publish(Sample::new(i as f64, 0.0));
        }
        prop_assert_eq!(sink.len(), ticks.min(capacity));
    }

    #[test]
    fn prop_eviction_is_fifo(capacity in 1usize..50, ticks in 1usize..200) {
        let sink = RollingSink::new(capacity).unwrap();
        for i in 0..ticks {
            sink.publish(Sample::new(i as f64, 0.0));
        }
        let samples = sink.samples();
        let evicted = ticks.saturating_sub(capacity);
        // Everything older than the first retained sample was dropped
        prop_assert_eq!(samples[0].timestamp, evicted as f64);
        prop_assert!(samples.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }
}
