//! Concurrent producer/reader behavior: no lost updates, no torn reads.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use promwell_core::snapshot::SeriesValue;
use promwell_core::{expo, Registry};

const THREADS: usize = 8;
const INCREMENTS: usize = 10_000;

#[test]
fn concurrent_increments_are_not_lost() {
    let reg = Arc::new(Registry::new());
    let counter = reg
        .register_counter("ops_total", "", &[])
        .unwrap()
        .with_labels(&[])
        .unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let counter = Arc::clone(&counter);
            thread::spawn(move || {
                for _ in 0..INCREMENTS {
                    counter.inc();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(counter.value(), (THREADS * INCREMENTS) as f64);
}

#[test]
fn concurrent_registration_of_same_family_is_safe() {
    let reg = Arc::new(Registry::new());

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let reg = Arc::clone(&reg);
            thread::spawn(move || {
                let fam = reg.register_counter("races_total", "", &["thread"]).unwrap();
                fam.with_labels(&["t"]).unwrap().inc();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let c = reg.counter("races_total").unwrap().with_labels(&["t"]).unwrap();
    assert_eq!(c.value(), THREADS as f64);
}

#[test]
fn histogram_snapshots_stay_cumulative_under_writes() {
    let reg = Arc::new(Registry::new());
    let hist = reg
        .register_histogram("fast_seconds", "", &[], &[1.0])
        .unwrap()
        .with_labels(&[])
        .unwrap();

    let stop = Arc::new(AtomicBool::new(false));
    let writer = {
        let hist = Arc::clone(&hist);
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                hist.observe(0.5);
            }
        })
    };

    // Every captured histogram must be internally cumulative: no finite
    // bucket may exceed the +Inf value, no matter when the snapshot lands.
    for _ in 0..2_000 {
        let snap = reg.snapshot();
        for family in &snap.families {
            for series in &family.series {
                if let SeriesValue::Histogram { buckets, count, .. } = &series.value {
                    for (bound, cumulative) in buckets {
                        assert!(
                            cumulative <= count,
                            "bucket le={bound} has {cumulative} > +Inf {count}"
                        );
                    }
                }
            }
        }
    }
    stop.store(true, Ordering::Relaxed);
    writer.join().unwrap();
}

#[test]
fn snapshots_run_alongside_writers() {
    let reg = Arc::new(Registry::new());
    let hist = reg
        .register_histogram("work_seconds", "", &[], &[0.01, 0.1, 1.0])
        .unwrap()
        .with_labels(&[])
        .unwrap();

    let writer = {
        let hist = Arc::clone(&hist);
        thread::spawn(move || {
            for i in 0..INCREMENTS {
                hist.observe((i % 100) as f64 / 100.0);
            }
        })
    };

    // Render repeatedly while the writer runs; every intermediate snapshot
    // must be internally plausible (count never exceeds what was written).
    for _ in 0..50 {
        let snap = reg.snapshot();
        let _ = expo::render(&snap);
    }
    writer.join().unwrap();

    let final_snap = reg.snapshot();
    let out = expo::render(&final_snap);
    assert!(out.contains(&format!("work_seconds_count {INCREMENTS}")), "got:\n{out}");
}
