//! Cumulative histogram.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::{PromwellError, Result};

use super::value::AtomicF64;

/// Default bucket boundaries (seconds-oriented, matching the conventional
/// default set of scraping client libraries).
pub const DEFAULT_BUCKETS: [f64; 11] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Check that boundaries are non-empty, finite, and strictly increasing.
pub fn validate_buckets(bounds: &[f64]) -> Result<()> {
    if bounds.is_empty() {
        return Err(PromwellError::InvalidBuckets(
            "bucket boundaries must not be empty".into(),
        ));
    }
    for pair in bounds.windows(2) {
        if !(pair[0] < pair[1]) {
            return Err(PromwellError::InvalidBuckets(format!(
                "boundaries must be strictly increasing, got {} then {}",
                pair[0], pair[1]
            )));
        }
    }
    if bounds.iter().any(|b| !b.is_finite()) {
        return Err(PromwellError::InvalidBuckets(
            "boundaries must be finite (+Inf is implicit)".into(),
        ));
    }
    Ok(())
}

/// Histogram with fixed finite boundaries plus an implicit `+Inf` bucket.
///
/// Bucket counts are cumulative: `observe(v)` increments every bucket whose
/// upper bound is >= v, and the total count doubles as the `+Inf` bucket.
///
/// Cumulativity must hold inside every snapshot: `observe` bumps `count`
/// before the finite buckets (Release), and readers load buckets (Acquire)
/// before `count`, so a concurrent snapshot never sees a finite bucket above
/// the `+Inf` value.
#[derive(Debug)]
pub struct Histogram {
    bounds: Arc<[f64]>,
    buckets: Vec<AtomicU64>,
    sum: AtomicF64,
    count: AtomicU64,
}

impl Histogram {
    /// Build with validated boundaries. Boundaries are shared by all series
    /// of one family, hence the `Arc`.
    pub(crate) fn new(bounds: Arc<[f64]>) -> Self {
        let buckets = bounds.iter().map(|_| AtomicU64::new(0)).collect();
        Self {
            bounds,
            buckets,
            sum: AtomicF64::default(),
            count: AtomicU64::new(0),
        }
    }

    /// Record one observation.
    pub fn observe(&self, v: f64) {
        self.sum.add(v);
        // Count first: the Release bucket increment publishes it, so any
        // reader that Acquire-loads a bucket also sees the matching count.
        self.count.fetch_add(1, Ordering::Relaxed);
        for (bucket, bound) in self.buckets.iter().zip(self.bounds.iter()) {
            if v <= *bound {
                bucket.fetch_add(1, Ordering::Release);
            }
        }
    }

    /// Bucket boundaries (finite part).
    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    /// Cumulative per-bucket counts aligned with `bounds()`. Load buckets
    /// before `count()` when building a snapshot.
    pub fn bucket_counts(&self) -> Vec<u64> {
        self.buckets
            .iter()
            .map(|c| c.load(Ordering::Acquire))
            .collect()
    }

    /// Sum of all observed values.
    pub fn sum(&self) -> f64 {
        self.sum.get()
    }

    /// Total observation count; also the `+Inf` bucket value.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}
