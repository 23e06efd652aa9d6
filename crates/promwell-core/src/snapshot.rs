//! Immutable point-in-time copies of registry state.
//!
//! A snapshot is plain data: once built it cannot fail to render, and two
//! renders of the same snapshot are byte-identical. Families arrive sorted by
//! name and series sorted by their serialized label pairs, so ordering is
//! fixed at snapshot time rather than in the formatter.

use crate::registry::MetricKind;

/// Point-in-time copy of every registered instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub families: Vec<FamilySnapshot>,
}

/// One metric family: shared name/help/kind plus its child series.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilySnapshot {
    pub name: String,
    pub help: String,
    pub kind: MetricKind,
    pub series: Vec<SeriesSnapshot>,
}

/// One `(name, label-set)` instrument value.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSnapshot {
    /// Label pairs in declaration order of the family's label names.
    pub labels: Vec<(String, String)>,
    pub value: SeriesValue,
}

/// Captured value of a single series.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesValue {
    Counter(f64),
    Gauge(f64),
    Histogram {
        /// `(upper_bound, cumulative_count)` for each finite bucket.
        buckets: Vec<(f64, u64)>,
        sum: f64,
        /// Total observations; also the implicit `+Inf` bucket.
        count: u64,
    },
}
