//! Metric instruments (Counter / Gauge / Histogram).
//!
//! All instruments store their values in lock-free atomic cells so producers
//! never contend on a mutex and a snapshot never tears a single cell. The
//! only fallible mutation is a counter increment with a negative delta, which
//! is rejected without changing the stored value.

mod counter;
mod gauge;
mod histogram;
pub(crate) mod value;

pub use counter::Counter;
pub use gauge::Gauge;
pub use histogram::{validate_buckets, Histogram, DEFAULT_BUCKETS};
