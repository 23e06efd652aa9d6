//! Default collectors registered into the registry at startup.
//!
//! Collectors are pull-based: the scrape path calls [`Collector::collect`]
//! right before taking a snapshot, so there are no background timers and an
//! idle process does no collection work.

pub mod process;

use promwell_core::Result;

pub use process::ProcessCollector;

/// A source of gauge values refreshed on each scrape.
pub trait Collector: Send + Sync {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    /// Refresh the collector's gauges from live state.
    fn collect(&self) -> Result<()>;
}
