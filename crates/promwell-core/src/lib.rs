//! promwell core: metric instruments, registry, snapshots, and the text
//! exposition formatter.
//!
//! This crate holds the transport-agnostic heart of promwell: concurrent-safe
//! counters, gauges, and histograms registered under unique `(name, labels)`
//! identities, point-in-time snapshots of their values, and a deterministic
//! text renderer suitable for scraping. It carries no HTTP or runtime
//! dependencies so it can be embedded into any server.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `PromwellError`/`Result` so the scrape
//! path of a production process never crashes on bad registrations.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod expo;
pub mod instrument;
pub mod registry;
pub mod snapshot;

/// Shared result type.
pub use error::{PromwellError, Result};
pub use registry::{MetricKind, Registry};
pub use snapshot::Snapshot;
