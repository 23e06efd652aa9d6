//! promwell gateway library entry.
//!
//! This crate wraps the core registry with everything a scrape target needs
//! in production: YAML config, process default collectors, and the HTTP
//! surface (`/metrics`, `/healthz`, `/readyz`). It is intended to be consumed
//! by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod collectors;
pub mod config;
pub mod ops;
pub mod router;
