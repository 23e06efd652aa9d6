//! Shared application state for the promwell gateway.
//!
//! The registry is constructed explicitly here and owned by the state — no
//! process-global singleton — and the enumerated default collectors are
//! registered before any traffic is served. Startup errors are explicit
//! (`Result` instead of panic).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bytes::Bytes;

use promwell_core::{expo, Registry, Result};

use crate::collectors::{Collector, ProcessCollector};
use crate::config::GatewayConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    registry: Registry,
    collectors: Vec<Box<dyn Collector>>,
    draining: AtomicBool,
}

impl AppState {
    /// Build application state: fresh registry plus the configured default
    /// collectors, registered before serving traffic.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let registry = Registry::new();

        let mut collectors: Vec<Box<dyn Collector>> = Vec::new();
        if cfg.collectors.process {
            let process = ProcessCollector::register(&registry, &cfg.collectors.prefix)?;
            collectors.push(Box::new(process));
        }

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                collectors,
                draining: AtomicBool::new(false),
            }),
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    /// The registry; application code registers its own instruments here.
    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    /// Mark draining state (readiness flips to 503).
    pub fn set_draining(&self) {
        self.inner.draining.store(true, Ordering::Relaxed);
    }

    pub fn is_draining(&self) -> bool {
        self.inner.draining.load(Ordering::Relaxed)
    }

    /// Refresh collectors, snapshot, and render — the one inbound operation
    /// the HTTP layer consumes. A failing collector is logged and skipped so
    /// the scrape itself never fails.
    pub fn render_metrics(&self) -> (&'static str, Bytes) {
        for collector in &self.inner.collectors {
            if let Err(e) = collector.collect() {
                tracing::warn!(collector = collector.name(), error = %e, "collector refresh failed");
            }
        }
        let body = expo::render(&self.inner.registry.snapshot());
        (expo::TEXT_CONTENT_TYPE, Bytes::from(body))
    }
}
