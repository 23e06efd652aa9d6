//! Process default collector (sysinfo-backed).
//!
//! Exposes a fixed, documented set of gauges about the current process:
//!
//! - `<prefix>_resident_memory_bytes`
//! - `<prefix>_virtual_memory_bytes`
//! - `<prefix>_cpu_usage_percent`
//! - `<prefix>_start_time_seconds` (unix time, set once)
//! - `<prefix>_uptime_seconds`
//!
//! CPU usage is computed by sysinfo between two refreshes, so the first
//! scrape after startup reports 0.

use std::sync::{Arc, Mutex, PoisonError};

use sysinfo::{Pid, ProcessesToUpdate, System};

use promwell_core::instrument::Gauge;
use promwell_core::{PromwellError, Registry, Result};

use super::Collector;

pub struct ProcessCollector {
    pid: Pid,
    system: Mutex<System>,
    resident_memory: Arc<Gauge>,
    virtual_memory: Arc<Gauge>,
    cpu_usage: Arc<Gauge>,
    uptime: Arc<Gauge>,
}

impl ProcessCollector {
    /// Register the process gauges into `registry` and return the collector.
    pub fn register(registry: &Registry, prefix: &str) -> Result<Self> {
        let resident_memory = registry
            .register_gauge(
                &format!("{prefix}_resident_memory_bytes"),
                "Resident set size of this process in bytes.",
                &[],
            )?
            .with_labels(&[])?;
        let virtual_memory = registry
            .register_gauge(
                &format!("{prefix}_virtual_memory_bytes"),
                "Virtual memory size of this process in bytes.",
                &[],
            )?
            .with_labels(&[])?;
        let cpu_usage = registry
            .register_gauge(
                &format!("{prefix}_cpu_usage_percent"),
                "CPU usage of this process in percent, averaged between scrapes.",
                &[],
            )?
            .with_labels(&[])?;
        let start_time = registry
            .register_gauge(
                &format!("{prefix}_start_time_seconds"),
                "Start time of this process in seconds since the unix epoch.",
                &[],
            )?
            .with_labels(&[])?;
        let uptime = registry
            .register_gauge(
                &format!("{prefix}_uptime_seconds"),
                "Uptime of this process in seconds.",
                &[],
            )?
            .with_labels(&[])?;

        let pid = Pid::from_u32(std::process::id());
        let mut system = System::new();
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

        // Start time never changes; set it once here.
        if let Some(proc_) = system.process(pid) {
            start_time.set(proc_.start_time() as f64);
        }

        Ok(Self {
            pid,
            system: Mutex::new(system),
            resident_memory,
            virtual_memory,
            cpu_usage,
            uptime,
        })
    }
}

impl Collector for ProcessCollector {
    fn name(&self) -> &'static str {
        "process"
    }

    fn collect(&self) -> Result<()> {
        let mut system = self.system.lock().unwrap_or_else(PoisonError::into_inner);
        system.refresh_processes(ProcessesToUpdate::Some(&[self.pid]), true);
        let proc_ = system
            .process(self.pid)
            .ok_or_else(|| PromwellError::Internal("own process not visible".into()))?;

        self.resident_memory.set(proc_.memory() as f64);
        self.virtual_memory.set(proc_.virtual_memory() as f64);
        self.cpu_usage.set(f64::from(proc_.cpu_usage()));
        self.uptime.set(proc_.run_time() as f64);
        Ok(())
    }
}
