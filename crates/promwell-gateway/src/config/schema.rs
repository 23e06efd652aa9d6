use promwell_core::error::{PromwellError, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub collectors: CollectorsSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PromwellError::InvalidConfig(format!(
                "unsupported config version {}",
                self.version
            )));
        }
        self.gateway.validate()?;
        self.collectors.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,

    #[serde(default = "default_shutdown_grace_ms")]
    pub shutdown_grace_ms: u64,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            metrics_path: default_metrics_path(),
            shutdown_grace_ms: default_shutdown_grace_ms(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        if !self.metrics_path.starts_with('/') || self.metrics_path.len() < 2 {
            return Err(PromwellError::InvalidConfig(
                "gateway.metrics_path must start with '/' and not be bare".into(),
            ));
        }
        if self.shutdown_grace_ms > 60_000 {
            return Err(PromwellError::InvalidConfig(
                "gateway.shutdown_grace_ms must be at most 60000".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:9100".into()
}
fn default_metrics_path() -> String {
    "/metrics".into()
}
fn default_shutdown_grace_ms() -> u64 {
    5000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectorsSection {
    /// Register the process default collector at startup.
    #[serde(default = "default_process_enabled")]
    pub process: bool,

    /// Metric name prefix for process collectors.
    #[serde(default = "default_process_prefix")]
    pub prefix: String,
}

impl Default for CollectorsSection {
    fn default() -> Self {
        Self {
            process: default_process_enabled(),
            prefix: default_process_prefix(),
        }
    }
}

impl CollectorsSection {
    pub fn validate(&self) -> Result<()> {
        // Gauge names are formed as `<prefix>_...`, so the prefix itself must
        // satisfy the metric-name charset. Caught here, not at registration.
        if !promwell_core::registry::is_valid_metric_name(&self.prefix) {
            return Err(PromwellError::InvalidConfig(format!(
                "collectors.prefix must be a valid metric-name prefix, got {:?}",
                self.prefix
            )));
        }
        Ok(())
    }
}

fn default_process_enabled() -> bool {
    true
}
fn default_process_prefix() -> String {
    "process".into()
}
