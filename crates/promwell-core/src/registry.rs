//! Metric registry: family index + per-family child series.
//!
//! A *family* is `(name, help, label names, kind)`; each distinct label-value
//! vector materializes a child instrument on first use. Uniqueness of
//! `(name, label-set)` identities falls out of family-name uniqueness plus
//! the per-family child map.
//!
//! Locking is deliberately fine-grained: the family index is a sharded
//! `DashMap` whose per-key entry lock covers only the lookup-or-insert step
//! of registration, and child maps are sharded again, so one slow snapshot
//! reader cannot stall producers and producers never serialize globally.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::{PromwellError, Result};
use crate::instrument::{validate_buckets, Counter, Gauge, Histogram};
use crate::snapshot::{FamilySnapshot, SeriesSnapshot, SeriesValue, Snapshot};

/// Instrument kind of a metric family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
    Histogram,
}

impl MetricKind {
    /// Name used in `# TYPE` exposition lines.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
        }
    }
}

/// Whether `s` is acceptable as a metric name or metric-name prefix:
/// letters, digits, underscore, not starting with a digit.
pub fn is_valid_metric_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn validate_metric_name(name: &str) -> Result<()> {
    if !is_valid_metric_name(name) {
        return Err(PromwellError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn validate_label_names(kind: MetricKind, label_names: &[&str]) -> Result<()> {
    for l in label_names {
        if !is_valid_metric_name(l) || l.starts_with("__") {
            return Err(PromwellError::InvalidName((*l).to_string()));
        }
        // `le` is generated for histogram bucket lines.
        if kind == MetricKind::Histogram && *l == "le" {
            return Err(PromwellError::InvalidName((*l).to_string()));
        }
    }
    Ok(())
}

struct FamilyDesc {
    name: String,
    help: String,
    label_names: Vec<String>,
}

enum Children {
    Counter(DashMap<Vec<String>, Arc<Counter>>),
    Gauge(DashMap<Vec<String>, Arc<Gauge>>),
    Histogram {
        bounds: Arc<[f64]>,
        series: DashMap<Vec<String>, Arc<Histogram>>,
    },
}

struct Family {
    desc: FamilyDesc,
    children: Children,
}

impl std::fmt::Debug for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Family")
            .field("name", &self.desc.name)
            .field("kind", &self.kind())
            .field("label_names", &self.desc.label_names)
            .finish()
    }
}

impl Family {
    fn kind(&self) -> MetricKind {
        match self.children {
            Children::Counter(_) => MetricKind::Counter,
            Children::Gauge(_) => MetricKind::Gauge,
            Children::Histogram { .. } => MetricKind::Histogram,
        }
    }

    /// Re-registration is idempotent only for an identical shape.
    fn check_compat(
        &self,
        kind: MetricKind,
        label_names: &[&str],
        bounds: Option<&[f64]>,
    ) -> Result<()> {
        if self.kind() != kind {
            return Err(PromwellError::DuplicateMetric(format!(
                "{} already registered as {}",
                self.desc.name,
                self.kind().as_str()
            )));
        }
        if self.desc.label_names.len() != label_names.len()
            || !self
                .desc
                .label_names
                .iter()
                .zip(label_names)
                .all(|(a, b)| a == b)
        {
            return Err(PromwellError::DuplicateMetric(format!(
                "{} already registered with different label names",
                self.desc.name
            )));
        }
        if let (Children::Histogram { bounds: have, .. }, Some(want)) = (&self.children, bounds) {
            if have.as_ref() != want {
                return Err(PromwellError::DuplicateMetric(format!(
                    "{} already registered with different buckets",
                    self.desc.name
                )));
            }
        }
        Ok(())
    }

    fn label_key(&self, values: &[&str]) -> Result<Vec<String>> {
        if values.len() != self.desc.label_names.len() {
            return Err(PromwellError::LabelMismatch {
                name: self.desc.name.clone(),
                expected: self.desc.label_names.len(),
                got: values.len(),
            });
        }
        Ok(values.iter().map(|v| (*v).to_string()).collect())
    }
}

/// Handle to a counter family; cheap to clone.
#[derive(Clone, Debug)]
pub struct CounterFamily {
    family: Arc<Family>,
}

impl CounterFamily {
    /// Child counter for one label-value vector (created on first use).
    pub fn with_labels(&self, values: &[&str]) -> Result<Arc<Counter>> {
        let key = self.family.label_key(values)?;
        match &self.family.children {
            Children::Counter(series) => Ok(Arc::clone(
                series.entry(key).or_insert_with(|| Arc::new(Counter::new())).value(),
            )),
            _ => Err(PromwellError::Internal(
                "counter handle over non-counter family".into(),
            )),
        }
    }
}

/// Handle to a gauge family; cheap to clone.
#[derive(Clone, Debug)]
pub struct GaugeFamily {
    family: Arc<Family>,
}

impl GaugeFamily {
    /// Child gauge for one label-value vector (created on first use).
    pub fn with_labels(&self, values: &[&str]) -> Result<Arc<Gauge>> {
        let key = self.family.label_key(values)?;
        match &self.family.children {
            Children::Gauge(series) => Ok(Arc::clone(
                series.entry(key).or_insert_with(|| Arc::new(Gauge::new())).value(),
            )),
            _ => Err(PromwellError::Internal(
                "gauge handle over non-gauge family".into(),
            )),
        }
    }
}

/// Handle to a histogram family; cheap to clone.
#[derive(Clone, Debug)]
pub struct HistogramFamily {
    family: Arc<Family>,
}

impl HistogramFamily {
    /// Child histogram for one label-value vector (created on first use).
    pub fn with_labels(&self, values: &[&str]) -> Result<Arc<Histogram>> {
        let key = self.family.label_key(values)?;
        match &self.family.children {
            Children::Histogram { bounds, series } => Ok(Arc::clone(
                series
                    .entry(key)
                    .or_insert_with(|| Arc::new(Histogram::new(Arc::clone(bounds))))
                    .value(),
            )),
            _ => Err(PromwellError::Internal(
                "histogram handle over non-histogram family".into(),
            )),
        }
    }
}

/// Owner of all metric families. One instance per process, constructed
/// explicitly and handed to the serving layer (no global singleton).
#[derive(Default)]
pub struct Registry {
    families: DashMap<String, Arc<Family>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(
        &self,
        kind: MetricKind,
        name: &str,
        help: &str,
        label_names: &[&str],
        bounds: Option<&[f64]>,
    ) -> Result<Arc<Family>> {
        validate_metric_name(name)?;
        validate_label_names(kind, label_names)?;
        if let Some(b) = bounds {
            validate_buckets(b)?;
        }

        // Entry lock makes lookup-or-insert atomic per name; value updates
        // never touch this lock.
        match self.families.entry(name.to_string()) {
            Entry::Occupied(existing) => {
                let family = Arc::clone(existing.get());
                family.check_compat(kind, label_names, bounds)?;
                Ok(family)
            }
            Entry::Vacant(slot) => {
                let desc = FamilyDesc {
                    name: name.to_string(),
                    help: help.to_string(),
                    label_names: label_names.iter().map(|l| (*l).to_string()).collect(),
                };
                let children = match (kind, bounds) {
                    (MetricKind::Counter, _) => Children::Counter(DashMap::new()),
                    (MetricKind::Gauge, _) => Children::Gauge(DashMap::new()),
                    (MetricKind::Histogram, Some(b)) => Children::Histogram {
                        bounds: Arc::from(b),
                        series: DashMap::new(),
                    },
                    (MetricKind::Histogram, None) => {
                        return Err(PromwellError::Internal(
                            "histogram registration without buckets".into(),
                        ))
                    }
                };
                let family = Arc::new(Family { desc, children });
                slot.insert(Arc::clone(&family));
                tracing::debug!(metric = name, kind = kind.as_str(), "registered metric family");
                Ok(family)
            }
        }
    }

    /// Register a counter family (idempotent for an identical shape).
    pub fn register_counter(
        &self,
        name: &str,
        help: &str,
        label_names: &[&str],
    ) -> Result<CounterFamily> {
        let family = self.register(MetricKind::Counter, name, help, label_names, None)?;
        Ok(CounterFamily { family })
    }

    /// Register a gauge family (idempotent for an identical shape).
    pub fn register_gauge(
        &self,
        name: &str,
        help: &str,
        label_names: &[&str],
    ) -> Result<GaugeFamily> {
        let family = self.register(MetricKind::Gauge, name, help, label_names, None)?;
        Ok(GaugeFamily { family })
    }

    /// Register a histogram family with explicit finite bucket boundaries.
    pub fn register_histogram(
        &self,
        name: &str,
        help: &str,
        label_names: &[&str],
        buckets: &[f64],
    ) -> Result<HistogramFamily> {
        let family = self.register(MetricKind::Histogram, name, help, label_names, Some(buckets))?;
        Ok(HistogramFamily { family })
    }

    fn lookup(&self, name: &str, kind: MetricKind) -> Result<Arc<Family>> {
        let family = self
            .families
            .get(name)
            .map(|e| Arc::clone(e.value()))
            .ok_or_else(|| PromwellError::NotFound(name.to_string()))?;
        if family.kind() != kind {
            return Err(PromwellError::NotFound(format!(
                "{name} is registered as {}, not {}",
                family.kind().as_str(),
                kind.as_str()
            )));
        }
        Ok(family)
    }

    /// Look up an existing counter family; never creates one.
    pub fn counter(&self, name: &str) -> Result<CounterFamily> {
        Ok(CounterFamily {
            family: self.lookup(name, MetricKind::Counter)?,
        })
    }

    /// Look up an existing gauge family; never creates one.
    pub fn gauge(&self, name: &str) -> Result<GaugeFamily> {
        Ok(GaugeFamily {
            family: self.lookup(name, MetricKind::Gauge)?,
        })
    }

    /// Look up an existing histogram family; never creates one.
    pub fn histogram(&self, name: &str) -> Result<HistogramFamily> {
        Ok(HistogramFamily {
            family: self.lookup(name, MetricKind::Histogram)?,
        })
    }

    /// Point-in-time copy of all instrument values.
    ///
    /// Each instrument is read independently under its own shard; slight
    /// cross-instrument skew is tolerated in exchange for never stopping the
    /// world.
    pub fn snapshot(&self) -> Snapshot {
        let mut families: Vec<FamilySnapshot> = self
            .families
            .iter()
            .map(|entry| snapshot_family(entry.value()))
            .collect();
        families.sort_by(|a, b| a.name.cmp(&b.name));
        Snapshot { families }
    }
}

fn snapshot_family(family: &Family) -> FamilySnapshot {
    let mut series: Vec<SeriesSnapshot> = match &family.children {
        Children::Counter(children) => children
            .iter()
            .map(|e| SeriesSnapshot {
                labels: zip_labels(&family.desc.label_names, e.key()),
                value: SeriesValue::Counter(e.value().value()),
            })
            .collect(),
        Children::Gauge(children) => children
            .iter()
            .map(|e| SeriesSnapshot {
                labels: zip_labels(&family.desc.label_names, e.key()),
                value: SeriesValue::Gauge(e.value().value()),
            })
            .collect(),
        Children::Histogram { bounds, series } => series
            .iter()
            .map(|e| {
                let h = e.value();
                // Buckets before count: paired with the ordering in
                // `Histogram::observe`, this keeps each captured histogram
                // cumulative (finite buckets never exceed +Inf).
                let buckets = bounds.iter().copied().zip(h.bucket_counts()).collect();
                let sum = h.sum();
                let count = h.count();
                SeriesSnapshot {
                    labels: zip_labels(&family.desc.label_names, e.key()),
                    value: SeriesValue::Histogram { buckets, sum, count },
                }
            })
            .collect(),
    };
    series.sort_by(|a, b| a.labels.cmp(&b.labels));
    FamilySnapshot {
        name: family.desc.name.clone(),
        help: family.desc.help.clone(),
        kind: family.kind(),
        series,
    }
}

fn zip_labels(names: &[String], values: &[String]) -> Vec<(String, String)> {
    names
        .iter()
        .cloned()
        .zip(values.iter().cloned())
        .collect()
}
