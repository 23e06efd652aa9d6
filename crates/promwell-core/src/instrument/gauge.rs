//! Settable gauge.

use super::value::AtomicF64;

/// Arbitrary f64 value holder; no sign constraints.
#[derive(Debug, Default)]
pub struct Gauge {
    value: AtomicF64,
}

impl Gauge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set to an absolute value.
    pub fn set(&self, v: f64) {
        self.value.set(v);
    }

    /// Add a signed delta.
    pub fn add(&self, delta: f64) {
        self.value.add(delta);
    }

    /// Increment by 1.
    pub fn inc(&self) {
        self.add(1.0);
    }

    /// Decrement by 1.
    pub fn dec(&self) {
        self.add(-1.0);
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.value.get()
    }
}
